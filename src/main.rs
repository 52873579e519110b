use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use voxlate::cli::commands::{configure, serve, translate};
use voxlate::cli::{Args, Command};
use voxlate::input::InputError;
use voxlate::output::{self, OutputConfig};
use voxlate::translation::{LanguageError, ServiceError, print_languages, validate_language};
use voxlate::ui::Style;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(matches!(args.command, Some(Command::Serve { .. })));
    output::init(OutputConfig::from_env(args.quiet));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            voxlate::warn!("{} {e:#}", Style::error("Error:"));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    for lang in &args.languages {
        validate_language(lang)?;
    }

    match args.command {
        Some(Command::Languages) => print_languages(),
        Some(Command::Configure { show }) => configure::run_configure(show)?,
        Some(Command::Serve { addr }) => {
            serve::run_serve(serve::ServeOptions {
                addr,
                languages: args.languages,
                model: args.model,
                slow: args.slow,
                cache: args.cache,
            })
            .await?;
        }
        None => {
            translate::run_translate(translate::TranslateOptions {
                text: args.text,
                file: args.file,
                languages: args.languages,
                model: args.model,
                slow: args.slow,
                cache: args.cache,
                save_audio: args.save_audio,
            })
            .await?;
        }
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise the server logs requests
/// at info and the one-shot command only logs errors.
fn init_logging(serving: bool) {
    let default = if serving { "voxlate=info" } else { "voxlate=error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    for cause in err.chain() {
        if let Some(service) = cause.downcast_ref::<ServiceError>() {
            return match service {
                ServiceError::MissingApiKey { .. } => exitcode::CONFIG,
                ServiceError::InvalidRequest(_) => exitcode::DATAERR,
                _ => exitcode::UNAVAILABLE,
            };
        }
        if let Some(language) = cause.downcast_ref::<LanguageError>() {
            return match language {
                LanguageError::Unknown(_) => exitcode::USAGE,
                LanguageError::UnknownInConfig(_) => exitcode::CONFIG,
            };
        }
        if let Some(input) = cause.downcast_ref::<InputError>() {
            return match input {
                InputError::Empty | InputError::Missing => exitcode::NOINPUT,
                InputError::TooLarge { .. } | InputError::NotUtf8 => exitcode::DATAERR,
            };
        }
        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return exitcode::CONFIG;
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return exitcode::IOERR;
        }
    }

    exitcode::SOFTWARE
}
