//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Confirm, MultiSelect, Select};

use crate::config::{ConfigFile, ConfigManager, DEFAULT_ADDR, DEFAULT_MODEL};
use crate::translation::{LANGUAGES, default_selection};
use crate::ui::{Style, handle_prompt_cancellation};

/// Models offered in the picker. Any other name can still be set in the
/// config file or passed with `--model`.
const KNOWN_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash",
    "gemini-2.5-pro",
];

/// Runs the configure command.
///
/// With `show`, prints the effective settings. Otherwise walks through the
/// default languages, model, slow speech and cache, then saves the file.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if show {
        let config = manager.load_or_default()?;
        print_config(&manager, &config);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager))?;
    Ok(())
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    print_config(manager, &config);

    let languages = select_languages(config.voxlate.languages.as_deref())?;
    let model = select_model(config.gemini.model.as_deref())?;

    let slow = Confirm::new("Use slow speech?")
        .with_default(config.speech.slow.unwrap_or(false))
        .prompt()?;
    let cache = Confirm::new("Cache replies and audio?")
        .with_default(config.cache.enabled.unwrap_or(false))
        .prompt()?;

    config.voxlate.languages = Some(languages);
    config.gemini.model = Some(model);
    config.speech.slow = Some(slow);
    config.cache.enabled = Some(cache);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_config(manager: &ConfigManager, config: &ConfigFile) {
    let not_set = || Style::secondary("(not set)");

    println!("{}", Style::header("Current settings"));
    println!(
        "  {}  {}",
        Style::label("languages"),
        config
            .voxlate
            .languages
            .as_ref()
            .map_or_else(not_set, |l| Style::value(l.join(", ")))
    );
    println!(
        "  {}      {}",
        Style::label("model"),
        config
            .gemini
            .model
            .as_deref()
            .map_or_else(|| Style::secondary(format!("{DEFAULT_MODEL} (default)")), Style::value)
    );
    println!(
        "  {}    {}",
        Style::label("api key"),
        if config.gemini.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::warning(format!("(not set, export {})", config.gemini.api_key_env()))
        }
    );
    println!(
        "  {}       {}",
        Style::label("slow"),
        Style::value(config.speech.slow.unwrap_or(false))
    );
    println!(
        "  {}      {}",
        Style::label("cache"),
        Style::value(config.cache.enabled.unwrap_or(false))
    );
    println!(
        "  {}       {}",
        Style::label("addr"),
        config
            .server
            .addr
            .as_deref()
            .map_or_else(|| Style::secondary(format!("{DEFAULT_ADDR} (default)")), Style::value)
    );
    println!(
        "  {}       {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display())
    );
    println!();
}

fn select_languages(current: Option<&[String]>) -> Result<Vec<String>> {
    let current = current.map_or_else(default_selection, <[String]>::to_vec);
    let options: Vec<&str> = LANGUAGES.iter().map(|(name, _)| *name).collect();
    let defaults: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, name)| current.iter().any(|c| c == *name))
        .map(|(i, _)| i)
        .collect();

    let selection = MultiSelect::new("Default languages:", options)
        .with_default(&defaults)
        .with_page_size(13)
        .prompt()?;

    if selection.is_empty() {
        bail!("Select at least one language");
    }

    Ok(selection.into_iter().map(str::to_string).collect())
}

fn select_model(current: Option<&str>) -> Result<String> {
    let mut options: Vec<String> = KNOWN_MODELS.iter().map(|m| (*m).to_string()).collect();
    if let Some(c) = current
        && !options.iter().any(|m| m == c)
    {
        options.insert(0, c.to_string());
    }

    let default = current.unwrap_or(DEFAULT_MODEL);
    let default_index = options.iter().position(|m| m == default).unwrap_or(0);

    let selection = Select::new("Default model:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}
