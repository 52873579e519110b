use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "voxlate")]
#[command(about = "Translate English text into many languages and hear every translation")]
#[command(version)]
pub struct Args {
    /// English text to translate (reads --file or stdin if not provided)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short = 'f', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Target language, repeatable (e.g. -l Spanish -l Japanese)
    #[arg(short = 'l', long = "lang", global = true)]
    pub languages: Vec<String>,

    /// Gemini model name
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Request slowed-down speech
    #[arg(long, global = true)]
    pub slow: bool,

    /// Reuse cached replies and audio
    #[arg(long, global = true)]
    pub cache: bool,

    /// Write one MP3 per language into this directory
    #[arg(long, value_name = "DIR")]
    pub save_audio: Option<PathBuf>,

    /// Suppress progress and status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the translator page in the browser
    Serve {
        /// Address to listen on
        #[arg(short = 'a', long)]
        addr: Option<String>,
    },
    /// List the selectable languages
    Languages,
    /// Configure voxlate settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
