use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Largest source text accepted, in bytes.
pub const MAX_INPUT_SIZE: usize = 64 * 1024;

/// Problems with the source text itself, as opposed to failing to read it.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input is empty")]
    Empty,
    #[error(
        "Input size ({:.1} KB) exceeds maximum allowed size ({} KB).\n\n\
         Consider splitting the text into smaller parts.",
        *.size as f64 / 1024.0,
        MAX_INPUT_SIZE / 1024
    )]
    TooLarge { size: usize },
    #[error("Input is not valid UTF-8")]
    NotUtf8,
    #[error(
        "No input given.\n\n\
         Pass the text as an argument, use --file <path>, or pipe it on stdin."
    )]
    Missing,
}

/// Where the text to translate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Given directly on the command line.
    Text(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Picks the source from CLI arguments: inline text wins over a file,
    /// and stdin is used when neither is given.
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(path)) => Self::File(path),
            (None, None) => Self::Stdin,
        }
    }

    /// Reads the source text, trimming surrounding whitespace.
    pub fn read(&self) -> Result<String> {
        let text = match self {
            Self::Text(text) => {
                check_size(text.len())?;
                text.clone()
            }
            Self::File(path) => read_file(path)?,
            Self::Stdin => read_stdin()?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::Empty.into());
        }

        Ok(text.to_string())
    }
}

fn check_size(size: usize) -> Result<(), InputError> {
    if size > MAX_INPUT_SIZE {
        return Err(InputError::TooLarge { size });
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to access file: {}", path.display()))?;
    check_size(metadata.len() as usize)?;

    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[allow(clippy::significant_drop_tightening)]
fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::Missing.into());
    }

    let mut buffer = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut stdin = stdin.lock();

    loop {
        let bytes_read = stdin
            .read(&mut chunk)
            .context("Failed to read from stdin")?;

        if bytes_read == 0 {
            break;
        }

        buffer.extend_from_slice(&chunk[..bytes_read]);
        check_size(buffer.len())?;
    }

    String::from_utf8(buffer).map_err(|_| InputError::NotUtf8.into())
}
