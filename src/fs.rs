//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes bytes to a file atomically using a temp file and rename.
///
/// The temp file lives next to the target so the rename stays on one
/// filesystem.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Path of the MP3 file for a language inside `dir`.
///
/// Language labels come from the model, so anything other than letters,
/// digits, `-` and `_` is replaced with `_`.
pub fn audio_path(dir: &Path, language: &str) -> PathBuf {
    let mut name: String = language
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        name.push_str("audio");
    }
    dir.join(format!("{name}.mp3"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Spanish.mp3");

        atomic_write(&file_path, &[0xFF, 0xF3, 0x44]).unwrap();

        assert_eq!(fs::read(&file_path).unwrap(), vec![0xFF, 0xF3, 0x44]);
    }

    #[test]
    fn test_atomic_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("French.mp3");

        fs::write(&file_path, b"old").unwrap();
        atomic_write(&file_path, b"new").unwrap();

        assert_eq!(fs::read(&file_path).unwrap(), b"new");
    }

    #[test]
    fn test_atomic_write_no_temp_file_remains() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("German.mp3");

        atomic_write(&file_path, b"content").unwrap();

        let temp_path = temp_dir.path().join(".German.mp3.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_audio_path_sanitizes_label() {
        let dir = Path::new("/tmp/out");
        assert_eq!(audio_path(dir, "Spanish"), dir.join("Spanish.mp3"));
        assert_eq!(audio_path(dir, "**Chinese**"), dir.join("__Chinese__.mp3"));
        assert_eq!(audio_path(dir, "../etc/passwd"), dir.join("___etc_passwd.mp3"));
        assert_eq!(audio_path(dir, "  "), dir.join("audio.mp3"));
    }
}
