use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

use crate::paths;
use crate::translation::prompt_hash;

/// Cache key for a generator reply.
pub fn response_key(model: &str, prompt: &str) -> String {
    hash_key(&serde_json::json!({
        "prompt": prompt,
        "model": model,
        "prompt_hash": prompt_hash(),
    }))
}

/// Cache key for synthesized speech.
pub fn speech_key(text: &str, locale: &str, slow: bool) -> String {
    hash_key(&serde_json::json!({
        "text": text,
        "locale": locale,
        "slow": slow,
    }))
}

fn hash_key(input: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

pub struct CacheManager {
    db_path: PathBuf,
}

impl CacheManager {
    pub fn new() -> Result<Self> {
        let cache_dir = paths::cache_dir()?;

        std::fs::create_dir_all(&cache_dir).with_context(|| {
            format!("Failed to create cache directory: {}", cache_dir.display())
        })?;

        Self::open(cache_dir.join("cache.db"))
    }

    pub fn open(db_path: PathBuf) -> Result<Self> {
        let manager = Self { db_path };
        manager.init_db()?;
        Ok(manager)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS responses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                model TEXT NOT NULL,
                prompt_hash TEXT NOT NULL,
                prompt TEXT NOT NULL,
                response_text TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create responses table")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS speech (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cache_key TEXT UNIQUE NOT NULL,
                locale TEXT NOT NULL,
                slow INTEGER NOT NULL,
                text TEXT NOT NULL,
                audio BLOB NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                accessed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create speech table")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open cache database: {}", self.db_path.display()))
    }

    pub fn get_response(&self, model: &str, prompt: &str) -> Result<Option<String>> {
        let cache_key = response_key(model, prompt);
        let conn = self.connect()?;

        let result: Option<String> = conn
            .query_row(
                "SELECT response_text FROM responses WHERE cache_key = ?1",
                [&cache_key],
                |row| row.get(0),
            )
            .optional()?;

        if result.is_some() {
            conn.execute(
                "UPDATE responses SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put_response(&self, model: &str, prompt: &str, response_text: &str) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO responses
             (cache_key, model, prompt_hash, prompt, response_text)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                response_key(model, prompt),
                model,
                prompt_hash(),
                prompt,
                response_text,
            ],
        )
        .context("Failed to insert response into cache")?;

        Ok(())
    }

    pub fn get_speech(&self, text: &str, locale: &str, slow: bool) -> Result<Option<Vec<u8>>> {
        let cache_key = speech_key(text, locale, slow);
        let conn = self.connect()?;

        let result: Option<Vec<u8>> = conn
            .query_row(
                "SELECT audio FROM speech WHERE cache_key = ?1",
                [&cache_key],
                |row| row.get(0),
            )
            .optional()?;

        if result.is_some() {
            conn.execute(
                "UPDATE speech SET accessed_at = CURRENT_TIMESTAMP WHERE cache_key = ?1",
                [&cache_key],
            )?;
        }

        Ok(result)
    }

    pub fn put_speech(&self, text: &str, locale: &str, slow: bool, audio: &[u8]) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO speech (cache_key, locale, slow, text, audio)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![speech_key(text, locale, slow), locale, slow, text, audio],
        )
        .context("Failed to insert speech into cache")?;

        Ok(())
    }
}
