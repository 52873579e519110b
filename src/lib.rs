//! # voxlate - Multilingual Translation with Voice
//!
//! `voxlate` translates a piece of English text into several languages with
//! one Gemini request, splits the reply into `Language: Translation` lines
//! and synthesizes speech for every translation through Google Translate's
//! text-to-speech endpoint.
//!
//! ## Quick Start
//!
//! ```bash
//! export GEMINI_API_KEY=...
//!
//! # Translate into the default languages
//! voxlate "Good morning"
//!
//! # Pick languages and keep the audio
//! voxlate -l Japanese -l Hindi --save-audio ./audio "Where is the station?"
//!
//! # Open the page in a browser
//! voxlate serve
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/voxlate/config.toml`:
//!
//! ```toml
//! [voxlate]
//! languages = ["Spanish", "French", "Japanese"]
//!
//! [gemini]
//! model = "gemini-2.0-flash"
//! api_key_env = "GEMINI_API_KEY"
//!
//! [speech]
//! slow = false
//!
//! [server]
//! addr = "127.0.0.1:8501"
//!
//! [cache]
//! enabled = true
//! ```

/// Reply and audio cache using `SQLite`.
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from arguments, files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// The translate-then-speak flow.
pub mod pipeline;

/// Text-to-speech client and chunking.
pub mod speech;

/// Language catalog, prompt, reply parsing and the Gemini client.
pub mod translation;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;

/// Browser page served with axum.
pub mod web;
