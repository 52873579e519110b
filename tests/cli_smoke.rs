#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! responds to basic commands. The translate runs point both service
//! endpoints at a local wiremock server.

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(deprecated)]
fn voxlate(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("voxlate").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("XDG_CACHE_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Translate English text"))
        .stdout(predicate::str::contains("--lang"))
        .stdout(predicate::str::contains("--save-audio"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("zh-CN"))
        .stdout(predicate::str::contains("Hindi"));
}

#[test]
fn test_invalid_language() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .args(["-l", "Elvish", "Hello"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn test_missing_api_key() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .args(["-l", "Spanish", "Hello"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_serve_without_api_key_fails_before_binding() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .args(["serve", "--addr", "127.0.0.1:0"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_configure_show_without_config() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current settings"))
        .stdout(predicate::str::contains("gemini-2.0-flash (default)"))
        .stdout(predicate::str::contains("export GEMINI_API_KEY"));
}

#[test]
fn test_configure_show_reads_config_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("voxlate");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        "[voxlate]\nlanguages = [\"Korean\", \"Thai\"]\n\n[gemini]\nmodel = \"gemini-2.5-flash\"\n",
    )
    .unwrap();

    voxlate(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Korean, Thai"))
        .stdout(predicate::str::contains("gemini-2.5-flash"));
}

#[test]
fn test_invalid_language_in_config_file() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("voxlate");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[voxlate]\nlanguages = [\"Elvish\"]\n").unwrap();

    voxlate(&home)
        .env("GEMINI_API_KEY", "not-used")
        .arg("Hello")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains(
            "Invalid language in config file: 'Elvish'",
        ));
}

#[test]
fn test_empty_input_is_noinput() {
    let home = TempDir::new().unwrap();
    voxlate(&home)
        .env("GEMINI_API_KEY", "not-used")
        .args(["-l", "Spanish", "   "])
        .assert()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("Input is empty"));
}

fn write_endpoints(home: &TempDir, server: &MockServer) {
    let dir = home.path().join("voxlate");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!(
            "[gemini]\nendpoint = \"{uri}\"\n\n[speech]\nendpoint = \"{uri}\"\n",
            uri = server.uri()
        ),
    )
    .unwrap();
}

async fn mount_reply(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn run_blocking(mut cmd: Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_translate_prints_entries_and_saves_audio() {
    let server = MockServer::start().await;
    mount_reply(&server, "Spanish: Hola\nJapanese: こんにちは\nKlingon: nuqneH").await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "ja"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    write_endpoints(&home, &server);
    let audio_dir = home.path().join("audio");

    let mut cmd = voxlate(&home);
    cmd.env("GEMINI_API_KEY", "test-key")
        .args(["-l", "Spanish", "-l", "Japanese", "--save-audio"])
        .arg(&audio_dir)
        .arg("Hello");
    let output = run_blocking(cmd).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish: Hola"))
        .stdout(predicate::str::contains("Japanese: こんにちは"))
        .stdout(predicate::str::contains("Klingon: nuqneH"))
        .stderr(predicate::str::contains(
            "Text-to-speech not available for Klingon",
        ))
        .stderr(predicate::str::contains("Error generating audio"))
        .stderr(predicate::str::contains("Translation completed!"))
        .stderr(predicate::str::contains("1 audio file(s) written"))
        .stderr(predicate::str::contains("WARN").not());

    assert_eq!(std::fs::read(audio_dir.join("Spanish.mp3")).unwrap(), vec![1, 2, 3]);
    assert!(!audio_dir.join("Japanese.mp3").exists());
    assert!(!audio_dir.join("Klingon.mp3").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_translate_empty_reply_still_completes() {
    let server = MockServer::start().await;
    mount_reply(&server, "").await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1]))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    write_endpoints(&home, &server);

    let mut cmd = voxlate(&home);
    cmd.env("GEMINI_API_KEY", "test-key")
        .args(["-l", "Spanish", "Hello"]);
    let output = run_blocking(cmd).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Translation completed!"))
        .stderr(predicate::str::contains(
            "no 'Language: Translation' lines",
        ));
}
