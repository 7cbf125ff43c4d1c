#![cfg(feature = "cli")]

use clap::Parser;
use learning_journal::app::exercises::{Basics, GuestRegisterDesk};
use learning_journal::config::resolve_journal_config;
use learning_journal::domain::model::GuestRegister;
use learning_journal::domain::ports::ConfigProvider;
use learning_journal::utils::error::ErrorSeverity;
use learning_journal::utils::validation::Validate;
use learning_journal::{CliConfig, Command, Console, ExerciseRunner, JournalError, LocalStorage};
use std::io::Cursor;
use tempfile::TempDir;

fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

#[test]
fn test_runner_treats_closed_input_as_quiet_exit() {
    let mut console = scripted("");
    let result = ExerciseRunner::new(Basics).run(&mut console);
    assert!(result.is_ok());

    let output = String::from_utf8(console.into_output()).unwrap();
    assert!(output.starts_with("Hello, world!"));
    assert!(!output.contains("Script finished"));
}

#[test]
fn test_runner_propagates_real_failures() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file in the way").unwrap();

    // The export path sits below a regular file, so the write fails.
    let storage = LocalStorage::new(blocker.to_str().unwrap().to_string());
    let desk = GuestRegisterDesk::new(GuestRegister::seeded(), storage, "guests.csv");

    let mut console = scripted("7\n");
    let err = ExerciseRunner::new(desk).run(&mut console).unwrap_err();
    assert!(matches!(err, JournalError::IoError(_)));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}

#[test]
fn test_config_file_drives_exercise_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("journal.toml");
    std::env::set_var("JOURNAL_TEST_WORKSPACE", temp_dir.path().to_str().unwrap());
    std::fs::write(
        &config_path,
        r#"
[journal]
name = "Montressor Learning Journal"
author = "Amelia"

[workspace]
base_dir = "${JOURNAL_TEST_WORKSPACE}"

[file_io]
shelf_name = "vault"
sample_size = 3
last_update = "2025-11-10"

[backup]
folder = "Nightly"
archive_name = "nightly.zip"
"#,
    )
    .unwrap();

    let config = resolve_journal_config(Some(config_path.to_str().unwrap())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.base_dir(), temp_dir.path().to_str().unwrap());
    assert_eq!(config.shelf_name(), "vault");
    assert_eq!(config.sample_size(), 3);
    assert_eq!(config.last_update(), Some("2025-11-10"));
    assert_eq!(config.backup_folder(), "Nightly");
    assert_eq!(config.archive_name(), "nightly.zip");
    assert_eq!(config.guest_export_file(), "guest_register.csv");
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");
    let err = resolve_journal_config(Some(missing.to_str().unwrap())).unwrap_err();
    assert!(matches!(err, JournalError::IoError(_)));
}

#[test]
fn test_cli_parses_subcommands_and_global_flags() {
    let cli = CliConfig::try_parse_from([
        "learning-journal",
        "regex",
        "--input",
        "intercept.txt",
        "--output",
        "results.txt",
        "--verbose",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Command::Regex { input, output } => {
            assert_eq!(input.as_deref(), Some("intercept.txt"));
            assert_eq!(output.as_deref(), Some("results.txt"));
        }
        other => panic!("unexpected command {:?}", other),
    }

    let cli = CliConfig::try_parse_from([
        "learning-journal",
        "--base-dir",
        "/tmp/journal",
        "backup",
        "--cleanup",
    ])
    .unwrap();
    assert_eq!(cli.base_dir.as_deref(), Some("/tmp/journal"));
    assert!(matches!(cli.command, Command::Backup { cleanup: true }));

    let cli = CliConfig::try_parse_from(["learning-journal", "rpsls", "--seed", "7"]).unwrap();
    assert!(matches!(cli.command, Command::Rpsls { seed: Some(7) }));

    assert!(CliConfig::try_parse_from(["learning-journal"]).is_err());
}
