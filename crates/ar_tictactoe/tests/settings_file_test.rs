//! Loading settings from disk.

use ar_tictactoe::{CommandLog, Controller, DisplayCommand, Settings};
use std::io::Write;

#[test]
fn test_settings_from_file_drive_status_text() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "debounce_ms = 500\nturn_text = \"Your move, {{player}}\"\n"
    )
    .expect("write settings");

    let settings = Settings::from_file(file.path()).expect("valid settings");
    assert_eq!(*settings.debounce_ms(), 500);

    let controller = Controller::new(CommandLog::new(), settings);
    assert_eq!(
        controller.display().commands(),
        &[DisplayCommand::SetStatusText {
            text: "Your move, X".to_string(),
        }]
    );
}

#[test]
fn test_missing_settings_file_is_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Settings::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read settings file"));
}
