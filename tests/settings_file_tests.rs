//! Tests for seeding and reloading the settings file
use std::fs;

use lpeg_binder::language::settings::embedded_template;
use lpeg_binder::language::{Settings, ensure_settings_file, plugin_home, resolve, settings_path};

#[test]
fn test_first_run_writes_embedded_template() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("plugins").join("config");

    let path = ensure_settings_file(&config_dir).expect("seed settings");

    assert_eq!(path, settings_path(&config_dir));
    assert_eq!(fs::read_to_string(&path).unwrap(), embedded_template());
}

#[test]
fn test_first_run_prefers_template_next_to_lexer() {
    let dir = tempfile::tempdir().unwrap();
    let home = plugin_home(dir.path());
    fs::create_dir_all(&home).unwrap();
    fs::write(home.join("default.ini"), "lua = *.lua\n").unwrap();

    let path = ensure_settings_file(dir.path()).expect("seed settings");

    assert_eq!(fs::read_to_string(path).unwrap(), "lua = *.lua\n");
}

#[test]
fn test_existing_settings_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(dir.path());
    fs::write(&path, "python = *.py\n").unwrap();

    ensure_settings_file(dir.path()).expect("existing settings");

    assert_eq!(fs::read_to_string(path).unwrap(), "python = *.py\n");
}

#[test]
fn test_embedded_template_resolves_common_files() {
    let settings = Settings::parse(embedded_template());

    assert_eq!(settings.theme(), "light");
    assert!(!settings.override_enabled());
    assert_eq!(resolve("main.rs", &settings), Some("rust"));
    assert_eq!(resolve("Makefile", &settings), Some("makefile"));
    assert_eq!(resolve("setup.py", &settings), Some("python"));
    assert_eq!(resolve(".bashrc", &settings), Some("bash"));
    assert_eq!(resolve("Cargo.lock", &settings), None);
    assert!(!settings.language_names().contains(&"override"));
    assert!(!settings.language_names().contains(&"theme"));
}

#[test]
fn test_reload_replaces_languages() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(dir.path());
    fs::write(&path, "python = *.py\nlua = *.lua\n").unwrap();

    let mut settings = Settings::new();
    settings.reload_from(&path).unwrap();
    assert_eq!(settings.language_names(), vec!["python", "lua"]);

    fs::write(&path, "theme = dark\nlua = *.py\n").unwrap();
    settings.reload_from(&path).unwrap();

    assert_eq!(settings.language_names(), vec!["lua"]);
    assert_eq!(settings.theme(), "dark");
    assert_eq!(resolve("foo.py", &settings), Some("lua"));
}

#[test]
fn test_reload_twice_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(dir.path());
    fs::write(&path, "python = *.py;*.pyw\n").unwrap();

    let mut settings = Settings::new();
    settings.reload_from(&path).unwrap();
    let first = settings.clone();
    settings.reload_from(&path).unwrap();

    assert_eq!(settings, first);
}

#[test]
fn test_missing_file_keeps_previous_settings() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::parse("python = *.py\n");

    let error = settings
        .reload_from(&dir.path().join("missing.ini"))
        .unwrap_err();

    assert!(error.to_string().contains("Failed to read settings file"));
    assert_eq!(resolve("foo.py", &settings), Some("python"));
}

#[test]
fn test_invalid_utf8_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(dir.path());
    fs::write(&path, b"lua = *.lua\n\xff\xfe = *.x\n").unwrap();

    let mut settings = Settings::new();
    settings.reload_from(&path).unwrap();

    assert_eq!(resolve("init.lua", &settings), Some("lua"));
}
