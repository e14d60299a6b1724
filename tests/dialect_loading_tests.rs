//! Tests for loading dialects from directories and configuration
use std::fs;
use std::path::Path;

use clap::Parser;
use gcode_post::config::{Args, Config, PROJECT_CONFIG_FILE};
use gcode_post::dialect::{DialectPriority, DialectRegistry, DEFAULT_DIALECT};
use gcode_post::translate::translate_document;

const GRBL_LIKE: &str = r#"
[dialect]
name = "grbl-mm"
description = "Metric GRBL router"
line_comments = false

[program]
header = ["G21", "G90"]
footer = ["M5", "M30"]

[initial_state]
command = "G0"
feed_rate = "F600"
x = "X0"
y = "Y0"
z = "Z5"

[[commands]]
input = "G0"
output = "G0"
axes = ["X", "Y", "Z"]

[[commands]]
input = "G1"
output = "G1"
axes = ["X", "Y", "Z"]

[[commands]]
input = "G3"
output = "G3"
axes = ["X", "Y", "Z", "I", "J"]
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write dialect file");
}

#[test]
fn test_load_directory_adds_dialects() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "grbl.dialect.toml", GRBL_LIKE);
    write(dir.path(), "notes.txt", "not a dialect");

    let mut registry = DialectRegistry::with_builtin().expect("built-in");
    let loaded = registry
        .load_directory(dir.path(), DialectPriority::Custom)
        .expect("load");

    assert_eq!(loaded, 1);
    assert_eq!(registry.list_dialects(), vec!["grbl-mm", DEFAULT_DIALECT]);

    let loaded = registry.get_loaded("grbl-mm").expect("grbl dialect");
    assert_eq!(loaded.priority, DialectPriority::Custom);
    assert_eq!(
        loaded.source_path.as_deref(),
        Some(dir.path().join("grbl.dialect.toml").as_path())
    );
}

#[test]
fn test_invalid_file_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "broken.toml", "[dialect]\nname = ");
    write(dir.path(), "grbl.toml", GRBL_LIKE);

    let mut registry = DialectRegistry::new();
    let loaded = registry
        .load_directory(dir.path(), DialectPriority::UserGlobal)
        .expect("load");

    assert_eq!(loaded, 1);
    assert!(registry.get("grbl-mm").is_some());
}

#[test]
fn test_custom_dialect_overrides_builtin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let overriding = GRBL_LIKE.replace("grbl-mm", DEFAULT_DIALECT);
    write(dir.path(), "shark.toml", &overriding);

    let mut registry = DialectRegistry::with_builtin().expect("built-in");
    registry
        .load_directory(dir.path(), DialectPriority::Custom)
        .expect("load");

    let dialect = registry.get(DEFAULT_DIALECT).expect("shark");
    assert_eq!(dialect.header, vec!["G21", "G90"]);
}

#[test]
fn test_loaded_dialect_translates() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "grbl.toml", GRBL_LIKE);

    let mut registry = DialectRegistry::new();
    registry
        .load_directory(dir.path(), DialectPriority::Custom)
        .expect("load");
    let dialect = registry.require("grbl-mm").expect("grbl dialect");

    let text = translate_document("G1 F300 X10\nG3 X0 Y10 I-10 J0\n", dialect).expect("translate");
    assert_eq!(
        text,
        "G21\nG90\nF300\nG1 X10 Y0 Z5\nG3 X0 Y10 Z5 I-10 J0\nM5\nM30\n"
    );
}

#[test]
fn test_from_config_uses_project_dialect_dir() {
    let project = tempfile::tempdir().expect("tempdir");
    fs::create_dir(project.path().join("dialects")).expect("mkdir");
    write(&project.path().join("dialects"), "grbl.toml", GRBL_LIKE);
    write(
        project.path(),
        PROJECT_CONFIG_FILE,
        "dialect = \"grbl-mm\"\ndialect_dir = \"dialects\"\n",
    );

    let args = Args::parse_from(["gcode-post", "part.nc"]);
    let config = Config::from_args(args, project.path()).expect("config");
    let registry = DialectRegistry::from_config(&config).expect("registry");

    assert_eq!(config.effective_dialect(), "grbl-mm");
    assert!(registry.require(config.effective_dialect()).is_ok());
}

#[test]
fn test_from_config_rejects_missing_cli_dir() {
    let cwd = tempfile::tempdir().expect("tempdir");
    let args = Args::parse_from(["gcode-post", "--dialect-dir", "nowhere"]);
    let config = Config::from_args(args, cwd.path()).expect("config");

    assert!(DialectRegistry::from_config(&config).is_err());
}
