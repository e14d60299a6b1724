//! Dialect Schema Types
//!
//! TOML shape of a controller dialect and the validated runtime form used
//! by the translator.

use std::collections::HashMap;

use anyhow::{bail, ensure, Result};
use serde::Deserialize;

use crate::parser::Axis;

/// Root dialect file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DialectFile {
    pub dialect: DialectMeta,
    #[serde(default)]
    pub program: ProgramLayout,
    pub initial_state: InitialState,
    pub commands: Vec<CommandRule>,
}

/// Dialect metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DialectMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Emit a `(Command: ...)` comment before every translated block
    #[serde(default = "default_line_comments")]
    pub line_comments: bool,
}

fn default_line_comments() -> bool {
    true
}

/// Fixed boilerplate around the translated lines
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProgramLayout {
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub footer: Vec<String>,
}

/// How X/Y/Z words are interpreted by the controller
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    #[default]
    Absolute,
    /// Words are distances from the current position
    Relative,
}

/// Translation state in effect right after the header
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InitialState {
    #[serde(default)]
    pub mode: CoordinateMode,
    pub command: String,
    pub feed_rate: String,
    pub x: String,
    pub y: String,
    pub z: String,
}

/// How one generic command is written in the dialect
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommandRule {
    /// Generic command token (e.g., "G0")
    pub input: String,
    /// Dialect command token (e.g., "G00")
    pub output: String,
    /// Arguments the output command requires, in emission order
    #[serde(default)]
    pub axes: Vec<Axis>,
    /// Coordinate mode switched to once the command is emitted
    #[serde(default)]
    pub mode: Option<CoordinateMode>,
    /// Axis holding the Z height the tool ends at (canned cycles)
    #[serde(default)]
    pub retract_axis: Option<Axis>,
    pub description: Option<String>,
}

impl CommandRule {
    pub fn requires(&self, axis: Axis) -> bool {
        self.axes.contains(&axis)
    }
}

/// Runtime dialect (optimized for lookups)
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub line_comments: bool,
    pub header: Vec<String>,
    pub footer: Vec<String>,
    pub initial_state: InitialState,
    pub commands: HashMap<String, CommandRule>,
}

impl Dialect {
    /// Command rule for a generic command token
    pub fn rule(&self, command: &str) -> Option<&CommandRule> {
        self.commands.get(command)
    }

    /// Generic command tokens this dialect translates, sorted
    pub fn supported_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Same dialect with per-line comments switched on or off
    pub fn with_line_comments(mut self, enabled: bool) -> Self {
        self.line_comments = enabled;
        self
    }
}

impl TryFrom<DialectFile> for Dialect {
    type Error = anyhow::Error;

    fn try_from(file: DialectFile) -> Result<Self> {
        let name = file.dialect.name;
        ensure!(
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
            "dialect name '{}' must be non-empty and use only letters, digits, '_' or '-'",
            name
        );

        validate_initial_state(&file.initial_state)?;

        let mut commands = HashMap::with_capacity(file.commands.len());
        for rule in file.commands {
            validate_rule(&rule)?;
            if commands.contains_key(&rule.input) {
                bail!("command '{}' is mapped more than once", rule.input);
            }
            commands.insert(rule.input.clone(), rule);
        }

        Ok(Self {
            name,
            version: file.dialect.version,
            description: file.dialect.description,
            line_comments: file.dialect.line_comments,
            header: file.program.header,
            footer: file.program.footer,
            initial_state: file.initial_state,
            commands,
        })
    }
}

fn validate_initial_state(state: &InitialState) -> Result<()> {
    let fields = [
        ("feed_rate", 'F', &state.feed_rate),
        ("x", 'X', &state.x),
        ("y", 'Y', &state.y),
        ("z", 'Z', &state.z),
    ];
    for (field, letter, value) in fields {
        ensure!(
            value.len() > 1 && value.starts_with(letter),
            "initial_state.{} must be a '{}' word, got '{}'",
            field,
            letter,
            value
        );
    }
    ensure!(
        !state.command.is_empty(),
        "initial_state.command must not be empty"
    );
    Ok(())
}

fn validate_rule(rule: &CommandRule) -> Result<()> {
    ensure!(
        !rule.input.trim().is_empty() && !rule.output.trim().is_empty(),
        "command mapping '{}' -> '{}' has an empty side",
        rule.input,
        rule.output
    );
    for (i, axis) in rule.axes.iter().enumerate() {
        if rule.axes[..i].contains(axis) {
            bail!(
                "command '{}' lists axis {} more than once",
                rule.input,
                axis
            );
        }
    }
    if let Some(axis) = rule.retract_axis {
        ensure!(
            rule.requires(axis),
            "command '{}' retracts to axis {} which it does not take",
            rule.input,
            axis
        );
    }
    Ok(())
}
