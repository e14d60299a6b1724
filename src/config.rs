//! Configuration management for the G-code post-processor.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration (`.gcode-post.toml`)
//! - Dialect directory and dialect selection

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::dialect::DEFAULT_DIALECT;

/// File name searched for in the working directory and its ancestors
pub const PROJECT_CONFIG_FILE: &str = ".gcode-post.toml";

/// Command-line arguments for the post-processor
#[derive(Debug, Parser)]
#[command(name = "gcode-post")]
#[command(about = "Translate generic G-code into a CNC controller dialect")]
#[command(version)]
pub struct Args {
    /// Toolpath G-code files to translate (`-` reads stdin)
    #[arg(help = "Input G-code file; exactly one is accepted")]
    pub inputs: Vec<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long, help = "Write the translated program to this file")]
    pub output: Option<PathBuf>,

    /// Explicitly specify the controller dialect
    #[arg(long, help = "Controller dialect to emit (e.g., 'shark-hd4')")]
    pub dialect: Option<String>,

    /// Extra dialect directory, highest priority
    #[arg(long, help = "Directory containing dialect TOML files")]
    pub dialect_dir: Option<PathBuf>,

    /// Drop the per-line `(Command: ...)` comments
    #[arg(long)]
    pub no_line_comments: bool,

    /// Print the available dialects and exit
    #[arg(long)]
    pub list_dialects: bool,

    /// Log level
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Project-level settings read from `.gcode-post.toml`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub dialect: Option<String>,
    /// Relative paths resolve against the config file's directory
    pub dialect_dir: Option<PathBuf>,
    pub line_comments: Option<bool>,
}

impl ProjectConfig {
    /// Find and read the nearest project config, starting at `start`
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, ProjectConfig)>> {
        for dir in start.ancestors() {
            let candidate = dir.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((candidate, config)));
            }
        }
        Ok(None)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse project config: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files as given on the command line
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    /// Dialect explicitly set via command line
    pub cli_dialect: Option<String>,
    /// Dialect from the project config
    pub project_dialect: Option<String>,
    pub project_config_path: Option<PathBuf>,
    /// User-global dialect directory (lower priority than `dialect_dirs`)
    pub user_dialect_dir: Option<PathBuf>,
    /// Custom dialect directories, lowest priority first
    pub dialect_dirs: Vec<PathBuf>,
    pub line_comments: Option<bool>,
    pub list_dialects: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Self::from_args(Args::parse(), &cwd)
    }

    /// Create configuration from explicit arguments and working directory
    pub fn from_args(args: Args, cwd: &Path) -> Result<Self> {
        let project = ProjectConfig::discover(cwd)?;

        let mut dialect_dirs = Vec::new();
        let mut project_dialect = None;
        let mut project_config_path = None;
        let mut line_comments = None;

        if let Some((path, project)) = project {
            if let Some(dir) = project.dialect_dir {
                let base = path.parent().unwrap_or(cwd);
                dialect_dirs.push(base.join(dir));
            }
            project_dialect = project.dialect;
            line_comments = project.line_comments;
            project_config_path = Some(path);
        }

        // CLI directory comes last so it wins over the project one
        if let Some(custom_dir) = args.dialect_dir {
            dialect_dirs.push(cwd.join(custom_dir));
        }

        if args.no_line_comments {
            line_comments = Some(false);
        }

        let user_dialect_dir =
            dirs::config_dir().map(|dir| dir.join("gcode-post").join("dialects"));

        Ok(Config {
            inputs: args.inputs,
            output: args.output,
            cli_dialect: args.dialect,
            project_dialect,
            project_config_path,
            user_dialect_dir,
            dialect_dirs,
            line_comments,
            list_dialects: args.list_dialects,
            log_level: args.log_level,
        })
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }

    /// Dialect to use: CLI > project config > built-in default
    pub fn effective_dialect(&self) -> &str {
        self.cli_dialect
            .as_deref()
            .or(self.project_dialect.as_deref())
            .unwrap_or(DEFAULT_DIALECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["gcode-post"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_without_project_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_args(args(&["part.nc"]), dir.path()).unwrap();

        assert!(!config.has_project_config());
        assert_eq!(config.effective_dialect(), DEFAULT_DIALECT);
        assert_eq!(config.inputs, vec![PathBuf::from("part.nc")]);
        assert_eq!(config.line_comments, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_project_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "dialect = \"custom\"\ndialect_dir = \"dialects\"\nline_comments = false\n",
        )
        .unwrap();
        let nested = dir.path().join("jobs").join("today");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::from_args(args(&[]), &nested).unwrap();

        assert!(config.has_project_config());
        assert_eq!(config.effective_dialect(), "custom");
        assert_eq!(config.dialect_dirs, vec![dir.path().join("dialects")]);
        assert_eq!(config.line_comments, Some(false));
    }

    #[test]
    fn test_cli_overrides_project_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "dialect = \"custom\"\n").unwrap();

        let config = Config::from_args(
            args(&["--dialect", "shark-hd4", "--dialect-dir", "mine", "--no-line-comments"]),
            dir.path(),
        )
        .unwrap();

        assert_eq!(config.effective_dialect(), "shark-hd4");
        assert_eq!(config.dialect_dirs, vec![dir.path().join("mine")]);
        assert_eq!(config.line_comments, Some(false));
    }

    #[test]
    fn test_invalid_project_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "units = \"mm\"\n").unwrap();

        assert!(Config::from_args(args(&[]), dir.path()).is_err());
    }
}
