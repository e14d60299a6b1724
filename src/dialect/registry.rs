//! Dialect Registry
//!
//! In-memory registry of controller dialects. Loading priority, lowest
//! first: built-in < user-global < custom directories. A dialect loaded at
//! equal or higher priority replaces one with the same name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};

use super::schema::{Dialect, DialectFile};
use crate::config::Config;

/// Name of the dialect used when nothing else is selected
pub const DEFAULT_DIALECT: &str = "shark-hd4";

const EMBEDDED_DIALECTS: &[(&str, &str)] = &[(
    "shark-hd4",
    include_str!("../../resources/dialects/shark-hd4.dialect.toml"),
)];

/// Where a dialect came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DialectPriority {
    BuiltIn = 0,
    UserGlobal = 1,
    Custom = 2,
}

/// A dialect with its source and priority
#[derive(Debug, Clone)]
pub struct LoadedDialect {
    pub dialect: Dialect,
    pub priority: DialectPriority,
    pub source_path: Option<PathBuf>,
}

/// In-memory dialect registry
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    dialects: HashMap<String, LoadedDialect>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the dialects embedded in the binary
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.add_embedded_dialects()?;
        Ok(registry)
    }

    /// Registry for a run: built-in dialects overlaid with every configured directory
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::with_builtin()?;

        if let Some(dir) = &config.user_dialect_dir {
            registry.load_directory(dir, DialectPriority::UserGlobal)?;
        }

        for dir in &config.dialect_dirs {
            ensure!(
                dir.is_dir(),
                "dialect directory {} does not exist",
                dir.display()
            );
            registry.load_directory(dir, DialectPriority::Custom)?;
        }

        log::info!("Loaded {} G-code dialects", registry.dialects.len());
        Ok(registry)
    }

    /// Add a dialect unless one with higher priority is already registered
    ///
    /// Returns whether the dialect was stored.
    pub fn add_dialect(
        &mut self,
        dialect: Dialect,
        priority: DialectPriority,
        source_path: Option<PathBuf>,
    ) -> bool {
        let should_load = match self.dialects.get(&dialect.name) {
            Some(existing) => priority >= existing.priority,
            None => true,
        };

        if should_load {
            self.dialects.insert(
                dialect.name.clone(),
                LoadedDialect {
                    dialect,
                    priority,
                    source_path,
                },
            );
        }

        should_load
    }

    /// Add the dialects embedded in the binary
    pub fn add_embedded_dialects(&mut self) -> Result<()> {
        for (name, content) in EMBEDDED_DIALECTS {
            let dialect = parse_dialect(content)
                .with_context(|| format!("Failed to parse built-in dialect '{}'", name))?;
            self.add_dialect(dialect, DialectPriority::BuiltIn, None);
        }
        Ok(())
    }

    /// Load every `*.toml` file in a directory
    ///
    /// A missing directory loads nothing. Files that fail to parse or
    /// validate are skipped with a warning. Returns how many dialects were
    /// stored.
    pub fn load_directory(&mut self, dir: &Path, priority: DialectPriority) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read dialect directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path, priority) {
                Ok(true) => loaded += 1,
                Ok(false) => {}
                Err(e) => log::warn!("Skipping dialect file {}: {:#}", path.display(), e),
            }
        }

        log::debug!("Loaded {} dialects from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Load a single dialect file
    pub fn load_file(&mut self, path: &Path, priority: DialectPriority) -> Result<bool> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dialect file: {}", path.display()))?;
        let dialect = parse_dialect(&content)
            .with_context(|| format!("Failed to load dialect file: {}", path.display()))?;

        Ok(self.add_dialect(dialect, priority, Some(path.to_path_buf())))
    }

    pub fn get(&self, name: &str) -> Option<&Dialect> {
        self.dialects.get(name).map(|loaded| &loaded.dialect)
    }

    pub fn get_loaded(&self, name: &str) -> Option<&LoadedDialect> {
        self.dialects.get(name)
    }

    /// Look a dialect up, failing with the list of known names
    pub fn require(&self, name: &str) -> Result<&Dialect> {
        self.get(name).with_context(|| {
            format!(
                "unknown dialect '{}' (available: {})",
                name,
                self.list_dialects().join(", ")
            )
        })
    }

    /// All registered dialect names, sorted
    pub fn list_dialects(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Parse and validate dialect TOML
pub fn parse_dialect(content: &str) -> Result<Dialect> {
    let file: DialectFile = toml::from_str(content).context("Failed to parse dialect TOML")?;
    Dialect::try_from(file)
}
