//! Export boundary
//!
//! Precondition checks on what the caller hands over, and persistence of a
//! finished program.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::dialect::Dialect;
use crate::translate::{translate_document, TranslateError, TranslateResult};

/// A toolpath-bearing object handed over for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathObject {
    /// Name shown in diagnostics (e.g., a file name)
    pub label: String,
    /// Generic G-code of the toolpath; `None` when the object has no path data
    pub path: Option<String>,
}

impl PathObject {
    pub fn new(label: impl Into<String>, gcode: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: Some(gcode.into()),
        }
    }

    /// An object that carries no toolpath
    pub fn without_path(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
        }
    }
}

/// Translate exactly one toolpath object
///
/// Fails with [`TranslateError::InvalidInput`] before any line is processed
/// when `objects` does not hold exactly one object, or when that object has
/// no path data.
pub fn export(objects: &[PathObject], dialect: &Dialect) -> TranslateResult<String> {
    let object = match objects {
        [object] => object,
        [] => {
            return Err(TranslateError::InvalidInput(
                "no path object given".to_string(),
            ));
        }
        _ => {
            return Err(TranslateError::InvalidInput(format!(
                "unable to write more than one path object (got {})",
                objects.len()
            )));
        }
    };

    let gcode = object.path.as_deref().ok_or_else(|| {
        TranslateError::InvalidInput(format!("'{}' is not a path object", object.label))
    })?;

    log::info!("Exporting '{}'", object.label);
    translate_document(gcode, dialect)
}

/// Write a finished program, replacing any existing file
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    fs::write(path, document.as_bytes())
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
