//! G-code Post-Processor
//!
//! Translates generic, vendor-neutral G-code into the dialect of a specific
//! CNC controller.
//!
//! This library provides:
//! - Line splitting (`COMMAND [FEEDRATE] [ARGS...]`)
//! - Dialect-driven translation with feed-rate and position carry-forward
//! - TOML dialect definitions
//! - Configuration management

pub mod config;
pub mod dialect;
pub mod export;
pub mod parser;
pub mod translate;

// Re-exports for clean public API
pub use config::Config;
pub use dialect::{Dialect, DialectRegistry};
pub use export::{export, write_document, PathObject};
pub use parser::{parse_line, ParsedLine};
pub use translate::{translate_document, TranslateError, Translator};
