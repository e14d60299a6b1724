//! Translation Engine
//!
//! Command remapping, state carry-forward and program assembly.

pub mod document;
pub mod engine;
pub mod error;
pub mod state;

pub use document::OutputDocument;
pub use engine::{translate_document, Translator};
pub use error::{TranslateError, TranslateResult};
pub use state::TranslationState;
