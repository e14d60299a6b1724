//! Controller Dialects
//!
//! Command mapping, required argument order and program boilerplate for each
//! target controller, loaded from TOML.

pub mod registry;
pub mod schema;

pub use registry::{
    parse_dialect, DialectPriority, DialectRegistry, LoadedDialect, DEFAULT_DIALECT,
};
pub use schema::{CommandRule, CoordinateMode, Dialect, InitialState};
