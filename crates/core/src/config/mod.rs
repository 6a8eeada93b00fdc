//! Configuration loading and schema definitions
//!
//! TOML configuration for the location watch, logging and export.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
