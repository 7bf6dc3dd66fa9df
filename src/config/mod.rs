//! Configuration module for pxblend
//!
//! Provides types, discovery and parsing for `pxblend.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
