//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema consulted by hosts to set
//! the process default encoding and to disable tag formats, and helpers to
//! load configuration from disk.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
