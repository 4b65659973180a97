//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod serve;
