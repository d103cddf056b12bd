//! Orchestration, structured logging, and configuration for the CLI.

pub mod config;
pub mod log;
pub mod ops;

pub use ops::{crack, decode_hex_digest, generate, search};
