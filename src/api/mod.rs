//! API Module
//!
//! Structure:
//! - commands.rs: String-error command layer used by the CLI
//!
//! Usage:
//! - `api::predict(&detector, json)`
//! - `api::analyze_batch(&detector, json)`

pub mod commands;

pub use commands::*;
