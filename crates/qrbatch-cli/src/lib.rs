//! CLI library components for the QR batch generator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod progress;
pub mod summary;
