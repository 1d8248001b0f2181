//! Subcommand implementations

pub mod info;
pub mod render;
