//! # psee-cli
//!
//! Thin collaborators around the discovery core: delimited-text loading,
//! DOT rendering, tracing setup and the `psee` subcommands.

pub mod commands;
pub mod loader;
pub mod logging;
pub mod render;
