//! Insyd Console
//!
//! Terminal client for the Insyd notifications service: configuration,
//! logging setup, one-shot CLI commands, and the interactive UI.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tui;
