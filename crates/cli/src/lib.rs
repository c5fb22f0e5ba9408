//! Bozor CLI - drive the cart from a terminal.
//!
//! The cart lives in a JSON file holding the same key/value namespace the
//! widget keeps in `localStorage`, so a file written here can be inspected
//! or seeded for the browser.
//!
//! # Modules
//!
//! - [`commands`] - Subcommands and their execution
//! - [`config`] - Environment configuration
//! - [`store`] - Atomic JSON file store
//! - [`surface`] - Log-backed cart surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod store;
pub mod surface;

pub use commands::{Command, CommandError, execute};
pub use config::{CliConfig, ConfigError};
pub use store::JsonFileStore;
pub use surface::LogSurface;
