//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the TOML configuration file from the
//! platform-appropriate directory and falls back to defaults when the file
//! does not exist yet.  The client never writes it.

pub mod config;
