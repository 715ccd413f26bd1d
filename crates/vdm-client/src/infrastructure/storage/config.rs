//! TOML configuration for the input relay client.
//!
//! Reads `ClientConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\VdmInput\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/vdminput/config.toml` (or `~/.config/vdminput`)
//! - macOS:    `~/Library/Application Support/VdmInput/config.toml`
//!
//! ```toml
//! [client]
//! log_level = "info"
//!
//! [network]
//! host_address = "127.0.0.1"
//! port = 24810
//!
//! [input]
//! dpad_enabled = false
//! nav_touchpad_enabled = false
//! external_keyboard_enabled = true
//! external_mouse_enabled = true
//! ```
//!
//! Every field has a default, so a missing file, a missing table and a
//! missing key all work.  The `[input]` table is the initial
//! [`InputPolicy`].
//!
//! # What is TOML? (for beginners)
//!
//! TOML (Tom's Obvious Minimal Language) is a configuration file format that
//! reads like an INI file but has real types: the `port` above is an integer
//! and the `*_enabled` keys are booleans, not strings.  Each `[section]`
//! header starts a table, and each table maps onto one Rust struct below.
//!
//! The `serde` library generates the code that turns TOML text into those
//! structs.  `#[derive(Deserialize)]` does the work at compile time; the
//! `toml` crate only supplies the parser.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the key is absent, and `#[serde(default)]` on a table
//! falls back to the type's `Default` impl.  That lets the client start on
//! first run (before a config file exists) and keep working when a newer
//! version adds keys an older file lacks.
//!
//! # Read-only
//!
//! The client never writes this file.  Policy changes made at runtime through
//! [`ClientSession::update_policy`](crate::application::session::ClientSession::update_policy)
//! last for the process lifetime only.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::settings::InputPolicy;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `network.host_address` is not an IP address.
    #[error("invalid host address {0:?}")]
    InvalidHostAddress(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration stored on disk.
///
/// Each field is one TOML table; a table missing from the file is filled in
/// from its `Default` impl.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub client: ClientSection,
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub input: InputPolicy,
}

/// General client behaviour (`[client]` table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientSection {
    /// `tracing` filter used when `RUST_LOG` is unset: `"error"`, `"warn"`,
    /// `"info"`, `"debug"`, `"trace"`, or a full directive such as
    /// `"vdm_client=debug,info"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the remote device listens (`[network]` table).
///
/// `host_address` must be an IP literal; there is no DNS lookup, so the
/// client fails fast on a typo instead of hanging on resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSection {
    #[serde(default = "default_host_address")]
    pub host_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl NetworkSection {
    /// The remote device's socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostAddress`] if `host_address` is not an
    /// IPv4 or IPv6 literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host_address
            .parse()
            .map_err(|_| ConfigError::InvalidHostAddress(self.host_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_host_address() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    24810
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            host_address: default_host_address(),
            port: default_port(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config at `path`, returning `ClientConfig::default()` if the
/// file does not exist.
///
/// "Not found" is the normal first-run case and is not an error.  Any other
/// I/O failure (permissions, `path` naming a directory) is reported, since
/// silently falling back to defaults there would hide a broken setup.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the platform config directory, including the `VdmInput`
/// subdirectory, from environment variables.  `None` when the relevant
/// variable is unset (e.g. a stripped-down service environment).
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("VdmInput"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("vdminput"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("VdmInput")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
