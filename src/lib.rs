//! hubrecents: per-account recently used repository lists for code-hosting clients.
//!
//! hubrecents provides:
//! - Bounded, duplicate-free recent repository lists with least-recently-used eviction
//! - Independent lists per scope owner (the logged-in user and each organization)
//! - Durable persistence in a JSON key-value store with atomic commits
//! - An explicit [`Session`] context instead of implicit per-thread account state
//! - Cancellable sync campaigns over an account's users and organizations

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session (session)                                  │  ← Account context
//! │  - Lazily loaded per-owner recent lists             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Recent lists  │   │ Storage       │   │ Sync          │
//! │ (recent/)     │   │ (storage/)    │   │ (sync/)       │
//! │ - LRU bound   │   │ - JSON file   │   │ - Campaigns   │
//! │ - Tolerant IO │   │ - In-memory   │   │ - Cancellation│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directories (infrastructure/)               │
//! │  - Errors, owners, repository ids (domain/)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cli`]: Command-line arguments and dispatch
//! - [`domain`]: Core domain types (owners, repository identifiers, errors)
//! - [`storage`]: Key-value store trait and backends
//! - [`recent`]: Bounded recent repository lists
//! - [`session`]: Account session owning the store
//! - [`sync`]: Cancellable sync campaigns
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Tracing setup
//!
//! # Example
//!
//! ```rust
//! use hubrecents::{open_session, Config, ScopeOwner};
//!
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: Some(dir.path().display().to_string()),
//!     ..Default::default()
//! };
//!
//! let org = ScopeOwner::organization(20, "octo-org");
//! let mut session = open_session(&config, ScopeOwner::user(1, "octocat"))?;
//! session.recent_repositories(&org).add("octo-org/tools");
//! session.save_recent(&org)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod recent;
pub mod session;
pub mod storage;
pub mod sync;

pub use domain::{OwnerKind, RecentsError, Repository, RepositoryId, RepositoryIdProvider, Result, ScopeOwner};
pub use recent::{RecentRepositories, MAX_SIZE};
pub use session::Session;
pub use storage::{JsonStore, KeyValueStore, MemoryStore};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the store file inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Runtime configuration.
///
/// Loaded from a TOML file or a string map; every field has a default.
///
/// # Example
///
/// ```toml
/// data_dir = "~/.local/share/hubrecents"
/// max_recent = 10
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the store and log file.
    ///
    /// A leading `~` is expanded. Default: the platform data directory.
    pub data_dir: Option<String>,

    /// Number of recent repositories kept per owner. Default: [`MAX_SIZE`]
    pub max_recent: usize,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_recent: MAX_SIZE,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, such as environment-derived settings.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: String → `Option<String>` (empty means default)
    /// - `max_recent`: String → `usize` (falls back to [`MAX_SIZE`] on parse error or zero)
    /// - `trace_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hubrecents::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("max_recent".to_string(), "8".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.max_recent, 8);
    /// assert!(config.data_dir.is_none());
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let data_dir = config
            .get("data_dir")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let max_recent = config
            .get("max_recent")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(MAX_SIZE);

        Self {
            data_dir,
            max_recent,
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Loads configuration from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RecentsError::Config`] if the file is not valid TOML or
    /// `max_recent` is zero, and [`RecentsError::Io`] if it cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| RecentsError::Config(format!("failed to parse {}: {e}", path.display())))?;

        if config.max_recent == 0 {
            return Err(RecentsError::Config("max_recent must be at least 1".to_string()));
        }

        Ok(config)
    }

    /// The data directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(
            infrastructure::default_data_dir,
            infrastructure::expand_tilde,
        )
    }

    /// Path of the JSON store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.resolved_data_dir().join(STORE_FILE_NAME)
    }
}

/// Opens a session for `account` backed by the JSON store named in `config`.
///
/// # Errors
///
/// Returns an error if the store file exists but cannot be read, or its directory
/// cannot be created. A store file that does not parse is moved aside instead.
pub fn open_session(config: &Config, account: ScopeOwner) -> Result<Session<JsonStore>> {
    tracing::debug!(store = ?config.store_path(), "opening session");

    let store = JsonStore::open(config.store_path())?;
    Ok(Session::new(account, store).with_recent_capacity(config.max_recent))
}
