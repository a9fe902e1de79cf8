//! Command-line interface definitions and dispatch.
//!
//! Argument parsing lives here rather than in `main.rs` so the command behavior can
//! run against any [`KeyValueStore`] and any output sink.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::error::Result;
use crate::domain::{RepositoryId, ScopeOwner};
use crate::session::Session;
use crate::storage::KeyValueStore;

#[derive(Parser, Debug)]
#[command(name = "hubrecents")]
#[command(version)]
#[command(about = "Per-account recently used repositories", long_about = None)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Numeric id of the account or organization the list belongs to
    #[arg(long)]
    pub owner_id: i64,

    /// Login of the owner
    #[arg(long, default_value = "")]
    pub login: String,

    /// Treat the owner as an organization
    #[arg(long)]
    pub org: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// The scope owner named by `--owner-id`, `--login` and `--org`.
    #[must_use]
    pub fn owner(&self) -> ScopeOwner {
        if self.org {
            ScopeOwner::organization(self.owner_id, self.login.as_str())
        } else {
            ScopeOwner::user(self.owner_id, self.login.as_str())
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a repository as most recently used
    Add {
        /// Repository as owner/name
        repository: String,
    },

    /// Check whether a repository is in the recent list (exit code 1 if not)
    Contains {
        /// Repository as owner/name
        repository: String,
    },

    /// Print the recent list, most recent first
    List,
}

/// Result of a successfully executed command, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit code 0.
    Success,
    /// Exit code 1: the queried repository is not in the recent list.
    NotFound,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NotFound => 1,
        }
    }
}

/// Runs `command` for `owner` against `session`, writing user-facing output to `out`.
///
/// # Errors
///
/// Returns an error if an `add` argument is not `owner/name`, if saving fails, or
/// if writing to `out` fails.
pub fn dispatch<S: KeyValueStore, W: Write>(
    session: &mut Session<S>,
    owner: &ScopeOwner,
    command: Command,
    out: &mut W,
) -> Result<Outcome> {
    let _span = tracing::debug_span!("cli_dispatch", owner_id = owner.id, command = ?command).entered();

    match command {
        Command::Add { repository } => {
            let id: RepositoryId = repository.parse()?;
            session.recent_repositories(owner).add_repository(&id);
            session.save_recent(owner)?;
            Ok(Outcome::Success)
        }
        Command::Contains { repository } => {
            let found = session.recent_repositories(owner).contains(repository.as_str());
            writeln!(out, "{found}")?;
            Ok(if found { Outcome::Success } else { Outcome::NotFound })
        }
        Command::List => {
            for id in session.recent_repositories(owner).iter() {
                writeln!(out, "{id}")?;
            }
            Ok(Outcome::Success)
        }
    }
}
