//! Domain layer for hubrecents.
//!
//! Core types independent of any storage backend or host environment.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`account`]: Scope owners (users and organizations)
//! - [`repository`]: Canonical `owner/name` identifiers
//!
//! # Examples
//!
//! ```
//! use hubrecents::domain::{Repository, RepositoryIdProvider, ScopeOwner};
//!
//! let org = ScopeOwner::organization(20, "octo-org");
//! let repo = Repository::new(1, org, "tools");
//! assert_eq!(repo.generate_id().as_deref(), Some("octo-org/tools"));
//! ```

pub mod account;
pub mod error;
pub mod repository;

pub use account::{OwnerKind, ScopeOwner};
pub use error::{RecentsError, Result};
pub use repository::{Repository, RepositoryId, RepositoryIdProvider};
