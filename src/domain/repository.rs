//! Repository identifiers.
//!
//! A repository is identified canonically by the string `"owner/name"`. Equality,
//! membership and persistence all operate on that canonical string; the structured
//! types here exist so callers holding richer repository data can derive it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::account::ScopeOwner;
use super::error::RecentsError;

/// Separator between owner login and repository name in canonical identifiers.
pub const ID_SEPARATOR: char = '/';

/// Anything that can produce a canonical `"owner/name"` identifier.
///
/// Returns `None` when the identifier cannot be derived, for example when a
/// repository has no owner loaded yet or its name is empty.
pub trait RepositoryIdProvider {
    fn generate_id(&self) -> Option<String>;
}

/// Structured `owner/name` pair.
///
/// # Examples
///
/// ```
/// use hubrecents::RepositoryId;
///
/// let id: RepositoryId = "rust-lang/cargo".parse()?;
/// assert_eq!(id.owner, "rust-lang");
/// assert_eq!(id.name, "cargo");
/// assert_eq!(id.to_string(), "rust-lang/cargo");
/// # Ok::<(), hubrecents::RecentsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ID_SEPARATOR}{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = RecentsError;

    /// Parses `owner/name`. Both halves must be non-empty and the name may not
    /// contain a further separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s
            .trim()
            .split_once(ID_SEPARATOR)
            .ok_or_else(|| RecentsError::InvalidRepository(s.to_string()))?;

        if owner.is_empty() || name.is_empty() || name.contains(ID_SEPARATOR) {
            return Err(RecentsError::InvalidRepository(s.to_string()));
        }

        Ok(Self::new(owner, name))
    }
}

impl RepositoryIdProvider for RepositoryId {
    fn generate_id(&self) -> Option<String> {
        if self.owner.is_empty() || self.name.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

/// A repository as returned by the hosting service.
///
/// Only the fields needed to derive an identifier are modeled; `owner` is
/// optional because partially loaded responses may omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub owner: Option<ScopeOwner>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Repository {
    #[must_use]
    pub fn new(id: i64, owner: ScopeOwner, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner: Some(owner),
            description: None,
        }
    }
}

impl RepositoryIdProvider for Repository {
    fn generate_id(&self) -> Option<String> {
        let owner = self.owner.as_ref()?;
        RepositoryId::new(owner.login.as_str(), self.name.as_str()).generate_id()
    }
}
