//! Scope owners: the accounts and organizations that partition per-owner state.

use serde::{Deserialize, Serialize};

/// Whether a scope owner is a personal account or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    #[default]
    User,
    Organization,
}

/// An account or organization identity.
///
/// `id` is the stable numeric identifier assigned by the hosting service and is
/// what persistence keys are derived from; `login` may change over time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeOwner {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub kind: OwnerKind,
}

impl ScopeOwner {
    #[must_use]
    pub fn user(id: i64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            kind: OwnerKind::User,
        }
    }

    #[must_use]
    pub fn organization(id: i64, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            kind: OwnerKind::Organization,
        }
    }

    #[must_use]
    pub fn is_organization(&self) -> bool {
        self.kind == OwnerKind::Organization
    }
}
