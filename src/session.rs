//! Account session: the explicit context for account-scoped state.
//!
//! A [`Session`] is created once the user has logged in and is passed to whatever
//! needs per-account state. It owns the key-value store and lazily loads one
//! [`RecentRepositories`] list per scope owner, so the logged-in user and each of
//! their organizations get independent lists.

use std::collections::HashMap;

use crate::domain::error::Result;
use crate::domain::ScopeOwner;
use crate::recent::{RecentRepositories, MAX_SIZE};
use crate::storage::KeyValueStore;

/// Per-account context owning the store and the loaded recent lists.
///
/// # Examples
///
/// ```
/// use hubrecents::session::Session;
/// use hubrecents::storage::MemoryStore;
/// use hubrecents::ScopeOwner;
///
/// let me = ScopeOwner::user(1, "octocat");
/// let org = ScopeOwner::organization(20, "octo-org");
/// let mut session = Session::new(me, MemoryStore::default());
///
/// session.recent_repositories(&org).add("octo-org/tools");
/// session.save_recent(&org)?;
///
/// assert!(session.recent_repositories(&org).contains("octo-org/tools"));
/// assert!(session.recent_for_account().is_empty());
/// # Ok::<(), hubrecents::RecentsError>(())
/// ```
pub struct Session<S: KeyValueStore> {
    account: ScopeOwner,
    store: S,
    capacity: usize,
    recents: HashMap<i64, RecentRepositories>,
}

impl<S: KeyValueStore> Session<S> {
    #[must_use]
    pub fn new(account: ScopeOwner, store: S) -> Self {
        tracing::debug!(account = %account.login, account_id = account.id, "session opened");
        Self {
            account,
            store,
            capacity: MAX_SIZE,
            recents: HashMap::new(),
        }
    }

    /// Sets the capacity used for lists loaded after this call.
    #[must_use]
    pub fn with_recent_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// The logged-in account.
    #[must_use]
    pub fn account(&self) -> &ScopeOwner {
        &self.account
    }

    /// Returns the recent list of `owner`, loading it from the store on first access.
    pub fn recent_repositories(&mut self, owner: &ScopeOwner) -> &mut RecentRepositories {
        let Self {
            store,
            capacity,
            recents,
            ..
        } = self;

        recents
            .entry(owner.id)
            .or_insert_with(|| RecentRepositories::load_with_capacity(owner, &*store, *capacity))
    }

    /// Returns the recent list of the logged-in account itself.
    pub fn recent_for_account(&mut self) -> &mut RecentRepositories {
        let account = self.account.clone();
        self.recent_repositories(&account)
    }

    /// Saves the recent list of `owner` if it has been loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write or commit fails.
    pub fn save_recent(&mut self, owner: &ScopeOwner) -> Result<()> {
        match self.recents.get(&owner.id) {
            Some(recent) => recent.save(&mut self.store),
            None => {
                tracing::trace!(owner_id = owner.id, "recent list never loaded, nothing to save");
                Ok(())
            }
        }
    }

    /// Saves every loaded recent list.
    ///
    /// All lists are attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered.
    pub fn save_all(&mut self) -> Result<()> {
        let mut first_error = None;

        for recent in self.recents.values() {
            if let Err(e) = recent.save(&mut self.store) {
                tracing::warn!(key = %recent.key(), error = %e, "failed to save recent list");
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Closes the session and hands back the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn lists_are_loaded_once_per_owner() {
        let org = ScopeOwner::organization(20, "octo-org");
        let mut session = Session::new(ScopeOwner::user(1, "me"), MemoryStore::default());

        session.recent_repositories(&org).add("octo-org/a");
        assert!(session.recent_repositories(&org).contains("octo-org/a"));
    }

    #[test]
    fn save_all_persists_every_loaded_owner() {
        let me = ScopeOwner::user(1, "me");
        let org = ScopeOwner::organization(20, "octo-org");
        let mut session = Session::new(me.clone(), MemoryStore::default());

        session.recent_for_account().add("me/dotfiles");
        session.recent_repositories(&org).add("octo-org/a");
        session.save_all().unwrap();

        let mut reopened = Session::new(me, session.into_store());
        assert!(reopened.recent_for_account().contains("me/dotfiles"));
        assert!(reopened.recent_repositories(&org).contains("octo-org/a"));
    }

    #[test]
    fn saving_unloaded_owner_does_not_commit() {
        let mut session = Session::new(ScopeOwner::user(1, "me"), MemoryStore::default());
        session.save_recent(&ScopeOwner::user(2, "other")).unwrap();
        assert_eq!(session.store().commit_count(), 0);
    }

    #[test]
    fn capacity_applies_to_loaded_lists() {
        let mut session =
            Session::new(ScopeOwner::user(1, "me"), MemoryStore::default()).with_recent_capacity(2);

        session.recent_for_account().add("me/a").add("me/b").add("me/c");
        assert_eq!(session.recent_for_account().len(), 2);
        assert!(!session.recent_for_account().contains("me/a"));
    }
}
