//! Bounded, per-owner list of recently used repositories.
//!
//! Each scope owner (an account or an organization) has its own list of canonical
//! `owner/name` identifiers. The list holds at most [`MAX_SIZE`] entries by default;
//! adding beyond that evicts the least recently used entry. Re-adding an entry
//! that is already present promotes it to most recent instead of duplicating it.
//!
//! # Persistence
//!
//! Lists are stored in a [`KeyValueStore`] under `recent_repos_<owner id>` as a
//! single comma-joined string, most recent last:
//!
//! ```text
//! recent_repos_20 = "octo/alpha,octo/beta,octo/gamma"
//! ```
//!
//! Reading is tolerant. A missing key, an unreadable store, or a value with empty
//! segments or duplicates never fails; the list simply starts with whatever could be
//! recovered, possibly nothing.
//!
//! # Examples
//!
//! ```
//! use hubrecents::recent::RecentRepositories;
//! use hubrecents::storage::MemoryStore;
//! use hubrecents::ScopeOwner;
//!
//! let org = ScopeOwner::organization(20, "octo-org");
//! let mut store = MemoryStore::default();
//!
//! let mut recent = RecentRepositories::load(&org, &store);
//! recent.add("octo-org/tools");
//! recent.save(&mut store)?;
//!
//! let reloaded = RecentRepositories::load(&org, &store);
//! assert!(reloaded.contains("octo-org/tools"));
//! # Ok::<(), hubrecents::RecentsError>(())
//! ```

use std::collections::VecDeque;

use crate::domain::error::Result;
use crate::domain::{RepositoryIdProvider, ScopeOwner};
use crate::storage::KeyValueStore;

/// Default number of repositories remembered per owner.
pub const MAX_SIZE: usize = 5;

/// Prefix of the store key; the owner's numeric id is appended.
const KEY_PREFIX: &str = "recent_repos_";

/// Separator between identifiers in the persisted value.
const DELIMITER: &str = ",";

/// Returns the store key holding the recent list of `owner`.
#[must_use]
pub fn store_key(owner: &ScopeOwner) -> String {
    format!("{KEY_PREFIX}{}", owner.id)
}

/// Recently used repositories for a single scope owner.
///
/// Entries are kept oldest first internally; [`iter`](Self::iter) yields them most
/// recent first. A list belongs to the session that loaded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentRepositories {
    key: String,
    capacity: usize,
    ids: VecDeque<String>,
}

impl RecentRepositories {
    /// Loads the list of `owner` from `store` with the default capacity.
    ///
    /// Never fails. See [`load_with_capacity`](Self::load_with_capacity).
    #[must_use]
    pub fn load<S: KeyValueStore + ?Sized>(owner: &ScopeOwner, store: &S) -> Self {
        Self::load_with_capacity(owner, store, MAX_SIZE)
    }

    /// Loads the list of `owner` from `store`, bounded to `capacity` entries.
    ///
    /// A capacity of zero is raised to one. If the store cannot be read the error is
    /// logged and an empty list is returned. Persisted values longer than `capacity`
    /// keep only their most recent entries.
    #[must_use]
    pub fn load_with_capacity<S: KeyValueStore + ?Sized>(
        owner: &ScopeOwner,
        store: &S,
        capacity: usize,
    ) -> Self {
        let key = store_key(owner);
        let capacity = capacity.max(1);
        let _span = tracing::debug_span!("recent_load", key = %key, capacity).entered();

        let ids = match store.get(&key) {
            Ok(Some(value)) => parse_value(&value, capacity),
            Ok(None) => {
                tracing::debug!("no persisted recent repositories");
                VecDeque::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read recent repositories, starting empty");
                VecDeque::new()
            }
        };

        tracing::debug!(count = ids.len(), "recent repositories loaded");

        Self { key, capacity, ids }
    }

    /// Returns whether `id` is in the list.
    ///
    /// `None` and blank identifiers are never present. Surrounding whitespace is
    /// ignored, matching [`add`](Self::add).
    ///
    /// ```
    /// # use hubrecents::recent::RecentRepositories;
    /// # use hubrecents::storage::MemoryStore;
    /// # use hubrecents::ScopeOwner;
    /// let recent = RecentRepositories::load(&ScopeOwner::user(1, "octo"), &MemoryStore::default());
    /// assert!(!recent.contains(""));
    /// assert!(!recent.contains(None::<&str>));
    /// ```
    pub fn contains<'a>(&self, id: impl Into<Option<&'a str>>) -> bool {
        match id.into().map(str::trim) {
            Some(id) if !id.is_empty() => self.ids.iter().any(|existing| existing == id),
            _ => false,
        }
    }

    /// Returns whether the repository referenced by `repo` is in the list.
    ///
    /// `None`, or a reference that cannot produce an identifier, is never present.
    pub fn contains_repository<R: RepositoryIdProvider + ?Sized>(&self, repo: Option<&R>) -> bool {
        repo.and_then(RepositoryIdProvider::generate_id)
            .is_some_and(|id| self.contains(id.as_str()))
    }

    /// Records `id` as the most recently used repository.
    ///
    /// If `id` is already present it is moved to the most recent position. If the
    /// list is full the least recently used entry is evicted. Surrounding whitespace
    /// is stripped. Blank identifiers and identifiers containing the persistence
    /// delimiter are ignored.
    pub fn add(&mut self, id: &str) -> &mut Self {
        let id = id.trim();
        if id.is_empty() {
            tracing::debug!("ignoring blank repository id");
            return self;
        }
        if id.contains(DELIMITER) {
            tracing::warn!(id = %id, "ignoring repository id containing delimiter");
            return self;
        }

        if let Some(position) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(position);
        }
        self.ids.push_back(id.to_string());

        while self.ids.len() > self.capacity {
            if let Some(evicted) = self.ids.pop_front() {
                tracing::debug!(evicted = %evicted, "evicted least recently used repository");
            }
        }

        self
    }

    /// Records the repository referenced by `repo`, if it yields an identifier.
    pub fn add_repository<R: RepositoryIdProvider + ?Sized>(&mut self, repo: &R) -> &mut Self {
        match repo.generate_id() {
            Some(id) => self.add(&id),
            None => self,
        }
    }

    /// Writes the list to `store` and commits, overwriting any previous value.
    ///
    /// Blocks until the store has committed. Calling it repeatedly without changes
    /// writes the same value each time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write or the commit fails.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let _span = tracing::debug_span!("recent_save", key = %self.key, count = self.ids.len()).entered();

        store.put(&self.key, &self.to_value())?;
        store.commit()?;

        tracing::debug!("recent repositories saved");
        Ok(())
    }

    /// Iterates over identifiers, most recently used first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().rev().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store key this list is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    fn to_value(&self) -> String {
        self.ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }
}

/// Parses a persisted value, oldest first.
///
/// Empty segments are skipped, duplicates keep their latest position, and only the
/// `capacity` most recent entries survive.
fn parse_value(value: &str, capacity: usize) -> VecDeque<String> {
    let mut ids: VecDeque<String> = VecDeque::new();
    let mut discarded = 0usize;

    for segment in value.split(DELIMITER).map(str::trim) {
        if segment.is_empty() {
            discarded += 1;
            continue;
        }
        if let Some(position) = ids.iter().position(|existing| existing == segment) {
            ids.remove(position);
            discarded += 1;
        }
        ids.push_back(segment.to_string());
    }

    while ids.len() > capacity {
        ids.pop_front();
        discarded += 1;
    }

    if discarded > 0 {
        tracing::debug!(discarded, "normalized persisted recent repositories");
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecentsError, Repository, RepositoryId};
    use crate::storage::MemoryStore;

    fn org() -> ScopeOwner {
        ScopeOwner::organization(20, "octo-org")
    }

    /// Store whose reads always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(RecentsError::Storage("disk on fire".to_string()))
        }

        fn put(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(RecentsError::Storage("disk on fire".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }

        fn commit(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bad_input_is_never_contained() {
        let recent = RecentRepositories::load(&org(), &MemoryStore::default());
        assert!(!recent.contains(None::<&str>));
        assert!(!recent.contains(""));
        assert!(!recent.contains_repository(None::<&Repository>));
        assert!(!recent.contains_repository(Some(&RepositoryId::new("", "repo"))));
    }

    #[test]
    fn blank_and_delimited_ids_are_ignored() {
        let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());
        recent.add("").add("   ").add("a/b,c/d");
        assert!(recent.is_empty());
    }

    #[test]
    fn oldest_entry_is_evicted_when_full() {
        let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());

        for i in 0..MAX_SIZE {
            let id = format!("owner/repo{i}");
            recent.add(&id);
            assert!(recent.contains(id.as_str()));
        }

        recent.add("owner/repoLast");
        assert!(recent.contains("owner/repoLast"));
        assert!(!recent.contains("owner/repo0"));
        for i in 1..MAX_SIZE {
            assert!(recent.contains(format!("owner/repo{i}").as_str()));
        }
        assert_eq!(recent.len(), MAX_SIZE);
    }

    #[test]
    fn readding_promotes_instead_of_duplicating() {
        let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());
        recent.add("o/a").add("o/b").add("o/a");

        assert_eq!(recent.len(), 2);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["o/a", "o/b"]);
    }

    #[test]
    fn promoted_entry_survives_next_eviction() {
        // Under plain insertion-order eviction "owner/repo0" would be dropped here.
        let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());
        for i in 0..MAX_SIZE {
            recent.add(&format!("owner/repo{i}"));
        }

        recent.add("owner/repo0");
        recent.add("owner/repoLast");

        assert!(recent.contains("owner/repo0"));
        assert!(!recent.contains("owner/repo1"));
        assert!(recent.contains("owner/repoLast"));
    }

    #[test]
    fn add_repository_uses_canonical_id() {
        let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());
        let repo = Repository::new(3, org(), "tools");
        recent.add_repository(&repo);

        assert!(recent.contains("octo-org/tools"));
        assert!(recent.contains_repository(Some(&repo)));
        assert!(recent.contains_repository(Some(&RepositoryId::new("octo-org", "tools"))));
    }

    #[test]
    fn save_writes_most_recent_last_under_owner_key() {
        let mut store = MemoryStore::default();
        let mut recent = RecentRepositories::load(&org(), &store);
        recent.add("o/a").add("o/b");
        recent.save(&mut store).unwrap();

        assert_eq!(recent.key(), "recent_repos_20");
        assert_eq!(store.get("recent_repos_20").unwrap().as_deref(), Some("o/a,o/b"));
        assert_eq!(store.commit_count(), 1);
    }

    #[test]
    fn repeated_save_is_idempotent() {
        let mut store = MemoryStore::default();
        let mut recent = RecentRepositories::load(&org(), &store);
        recent.add("o/a");

        recent.save(&mut store).unwrap();
        let first = store.get("recent_repos_20").unwrap();
        recent.save(&mut store).unwrap();
        let second = store.get("recent_repos_20").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn padded_id_survives_save_and_reload() {
        let mut store = MemoryStore::default();
        let mut recent = RecentRepositories::load(&org(), &store);
        recent.add("owner/repo ");
        assert!(recent.contains("owner/repo"));
        recent.save(&mut store).unwrap();

        let reloaded = RecentRepositories::load(&org(), &store);
        assert!(reloaded.contains("owner/repo "));
        assert!(reloaded.contains("owner/repo"));
        assert_eq!(reloaded, recent);
    }

    #[test]
    fn padded_readd_promotes_existing_entry() {
        let mut recent = RecentRepositories::load(&org(), &MemoryStore::default());
        recent.add("o/a").add("o/b").add("  o/a");
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["o/a", "o/b"]);
    }

    #[test]
    fn load_tolerates_malformed_values() {
        let mut store = MemoryStore::default();
        store.put("recent_repos_20", ",o/a,,o/b, o/a ,").unwrap();

        let recent = RecentRepositories::load(&org(), &store);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["o/a", "o/b"]);
    }

    #[test]
    fn load_truncates_to_capacity_keeping_most_recent() {
        let mut store = MemoryStore::default();
        store.put("recent_repos_20", "o/1,o/2,o/3,o/4").unwrap();

        let recent = RecentRepositories::load_with_capacity(&org(), &store, 2);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["o/4", "o/3"]);
    }

    #[test]
    fn unreadable_store_degrades_to_empty() {
        let mut recent = RecentRepositories::load(&org(), &BrokenStore);
        assert!(recent.is_empty());

        recent.add("o/a");
        assert!(recent.contains("o/a"));
        assert!(recent.save(&mut BrokenStore).is_err());
    }

    #[test]
    fn owners_do_not_share_lists() {
        let mut store = MemoryStore::default();
        let mut mine = RecentRepositories::load(&ScopeOwner::user(1, "me"), &store);
        mine.add("me/dotfiles");
        mine.save(&mut store).unwrap();

        let theirs = RecentRepositories::load(&org(), &store);
        assert!(!theirs.contains("me/dotfiles"));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut recent = RecentRepositories::load_with_capacity(&org(), &MemoryStore::default(), 0);
        recent.add("o/a").add("o/b");
        assert_eq!(recent.capacity(), 1);
        assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["o/b"]);
    }
}
