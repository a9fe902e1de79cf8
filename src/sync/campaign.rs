//! Cancellable sync campaign over an account's users and organizations.
//!
//! A campaign asks its [`SyncSource`] for every owner the account can see, then
//! refreshes each owner's repositories in turn. Cancellation is cooperative: the
//! flag is checked before each owner, so an owner already being synced finishes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::error::Result;
use crate::domain::ScopeOwner;

/// Data source a campaign synchronizes from.
pub trait SyncSource {
    /// Lists the account and every organization it belongs to.
    ///
    /// # Errors
    ///
    /// A failure here aborts the campaign.
    fn users_and_orgs(&mut self) -> Result<Vec<ScopeOwner>>;

    /// Refreshes the stored repositories of `owner`, returning how many were stored.
    ///
    /// # Errors
    ///
    /// A failure is counted and the campaign moves on to the next owner.
    fn sync_repositories(&mut self, owner: &ScopeOwner) -> Result<usize>;
}

/// Thread-safe handle that cancels the campaign it was taken from.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        tracing::debug!("sync campaign cancelled");
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Outcome of a campaign run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Owners whose repositories were refreshed.
    pub num_updates: u64,
    /// Owners whose refresh failed.
    pub num_errors: u64,
    /// Repositories stored across all owners.
    pub num_repositories: u64,
    /// Whether the run stopped early because of cancellation.
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A single, cancellable synchronization pass for one account.
///
/// # Examples
///
/// ```
/// use hubrecents::sync::{SyncCampaign, SyncSource};
/// use hubrecents::{Result, ScopeOwner};
///
/// struct Fixed(Vec<ScopeOwner>);
///
/// impl SyncSource for Fixed {
///     fn users_and_orgs(&mut self) -> Result<Vec<ScopeOwner>> {
///         Ok(self.0.clone())
///     }
///
///     fn sync_repositories(&mut self, _owner: &ScopeOwner) -> Result<usize> {
///         Ok(3)
///     }
/// }
///
/// let mut source = Fixed(vec![ScopeOwner::user(1, "me"), ScopeOwner::organization(2, "org")]);
/// let result = SyncCampaign::new().run(&mut source)?;
/// assert_eq!(result.num_updates, 2);
/// assert_eq!(result.num_repositories, 6);
/// # Ok::<(), hubrecents::RecentsError>(())
/// ```
#[derive(Debug, Default)]
pub struct SyncCampaign {
    cancel: CancelHandle,
}

impl SyncCampaign {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that can cancel this campaign from another thread.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Runs the campaign to completion or until cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error only if `source` cannot list the owners to sync.
    pub fn run<S: SyncSource + ?Sized>(&self, source: &mut S) -> Result<SyncResult> {
        let _span = tracing::info_span!("sync_campaign").entered();
        let started_at = Utc::now();

        let owners = source.users_and_orgs()?;
        tracing::debug!(count = owners.len(), "found users and orgs for sync");

        let mut result = SyncResult {
            num_updates: 0,
            num_errors: 0,
            num_repositories: 0,
            cancelled: false,
            started_at,
            finished_at: started_at,
        };

        for owner in &owners {
            if self.cancel.is_cancelled() {
                result.cancelled = true;
                break;
            }

            tracing::debug!(owner = %owner.login, "syncing repositories");
            match source.sync_repositories(owner) {
                Ok(count) => {
                    result.num_updates += 1;
                    result.num_repositories += count as u64;
                }
                Err(e) => {
                    tracing::warn!(owner = %owner.login, error = %e, "failed to sync repositories");
                    result.num_errors += 1;
                }
            }
        }

        result.finished_at = Utc::now();
        tracing::info!(
            updates = result.num_updates,
            errors = result.num_errors,
            cancelled = result.cancelled,
            "finished sync campaign"
        );

        Ok(result)
    }
}
