//! Background synchronization of per-owner repository data.
//!
//! - `campaign`: [`SyncCampaign`], a cancellable pass over an account's owners

pub mod campaign;

pub use campaign::{CancelHandle, SyncCampaign, SyncResult, SyncSource};
