//! Storage layer for per-owner persisted state.
//!
//! Values are plain strings stored under derived keys, so any backend that can
//! hold a string map works.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction
//! - `json`: JSON file store with atomic commits
//! - `memory`: in-memory store for tests and ephemeral sessions

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
