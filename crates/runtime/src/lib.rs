//! Runtime collaborators around the forge-core engine.
//!
//! This crate hosts the pieces the pure core deliberately excludes: the
//! character repository boundary and the [`Workshop`] service that owns
//! in-memory characters, drives build sessions, and hands snapshots to
//! storage fire-and-forget.
//!
//! # Known limitation
//!
//! There is no optimistic-concurrency check against the store; the last
//! writer wins. This is acceptable because a character is single-owner;
//! concurrent multi-device editing is explicitly unsupported.

pub mod error;
pub mod repository;
pub mod workshop;

pub use error::{Result, RuntimeError};
pub use repository::{CharacterRepository, MemoryCharacterRepository, StorageError};
pub use workshop::Workshop;
