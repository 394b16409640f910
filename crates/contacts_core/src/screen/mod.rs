//! Headless contact list screen.
//!
//! # Responsibility
//! - Hold all ephemeral UI state in one explicit record.
//! - Change that record only through reducer transitions.
//! - Run persistence effects emitted by the reducer against a contact store.
//!
//! # Invariants
//! - The reducer never performs I/O; it returns an [`state::Effect`] instead.
//! - Persisted lists are always the post-mutation in-memory list.

pub mod controller;
pub mod state;
