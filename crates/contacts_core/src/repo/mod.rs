//! Repository layer: key-value storage and the contact store built on it.
//!
//! # Responsibility
//! - Define the single-slot key-value contract the contact list persists to.
//! - Isolate SQLite details from service and screen orchestration.
//!
//! # Invariants
//! - The contact list is always read and written as one whole blob.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidData`) next
//!   to storage transport errors.

pub mod contact_repo;
pub mod kv_repo;
