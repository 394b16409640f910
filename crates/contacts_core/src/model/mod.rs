//! Contact domain model.
//!
//! # Invariants
//! - Every contact carries a stable `ContactId`; lookups never use position
//!   or value equality.
//! - The phone field is stored as one formatted `"<category>: <number>"` string.

pub mod contact;
pub mod contact_list;
