//! Flutter-facing bindings for the contact list core.

pub mod api;
