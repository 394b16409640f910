//! Core use-case services.
//!
//! Keeps FFI and other stateless callers away from storage details.

pub mod contact_service;
