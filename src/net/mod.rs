//! Networking: transport factory, REST wrappers, and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` builds the configured `reqwest` client, `api` maps each logical
//! operation onto one request, `types` defines the JSON schema and `error`
//! the failure modes callers see.

pub mod api;
pub mod error;
pub mod http;
pub mod types;
