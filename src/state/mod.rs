//! Client-side state shared between the router and the auth actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the current user and the load latch; `auth` keeps it in
//! step with login, logout and register calls.

pub mod auth;
pub mod session;
