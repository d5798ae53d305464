//! Request middleware.
//!
//! - [`auth::protected`] -- wraps a route in the bearer-token permission guard.

pub mod auth;
