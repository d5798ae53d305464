//! Well-known permission scope names.
//!
//! These must match the permissions configured for the API in the identity
//! provider; tokens carry them in their `permissions` claim.

pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";
