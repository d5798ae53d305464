//! Success envelopes for drink handlers.
//!
//! Every successful response carries `"success": true` next to its payload,
//! mirroring the `"success": false` error envelope in [`crate::error`].

use coffeeshop_core::types::DbId;
use serde::Serialize;

/// `{ "success": true, "drinks": [...] }`
#[derive(Debug, Serialize)]
pub struct DrinksResponse<T: Serialize> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T: Serialize> DrinksResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// `{ "success": true, "delete": <id> }`
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: DbId,
}

impl DeleteResponse {
    pub fn new(id: DbId) -> Self {
        Self {
            success: true,
            delete: id,
        }
    }
}
