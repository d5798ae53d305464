pub mod error;
pub mod permissions;
pub mod recipe;
pub mod types;
