//! Shared building blocks for the catalog workspace: logging setup,
//! the configuration secret cipher and small wire types.

pub mod types;
pub mod crypto;
pub mod utils;
