//! Storage-layer types.

use serde::{Deserialize, Serialize};

/// Row counts for the four shop tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    pub line_items: u64,
}
