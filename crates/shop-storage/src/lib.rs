//! Relational storage for the shop dataset.
//!
//! Provides the [`ShopStore`] trait defining the storage contract, plus the
//! [`SqliteStore`] and [`InMemoryStore`] backends with identical semantics:
//! the same id assignment, the same constraint checks and the same
//! constraint messages.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: StoreStats storage-layer types
//! - [`traits`]: ShopStore trait definition
//! - [`schema`]: migration setup and database open/recreate
//! - [`sqlite`]: SqliteStore implementation
//! - [`memory`]: InMemoryStore implementation
//! - [`scenario`]: the scripted run (seed, reports, mutations)

pub mod error;
pub mod memory;
pub mod scenario;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::ShopStore;
pub use types::StoreStats;
