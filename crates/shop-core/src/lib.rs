pub mod entity;
pub mod id;
pub mod report;
pub mod seed;

// Re-export commonly used types
pub use entity::{Order, OrderLineItem, Product, User};
pub use id::{OrderId, ProductId, UserId};
pub use report::Purchase;
