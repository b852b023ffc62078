//! The [`ShopStore`] trait defining the storage contract for the shop tables.
//!
//! Each write method is one unit of work: it runs in its own transaction and
//! is committed (durably visible to later reads) before it returns, or rolled
//! back if it fails. All backends implement this trait with identical
//! semantics, so they are swappable without changing the scenario code.

use shop_core::{Order, OrderId, OrderLineItem, Product, ProductId, Purchase, User, UserId};

use crate::error::StorageError;
use crate::types::StoreStats;

/// The storage contract for users, products, orders and line items.
///
/// The trait is synchronous; the store is used by a single thread for the
/// lifetime of a run.
pub trait ShopStore {
    // -------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------

    /// Inserts a user and returns its newly assigned id.
    ///
    /// Fails with [`StorageError::UniqueViolation`] if `email` is taken.
    fn insert_user(&mut self, name: &str, email: &str) -> Result<UserId, StorageError>;

    /// Retrieves a user by id.
    fn get_user(&self, id: UserId) -> Result<User, StorageError>;

    /// Lists all users in id order.
    fn list_users(&self) -> Result<Vec<User>, StorageError>;

    /// Deletes a user. Orders owned by the user are kept and lose their
    /// owner (`user_id` becomes `None`).
    fn delete_user(&mut self, id: UserId) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------

    /// Inserts a product and returns its newly assigned id.
    fn insert_product(&mut self, name: &str, price: i64) -> Result<ProductId, StorageError>;

    /// Retrieves a product by id.
    fn get_product(&self, id: ProductId) -> Result<Product, StorageError>;

    /// Lists all products in id order.
    fn list_products(&self) -> Result<Vec<Product>, StorageError>;

    /// Writes back the name and price of an existing product.
    fn update_product(&mut self, product: &Product) -> Result<(), StorageError>;

    /// Deletes a product.
    ///
    /// Fails with [`StorageError::ForeignKeyViolation`] while any line item
    /// references it.
    fn delete_product(&mut self, id: ProductId) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------

    /// Inserts an order, optionally owned by `user`.
    ///
    /// Fails with [`StorageError::ForeignKeyViolation`] for an unknown user.
    fn insert_order(&mut self, user: Option<UserId>) -> Result<OrderId, StorageError>;

    /// Retrieves an order by id.
    fn get_order(&self, id: OrderId) -> Result<Order, StorageError>;

    /// Lists all orders in id order.
    fn list_orders(&self) -> Result<Vec<Order>, StorageError>;

    /// Deletes an order together with all of its line items.
    fn delete_order(&mut self, id: OrderId) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Line items
    // -------------------------------------------------------------------

    /// Inserts a line item.
    ///
    /// Fails with [`StorageError::UniqueViolation`] if the order already has a
    /// line for the product, and with [`StorageError::ForeignKeyViolation`] if
    /// the order or product does not exist.
    fn insert_line_item(&mut self, item: &OrderLineItem) -> Result<(), StorageError>;

    /// Retrieves the line item for an order/product pair.
    fn get_line_item(
        &self,
        order: OrderId,
        product: ProductId,
    ) -> Result<OrderLineItem, StorageError>;

    /// Lists all line items in insertion order.
    fn list_line_items(&self) -> Result<Vec<OrderLineItem>, StorageError>;

    /// Finds all line items belonging to an order, in insertion order.
    fn find_line_items_by_order(
        &self,
        order: OrderId,
    ) -> Result<Vec<OrderLineItem>, StorageError>;

    // -------------------------------------------------------------------
    // Query methods
    // -------------------------------------------------------------------

    /// Joins every line item with its order's owner and its product, in line
    /// item insertion order.
    fn list_purchases(&self) -> Result<Vec<Purchase>, StorageError>;

    /// Counts the rows of each table.
    fn stats(&self) -> Result<StoreStats, StorageError>;
}
