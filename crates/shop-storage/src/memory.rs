//! In-memory implementation of [`ShopStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed. It enforces the same constraints as the SQLite
//! schema and reports violations with the same messages SQLite produces.
//! Ids follow SQLite's rowid rule: one past the current maximum, or 1 for an
//! empty table.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use shop_core::{Order, OrderId, OrderLineItem, Product, ProductId, Purchase, User, UserId};

use crate::error::StorageError;
use crate::traits::ShopStore;
use crate::types::StoreStats;

const EMAIL_TAKEN: &str = "UNIQUE constraint failed: Users.email";
const LINE_ITEM_TAKEN: &str =
    "UNIQUE constraint failed: order_product.order_id, order_product.product_id";
const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

/// In-memory implementation of [`ShopStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    users: BTreeMap<UserId, User>,
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    /// Quantity by `(order, product)`, in insertion order.
    line_items: IndexMap<(OrderId, ProductId), u32>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id<K: Copy + Ord, V>(table: &BTreeMap<K, V>, inner: impl Fn(K) -> i64) -> i64 {
        table
            .last_key_value()
            .map_or(1, |(key, _)| inner(*key) + 1)
    }

    fn foreign_key_violation() -> StorageError {
        StorageError::ForeignKeyViolation(FOREIGN_KEY_FAILED.to_string())
    }
}

impl ShopStore for InMemoryStore {
    // -------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------

    fn insert_user(&mut self, name: &str, email: &str) -> Result<UserId, StorageError> {
        if self.users.values().any(|u| u.email == email) {
            return Err(StorageError::UniqueViolation(EMAIL_TAKEN.to_string()));
        }
        let id = UserId(Self::next_id(&self.users, |k| k.0));
        self.users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
            },
        );
        Ok(id)
    }

    fn get_user(&self, id: UserId) -> Result<User, StorageError> {
        self.users
            .get(&id)
            .cloned()
            .ok_or(StorageError::UserNotFound(id.0))
    }

    fn list_users(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.users.values().cloned().collect())
    }

    fn delete_user(&mut self, id: UserId) -> Result<(), StorageError> {
        if self.users.remove(&id).is_none() {
            return Err(StorageError::UserNotFound(id.0));
        }
        for order in self.orders.values_mut() {
            if order.user_id == Some(id) {
                order.user_id = None;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------

    fn insert_product(&mut self, name: &str, price: i64) -> Result<ProductId, StorageError> {
        let id = ProductId(Self::next_id(&self.products, |k| k.0));
        self.products.insert(
            id,
            Product {
                id,
                name: name.to_string(),
                price,
            },
        );
        Ok(id)
    }

    fn get_product(&self, id: ProductId) -> Result<Product, StorageError> {
        self.products
            .get(&id)
            .cloned()
            .ok_or(StorageError::ProductNotFound(id.0))
    }

    fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.products.values().cloned().collect())
    }

    fn update_product(&mut self, product: &Product) -> Result<(), StorageError> {
        match self.products.get_mut(&product.id) {
            Some(stored) => {
                stored.name = product.name.clone();
                stored.price = product.price;
                Ok(())
            }
            None => Err(StorageError::ProductNotFound(product.id.0)),
        }
    }

    fn delete_product(&mut self, id: ProductId) -> Result<(), StorageError> {
        if !self.products.contains_key(&id) {
            return Err(StorageError::ProductNotFound(id.0));
        }
        if self.line_items.keys().any(|(_, product)| *product == id) {
            return Err(Self::foreign_key_violation());
        }
        self.products.remove(&id);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------

    fn insert_order(&mut self, user: Option<UserId>) -> Result<OrderId, StorageError> {
        if let Some(user) = user {
            if !self.users.contains_key(&user) {
                return Err(Self::foreign_key_violation());
            }
        }
        let id = OrderId(Self::next_id(&self.orders, |k| k.0));
        self.orders.insert(id, Order { id, user_id: user });
        Ok(id)
    }

    fn get_order(&self, id: OrderId) -> Result<Order, StorageError> {
        self.orders
            .get(&id)
            .cloned()
            .ok_or(StorageError::OrderNotFound(id.0))
    }

    fn list_orders(&self) -> Result<Vec<Order>, StorageError> {
        Ok(self.orders.values().cloned().collect())
    }

    fn delete_order(&mut self, id: OrderId) -> Result<(), StorageError> {
        if self.orders.remove(&id).is_none() {
            return Err(StorageError::OrderNotFound(id.0));
        }
        self.line_items.retain(|(order, _), _| *order != id);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Line items
    // -------------------------------------------------------------------

    fn insert_line_item(&mut self, item: &OrderLineItem) -> Result<(), StorageError> {
        // Key uniqueness is checked before references, as in SQLite.
        if self.line_items.contains_key(&item.key()) {
            return Err(StorageError::UniqueViolation(LINE_ITEM_TAKEN.to_string()));
        }
        if !self.orders.contains_key(&item.order_id)
            || !self.products.contains_key(&item.product_id)
        {
            return Err(Self::foreign_key_violation());
        }
        self.line_items.insert(item.key(), item.quantity);
        Ok(())
    }

    fn get_line_item(
        &self,
        order: OrderId,
        product: ProductId,
    ) -> Result<OrderLineItem, StorageError> {
        self.line_items
            .get(&(order, product))
            .map(|quantity| OrderLineItem::new(order, product, *quantity))
            .ok_or(StorageError::LineItemNotFound {
                order: order.0,
                product: product.0,
            })
    }

    fn list_line_items(&self) -> Result<Vec<OrderLineItem>, StorageError> {
        Ok(self
            .line_items
            .iter()
            .map(|((order, product), quantity)| OrderLineItem::new(*order, *product, *quantity))
            .collect())
    }

    fn find_line_items_by_order(
        &self,
        order: OrderId,
    ) -> Result<Vec<OrderLineItem>, StorageError> {
        Ok(self
            .line_items
            .iter()
            .filter(|((o, _), _)| *o == order)
            .map(|((o, product), quantity)| OrderLineItem::new(*o, *product, *quantity))
            .collect())
    }

    // -------------------------------------------------------------------
    // Query methods
    // -------------------------------------------------------------------

    fn list_purchases(&self) -> Result<Vec<Purchase>, StorageError> {
        let mut result = Vec::with_capacity(self.line_items.len());
        for ((order_id, product_id), quantity) in &self.line_items {
            let order = self.get_order(*order_id)?;
            let product = self.get_product(*product_id)?;
            let buyer = order
                .user_id
                .and_then(|user| self.users.get(&user))
                .map(|user| user.name.clone());
            result.push(Purchase {
                order_id: *order_id,
                product_id: *product_id,
                buyer,
                quantity: *quantity,
                product_name: product.name,
            });
        }
        Ok(result)
    }

    fn stats(&self) -> Result<StoreStats, StorageError> {
        Ok(StoreStats {
            users: self.users.len() as u64,
            products: self.products.len() as u64,
            orders: self.orders.len() as u64,
            line_items: self.line_items.len() as u64,
        })
    }
}
