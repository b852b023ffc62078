//! Record types for the four shop tables.
//!
//! Relationships are carried as id fields rather than object references:
//! an [`Order`] knows its owner only through `user_id`, and an
//! [`OrderLineItem`] names its order and product by id. Traversals are done
//! by the storage layer with explicit joins.

use serde::{Deserialize, Serialize};

use crate::id::{OrderId, ProductId, UserId};

/// A row of `Users`. `email` is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A row of `Products`. `price` is a plain integer amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
}

/// A row of `Orders`.
///
/// `user_id` is a nullable foreign key: an order outlives the deletion of
/// its owner and is left with `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
}

/// A row of `order_product`, the association between orders and products.
///
/// Identity is the `(order_id, product_id)` pair. Deleting the order
/// removes the line item; deleting the product is refused while the line
/// item exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLineItem {
    pub fn new(order_id: OrderId, product_id: ProductId, quantity: u32) -> Self {
        OrderLineItem {
            order_id,
            product_id,
            quantity,
        }
    }

    /// The composite primary key of this line item.
    pub fn key(&self) -> (OrderId, ProductId) {
        (self.order_id, self.product_id)
    }
}
