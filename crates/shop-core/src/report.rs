//! Line rendering for the three shop reports.
//!
//! Each function renders exactly one record as one line of text, without a
//! trailing newline. The purchase report takes a [`Purchase`], the flattened
//! result of the line item → order → user and line item → product joins.

use serde::{Deserialize, Serialize};

use crate::entity::{Product, User};
use crate::id::{OrderId, ProductId};

/// One line item joined with its order's owner and its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Name of the order's owner, or `None` when the order has no user.
    pub buyer: Option<String>,
    pub quantity: u32,
    pub product_name: String,
}

/// `NAME: {name} EMAIL: {email}`
pub fn user_line(user: &User) -> String {
    format!("NAME: {} EMAIL: {}", user.name, user.email)
}

/// `{name}: ${price}`
pub fn product_line(product: &Product) -> String {
    format!("{}: ${}", product.name, product.price)
}

/// `User {buyer} purchased {quantity} of product {product}`.
///
/// An order without an owner renders as `Unknown user purchased ...`.
pub fn purchase_line(purchase: &Purchase) -> String {
    match &purchase.buyer {
        Some(buyer) => format!(
            "User {} purchased {} of product {}",
            buyer, purchase.quantity, purchase.product_name
        ),
        None => format!(
            "Unknown user purchased {} of product {}",
            purchase.quantity, purchase.product_name
        ),
    }
}
