//! The fixed dataset loaded into a fresh store.
//!
//! Cross-references are positions into the preceding groups rather than
//! ids: ids are assigned by the store, and the loader resolves each
//! position to the id the store returned for it.

/// A user to insert: `(name, email)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedUser {
    pub name: &'static str,
    pub email: &'static str,
}

/// A product to insert: `(name, price)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedProduct {
    pub name: &'static str,
    pub price: i64,
}

/// An order owned by the user at position `user` in [`USERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOrder {
    pub user: usize,
}

/// A line item for the order at position `order` in [`ORDERS`] and the
/// product at position `product` in [`PRODUCTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedLineItem {
    pub order: usize,
    pub product: usize,
    pub quantity: u32,
}

pub const USERS: [SeedUser; 2] = [
    SeedUser {
        name: "Richard",
        email: "richardsemail@email.com",
    },
    SeedUser {
        name: "Regina",
        email: "meangirls@email.com",
    },
];

pub const PRODUCTS: [SeedProduct; 3] = [
    SeedProduct {
        name: "Laptop",
        price: 1200,
    },
    SeedProduct {
        name: "Smartphone",
        price: 800,
    },
    SeedProduct {
        name: "Tablet",
        price: 600,
    },
];

pub const ORDERS: [SeedOrder; 4] = [
    SeedOrder { user: 0 },
    SeedOrder { user: 1 },
    SeedOrder { user: 0 },
    SeedOrder { user: 1 },
];

pub const LINE_ITEMS: [SeedLineItem; 4] = [
    SeedLineItem {
        order: 0,
        product: 0,
        quantity: 1,
    },
    SeedLineItem {
        order: 1,
        product: 1,
        quantity: 3,
    },
    SeedLineItem {
        order: 2,
        product: 2,
        quantity: 4,
    },
    SeedLineItem {
        order: 3,
        product: 0,
        quantity: 2,
    },
];
