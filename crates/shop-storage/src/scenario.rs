//! The scripted run: seed the fixed dataset, render the three reports, then
//! apply the two mutations.
//!
//! All functions are generic over [`ShopStore`], so the same script runs
//! against [`SqliteStore`](crate::SqliteStore) in the binary and against
//! either backend in tests. Any failure is returned to the caller untouched;
//! nothing here retries or recovers.

use shop_core::seed::{LINE_ITEMS, ORDERS, PRODUCTS, USERS};
use shop_core::{report, OrderId, OrderLineItem, ProductId, UserId};

use crate::error::StorageError;
use crate::traits::ShopStore;

/// The product repriced by [`apply_mutations`].
pub const REPRICED_PRODUCT: ProductId = ProductId(2);

/// The new price of [`REPRICED_PRODUCT`].
pub const NEW_PRICE: i64 = 750;

/// The user removed by [`apply_mutations`].
pub const REMOVED_USER: UserId = UserId(1);

/// Ids assigned by the store while seeding, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededIds {
    pub users: Vec<UserId>,
    pub products: Vec<ProductId>,
    pub orders: Vec<OrderId>,
}

/// Loads the fixed dataset.
///
/// Groups are inserted in dependency order (users, products, orders, line
/// items). Each insert commits before the next one runs, so every id a
/// later group refers to is already durable.
pub fn seed<S: ShopStore + ?Sized>(store: &mut S) -> Result<SeededIds, StorageError> {
    let users = USERS
        .iter()
        .map(|u| store.insert_user(u.name, u.email))
        .collect::<Result<Vec<_>, _>>()?;

    let products = PRODUCTS
        .iter()
        .map(|p| store.insert_product(p.name, p.price))
        .collect::<Result<Vec<_>, _>>()?;

    let orders = ORDERS
        .iter()
        .map(|o| store.insert_order(Some(users[o.user])))
        .collect::<Result<Vec<_>, _>>()?;

    for item in &LINE_ITEMS {
        store.insert_line_item(&OrderLineItem::new(
            orders[item.order],
            products[item.product],
            item.quantity,
        ))?;
    }

    tracing::info!(
        users = users.len(),
        products = products.len(),
        orders = orders.len(),
        line_items = LINE_ITEMS.len(),
        "seeded shop dataset"
    );

    Ok(SeededIds {
        users,
        products,
        orders,
    })
}

/// Renders the user, product and purchase reports, one line per record.
pub fn report_lines<S: ShopStore + ?Sized>(store: &S) -> Result<Vec<String>, StorageError> {
    let mut lines = Vec::new();
    lines.extend(store.list_users()?.iter().map(report::user_line));
    lines.extend(store.list_products()?.iter().map(report::product_line));
    lines.extend(store.list_purchases()?.iter().map(report::purchase_line));
    Ok(lines)
}

/// Reprices [`REPRICED_PRODUCT`] and removes [`REMOVED_USER`].
///
/// The removed user's orders survive without an owner.
pub fn apply_mutations<S: ShopStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    let mut product = store.get_product(REPRICED_PRODUCT)?;
    product.price = NEW_PRICE;
    store.update_product(&product)?;
    tracing::info!(product = %product.id, price = product.price, "repriced product");

    store.delete_user(REMOVED_USER)?;
    tracing::info!(user = %REMOVED_USER, "removed user");
    Ok(())
}
