//! Behavioural contract shared by every `ShopStore` backend.
//!
//! Each check is written once against `&mut dyn ShopStore` and run for both
//! `SqliteStore` (in-memory database) and `InMemoryStore`, so the two
//! backends cannot drift apart.

use shop_core::{Order, OrderId, OrderLineItem, Product, ProductId, User, UserId};
use shop_storage::scenario;
use shop_storage::{InMemoryStore, ShopStore, SqliteStore, StorageError, StoreStats};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn backends() -> Vec<(&'static str, Box<dyn ShopStore>)> {
    vec![
        ("sqlite", Box::new(SqliteStore::in_memory().unwrap())),
        ("memory", Box::new(InMemoryStore::new())),
    ]
}

/// Runs `check` against a freshly seeded instance of every backend.
fn for_each_seeded(check: impl Fn(&str, &mut dyn ShopStore)) {
    for (name, mut store) in backends() {
        scenario::seed(store.as_mut()).unwrap();
        check(name, store.as_mut());
    }
}

fn user(id: i64, name: &str, email: &str) -> User {
    User {
        id: UserId(id),
        name: name.into(),
        email: email.into(),
    }
}

fn product(id: i64, name: &str, price: i64) -> Product {
    Product {
        id: ProductId(id),
        name: name.into(),
        price,
    }
}

fn order(id: i64, user_id: Option<i64>) -> Order {
    Order {
        id: OrderId(id),
        user_id: user_id.map(UserId),
    }
}

fn item(order: i64, product: i64, quantity: u32) -> OrderLineItem {
    OrderLineItem::new(OrderId(order), ProductId(product), quantity)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[test]
fn seed_loads_literal_rows_with_ids_from_one() {
    for_each_seeded(|name, store| {
        assert_eq!(
            store.stats().unwrap(),
            StoreStats {
                users: 2,
                products: 3,
                orders: 4,
                line_items: 4,
            },
            "{name}"
        );
        assert_eq!(
            store.list_users().unwrap(),
            vec![
                user(1, "Richard", "richardsemail@email.com"),
                user(2, "Regina", "meangirls@email.com"),
            ],
            "{name}"
        );
        assert_eq!(
            store.list_products().unwrap(),
            vec![
                product(1, "Laptop", 1200),
                product(2, "Smartphone", 800),
                product(3, "Tablet", 600),
            ],
            "{name}"
        );
        assert_eq!(
            store.list_orders().unwrap(),
            vec![
                order(1, Some(1)),
                order(2, Some(2)),
                order(3, Some(1)),
                order(4, Some(2)),
            ],
            "{name}"
        );
        assert_eq!(
            store.list_line_items().unwrap(),
            vec![item(1, 1, 1), item(2, 2, 3), item(3, 3, 4), item(4, 1, 2)],
            "{name}"
        );
    });
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[test]
fn duplicate_email_is_rejected_and_users_unchanged() {
    for_each_seeded(|name, store| {
        let before = store.list_users().unwrap();
        let err = store
            .insert_user("Impostor", "meangirls@email.com")
            .unwrap_err();
        match err {
            StorageError::UniqueViolation(msg) => {
                assert_eq!(msg, "UNIQUE constraint failed: Users.email", "{name}")
            }
            other => panic!("{name}: expected unique violation, got {other:?}"),
        }
        assert_eq!(store.list_users().unwrap(), before, "{name}");
    });
}

#[test]
fn duplicate_line_item_pair_is_rejected() {
    for_each_seeded(|name, store| {
        let err = store.insert_line_item(&item(1, 1, 9)).unwrap_err();
        assert!(
            matches!(err, StorageError::UniqueViolation(_)),
            "{name}: {err:?}"
        );
        assert_eq!(store.get_line_item(OrderId(1), ProductId(1)).unwrap().quantity, 1);
    });
}

#[test]
fn line_item_with_unknown_order_or_product_is_rejected() {
    for_each_seeded(|name, store| {
        for bad in [item(99, 1, 1), item(1, 99, 1)] {
            let err = store.insert_line_item(&bad).unwrap_err();
            assert!(
                matches!(err, StorageError::ForeignKeyViolation(_)),
                "{name}: {bad:?} gave {err:?}"
            );
        }
        assert_eq!(store.stats().unwrap().line_items, 4, "{name}");
    });
}

#[test]
fn order_for_unknown_user_is_rejected() {
    for_each_seeded(|name, store| {
        let err = store.insert_order(Some(UserId(42))).unwrap_err();
        assert!(
            matches!(err, StorageError::ForeignKeyViolation(_)),
            "{name}: {err:?}"
        );
        // An ownerless order is always allowed.
        assert_eq!(store.insert_order(None).unwrap(), OrderId(5), "{name}");
    });
}

#[test]
fn deleting_referenced_product_is_rejected() {
    for_each_seeded(|name, store| {
        let err = store.delete_product(ProductId(1)).unwrap_err();
        assert!(
            matches!(err, StorageError::ForeignKeyViolation(_)),
            "{name}: {err:?}"
        );
        assert!(store.get_product(ProductId(1)).is_ok(), "{name}");
    });
}

#[test]
fn deleting_unreferenced_product_succeeds() {
    for_each_seeded(|name, store| {
        let id = store.insert_product("Headphones", 150).unwrap();
        store.delete_product(id).unwrap();
        assert!(
            matches!(store.get_product(id), Err(StorageError::ProductNotFound(4))),
            "{name}"
        );
    });
}

// ---------------------------------------------------------------------------
// Deletes and updates
// ---------------------------------------------------------------------------

#[test]
fn deleting_order_cascades_to_its_line_items_only() {
    for_each_seeded(|name, store| {
        store.delete_order(OrderId(1)).unwrap();

        assert!(store.find_line_items_by_order(OrderId(1)).unwrap().is_empty(), "{name}");
        assert_eq!(
            store.list_orders().unwrap(),
            vec![order(2, Some(2)), order(3, Some(1)), order(4, Some(2))],
            "{name}"
        );
        assert_eq!(
            store.list_line_items().unwrap(),
            vec![item(2, 2, 3), item(3, 3, 4), item(4, 1, 2)],
            "{name}"
        );
        // Product 1 is still referenced by order 4.
        assert!(store.delete_product(ProductId(1)).is_err(), "{name}");
    });
}

#[test]
fn deleting_user_detaches_orders_without_deleting_them() {
    for_each_seeded(|name, store| {
        store.delete_user(UserId(1)).unwrap();

        assert!(
            matches!(store.get_user(UserId(1)), Err(StorageError::UserNotFound(1))),
            "{name}"
        );
        assert_eq!(
            store.list_orders().unwrap(),
            vec![order(1, None), order(2, Some(2)), order(3, None), order(4, Some(2))],
            "{name}"
        );
        assert_eq!(
            store.find_line_items_by_order(OrderId(1)).unwrap(),
            vec![item(1, 1, 1)],
            "{name}"
        );
        assert_eq!(
            store.find_line_items_by_order(OrderId(3)).unwrap(),
            vec![item(3, 3, 4)],
            "{name}"
        );
    });
}

#[test]
fn updating_product_price_touches_only_that_product() {
    for_each_seeded(|name, store| {
        let mut phone = store.get_product(ProductId(2)).unwrap();
        phone.price = 750;
        store.update_product(&phone).unwrap();

        assert_eq!(
            store.list_products().unwrap(),
            vec![
                product(1, "Laptop", 1200),
                product(2, "Smartphone", 750),
                product(3, "Tablet", 600),
            ],
            "{name}"
        );
    });
}

#[test]
fn missing_records_are_reported_by_id() {
    for (name, mut store) in backends() {
        assert!(matches!(store.get_user(UserId(7)), Err(StorageError::UserNotFound(7))), "{name}");
        assert!(matches!(store.delete_user(UserId(7)), Err(StorageError::UserNotFound(7))), "{name}");
        assert!(matches!(store.get_order(OrderId(7)), Err(StorageError::OrderNotFound(7))), "{name}");
        assert!(matches!(store.delete_order(OrderId(7)), Err(StorageError::OrderNotFound(7))), "{name}");
        assert!(
            matches!(
                store.update_product(&product(7, "Ghost", 1)),
                Err(StorageError::ProductNotFound(7))
            ),
            "{name}"
        );
        assert!(
            matches!(
                store.get_line_item(OrderId(1), ProductId(2)),
                Err(StorageError::LineItemNotFound { order: 1, product: 2 })
            ),
            "{name}"
        );
    }
}

// ---------------------------------------------------------------------------
// Joins
// ---------------------------------------------------------------------------

#[test]
fn purchases_follow_line_item_insertion_order() {
    for_each_seeded(|name, store| {
        let summary: Vec<(Option<String>, u32, String)> = store
            .list_purchases()
            .unwrap()
            .into_iter()
            .map(|p| (p.buyer, p.quantity, p.product_name))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some("Richard".to_string()), 1, "Laptop".to_string()),
                (Some("Regina".to_string()), 3, "Smartphone".to_string()),
                (Some("Richard".to_string()), 4, "Tablet".to_string()),
                (Some("Regina".to_string()), 2, "Laptop".to_string()),
            ],
            "{name}"
        );
    });
}

#[test]
fn purchases_of_detached_orders_have_no_buyer() {
    for_each_seeded(|name, store| {
        scenario::apply_mutations(store).unwrap();
        let buyers: Vec<Option<String>> = store
            .list_purchases()
            .unwrap()
            .into_iter()
            .map(|p| p.buyer)
            .collect();
        assert_eq!(
            buyers,
            vec![None, Some("Regina".to_string()), None, Some("Regina".to_string())],
            "{name}"
        );
    });
}
