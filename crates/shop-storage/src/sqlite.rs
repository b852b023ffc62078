//! SQLite implementation of [`ShopStore`].
//!
//! [`SqliteStore`] owns a single connection for its whole lifetime; the
//! connection is closed when the store is dropped. Every write runs in its
//! own transaction. Constraint enforcement is left to the engine (unique
//! indexes, foreign keys, the `ON DELETE CASCADE` from `order_product` to
//! `Orders`); the only application-level rule is that deleting a user first
//! detaches that user's orders.

use rusqlite::{params, Connection, OptionalExtension, Row};

use shop_core::{Order, OrderId, OrderLineItem, Product, ProductId, Purchase, User, UserId};

use crate::error::StorageError;
use crate::traits::ShopStore;
use crate::types::StoreStats;

/// SQLite-backed implementation of [`ShopStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Deletes any database at `path` and opens an empty one in its place.
    pub fn recreate(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::recreate_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Borrows the underlying connection, e.g. for schema introspection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // -----------------------------------------------------------------------
    // Row mappers
    // -----------------------------------------------------------------------

    fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: UserId(row.get(0)?),
            name: row.get(1)?,
            email: row.get(2)?,
        })
    }

    fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
        Ok(Product {
            id: ProductId(row.get(0)?),
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }

    fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
        let user_id: Option<i64> = row.get(1)?;
        Ok(Order {
            id: OrderId(row.get(0)?),
            user_id: user_id.map(UserId),
        })
    }

    fn line_item_from_row(row: &Row<'_>) -> rusqlite::Result<OrderLineItem> {
        Ok(OrderLineItem {
            order_id: OrderId(row.get(0)?),
            product_id: ProductId(row.get(1)?),
            quantity: row.get(2)?,
        })
    }

    fn purchase_from_row(row: &Row<'_>) -> rusqlite::Result<Purchase> {
        Ok(Purchase {
            order_id: OrderId(row.get(0)?),
            product_id: ProductId(row.get(1)?),
            buyer: row.get(2)?,
            quantity: row.get(3)?,
            product_name: row.get(4)?,
        })
    }
}

impl ShopStore for SqliteStore {
    // -------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------

    fn insert_user(&mut self, name: &str, email: &str) -> Result<UserId, StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO Users (name, email) VALUES (?1, ?2)",
            params![name, email],
        )?;
        let id = UserId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(%id, name, email, "inserted user");
        Ok(id)
    }

    fn get_user(&self, id: UserId) -> Result<User, StorageError> {
        self.conn
            .query_row(
                "SELECT id, name, email FROM Users WHERE id = ?1",
                params![id.0],
                Self::user_from_row,
            )
            .optional()?
            .ok_or(StorageError::UserNotFound(id.0))
    }

    fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, email FROM Users ORDER BY id")?;
        let rows = stmt.query_map([], Self::user_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn delete_user(&mut self, id: UserId) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        // Orders keep existing without an owner.
        let detached = tx.execute(
            "UPDATE Orders SET user_id = NULL WHERE user_id = ?1",
            params![id.0],
        )?;
        let rows = tx.execute("DELETE FROM Users WHERE id = ?1", params![id.0])?;
        if rows == 0 {
            // Dropping the transaction rolls back the detach.
            return Err(StorageError::UserNotFound(id.0));
        }
        tx.commit()?;
        tracing::debug!(%id, detached_orders = detached, "deleted user");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------

    fn insert_product(&mut self, name: &str, price: i64) -> Result<ProductId, StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO Products (name, price) VALUES (?1, ?2)",
            params![name, price],
        )?;
        let id = ProductId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(%id, name, price, "inserted product");
        Ok(id)
    }

    fn get_product(&self, id: ProductId) -> Result<Product, StorageError> {
        self.conn
            .query_row(
                "SELECT id, name, price FROM Products WHERE id = ?1",
                params![id.0],
                Self::product_from_row,
            )
            .optional()?
            .ok_or(StorageError::ProductNotFound(id.0))
    }

    fn list_products(&self) -> Result<Vec<Product>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, price FROM Products ORDER BY id")?;
        let rows = stmt.query_map([], Self::product_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn update_product(&mut self, product: &Product) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        let rows = tx.execute(
            "UPDATE Products SET name = ?2, price = ?3 WHERE id = ?1",
            params![product.id.0, product.name, product.price],
        )?;
        if rows == 0 {
            return Err(StorageError::ProductNotFound(product.id.0));
        }
        tx.commit()?;
        tracing::debug!(id = %product.id, price = product.price, "updated product");
        Ok(())
    }

    fn delete_product(&mut self, id: ProductId) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        let rows = tx.execute("DELETE FROM Products WHERE id = ?1", params![id.0])?;
        if rows == 0 {
            return Err(StorageError::ProductNotFound(id.0));
        }
        tx.commit()?;
        tracing::debug!(%id, "deleted product");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------

    fn insert_order(&mut self, user: Option<UserId>) -> Result<OrderId, StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO Orders (user_id) VALUES (?1)",
            params![user.map(|u| u.0)],
        )?;
        let id = OrderId(tx.last_insert_rowid());
        tx.commit()?;
        tracing::debug!(%id, user = ?user, "inserted order");
        Ok(id)
    }

    fn get_order(&self, id: OrderId) -> Result<Order, StorageError> {
        self.conn
            .query_row(
                "SELECT id, user_id FROM Orders WHERE id = ?1",
                params![id.0],
                Self::order_from_row,
            )
            .optional()?
            .ok_or(StorageError::OrderNotFound(id.0))
    }

    fn list_orders(&self) -> Result<Vec<Order>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, user_id FROM Orders ORDER BY id")?;
        let rows = stmt.query_map([], Self::order_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn delete_order(&mut self, id: OrderId) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        // order_product rows go with it via ON DELETE CASCADE.
        let rows = tx.execute("DELETE FROM Orders WHERE id = ?1", params![id.0])?;
        if rows == 0 {
            return Err(StorageError::OrderNotFound(id.0));
        }
        tx.commit()?;
        tracing::debug!(%id, "deleted order");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Line items
    // -------------------------------------------------------------------

    fn insert_line_item(&mut self, item: &OrderLineItem) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO order_product (order_id, product_id, quantity) VALUES (?1, ?2, ?3)",
            params![item.order_id.0, item.product_id.0, item.quantity],
        )?;
        tx.commit()?;
        tracing::debug!(
            order = %item.order_id,
            product = %item.product_id,
            quantity = item.quantity,
            "inserted line item"
        );
        Ok(())
    }

    fn get_line_item(
        &self,
        order: OrderId,
        product: ProductId,
    ) -> Result<OrderLineItem, StorageError> {
        self.conn
            .query_row(
                "SELECT order_id, product_id, quantity FROM order_product WHERE order_id = ?1 AND product_id = ?2",
                params![order.0, product.0],
                Self::line_item_from_row,
            )
            .optional()?
            .ok_or(StorageError::LineItemNotFound {
                order: order.0,
                product: product.0,
            })
    }

    fn list_line_items(&self) -> Result<Vec<OrderLineItem>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT order_id, product_id, quantity FROM order_product ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], Self::line_item_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn find_line_items_by_order(
        &self,
        order: OrderId,
    ) -> Result<Vec<OrderLineItem>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT order_id, product_id, quantity FROM order_product WHERE order_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![order.0], Self::line_item_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    // -------------------------------------------------------------------
    // Query methods
    // -------------------------------------------------------------------

    fn list_purchases(&self) -> Result<Vec<Purchase>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT op.order_id, op.product_id, u.name, op.quantity, p.name
             FROM order_product op
             JOIN Orders o ON o.id = op.order_id
             LEFT JOIN Users u ON u.id = o.user_id
             JOIN Products p ON p.id = op.product_id
             ORDER BY op.rowid",
        )?;
        let rows = stmt.query_map([], Self::purchase_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn stats(&self) -> Result<StoreStats, StorageError> {
        let (users, products, orders, line_items): (i64, i64, i64, i64) = self.conn.query_row(
            "SELECT
                 (SELECT COUNT(*) FROM Users),
                 (SELECT COUNT(*) FROM Products),
                 (SELECT COUNT(*) FROM Orders),
                 (SELECT COUNT(*) FROM order_product)",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;
        Ok(StoreStats {
            users: users as u64,
            products: products as u64,
            orders: orders as u64,
            line_items: line_items as u64,
        })
    }
}
