//! PostgreSQL implementation of CartRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use fanverse_core::entities::{Cart, CartItem, CartLine};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{CartRepository, RepoResult};
use fanverse_core::value_objects::Snowflake;

use crate::models::{CartItemModel, CartLineModel, CartModel};

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of CartRepository
#[derive(Clone)]
pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Cart>> {
        let result = sqlx::query_as::<_, CartModel>(
            "SELECT id, user_id, created_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Cart::from))
    }

    #[instrument(skip(self))]
    async fn get_or_create(&self, cart: &Cart) -> RepoResult<Cart> {
        // A concurrent first add may have created it; the select below then
        // returns that row instead
        sqlx::query(
            r"
            INSERT INTO carts (id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(cart.id.into_inner())
        .bind(cart.user_id.into_inner())
        .bind(cart.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.find_by_user(cart.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(cart.user_id))
    }

    #[instrument(skip(self))]
    async fn find_item(&self, id: Snowflake) -> RepoResult<Option<CartItem>> {
        let result = sqlx::query_as::<_, CartItemModel>(
            r"
            SELECT id, cart_id, merchandise_post_id, merchandise_option_id, quantity
            FROM cart_items
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CartItem::from))
    }

    #[instrument(skip(self))]
    async fn find_item_by_option(
        &self,
        cart_id: Snowflake,
        merchandise_option_id: Snowflake,
    ) -> RepoResult<Option<CartItem>> {
        let result = sqlx::query_as::<_, CartItemModel>(
            r"
            SELECT id, cart_id, merchandise_post_id, merchandise_option_id, quantity
            FROM cart_items
            WHERE cart_id = $1 AND merchandise_option_id = $2
            ",
        )
        .bind(cart_id.into_inner())
        .bind(merchandise_option_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CartItem::from))
    }

    #[instrument(skip(self))]
    async fn add_item(&self, item: &CartItem) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO cart_items (id, cart_id, merchandise_post_id, merchandise_option_id, quantity)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(item.id.into_inner())
        .bind(item.cart_id.into_inner())
        .bind(item.merchandise_post_id.into_inner())
        .bind(item.merchandise_option_id.into_inner())
        .bind(item.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::ValidationError("option is already in the cart".to_string()),
                || DomainError::MerchandiseOptionNotFound(item.merchandise_option_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_quantity(&self, item_id: Snowflake, quantity: i32) -> RepoResult<()> {
        let result = sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
            .bind(item_id.into_inner())
            .bind(quantity)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CartItemNotFound(item_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, item_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(item_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CartItemNotFound(item_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_lines(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>> {
        let result = sqlx::query_as::<_, CartLineModel>(
            r"
            SELECT ci.id, ci.cart_id, ci.merchandise_post_id, ci.merchandise_option_id,
                   ci.quantity, mp.title AS merchandise_title, mo.name AS option_name,
                   mo.price AS unit_price, mo.stock
            FROM cart_items ci
            JOIN merchandise_posts mp ON mp.id = ci.merchandise_post_id
            JOIN merchandise_options mo ON mo.id = ci.merchandise_option_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(cart_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(CartLine::from).collect())
    }

    #[instrument(skip(self))]
    async fn checkout(&self, cart_id: Snowflake) -> RepoResult<Vec<CartLine>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Lock options in id order so concurrent checkouts cannot deadlock
        let rows = sqlx::query_as::<_, CartLineModel>(
            r"
            SELECT ci.id, ci.cart_id, ci.merchandise_post_id, ci.merchandise_option_id,
                   ci.quantity, mp.title AS merchandise_title, mo.name AS option_name,
                   mo.price AS unit_price, mo.stock
            FROM cart_items ci
            JOIN merchandise_posts mp ON mp.id = ci.merchandise_post_id
            JOIN merchandise_options mo ON mo.id = ci.merchandise_option_id
            WHERE ci.cart_id = $1
            ORDER BY mo.id
            FOR UPDATE OF mo
            ",
        )
        .bind(cart_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if rows.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let lines: Vec<CartLine> = rows.into_iter().map(CartLine::from).collect();

        for line in &lines {
            if line.item.quantity > line.stock {
                return Err(DomainError::InsufficientStock {
                    option_id: line.item.merchandise_option_id,
                    available: line.stock,
                });
            }

            sqlx::query("UPDATE merchandise_options SET stock = stock - $2 WHERE id = $1")
                .bind(line.item.merchandise_option_id.into_inner())
                .bind(line.item.quantity)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        info!(cart_id = %cart_id, lines = lines.len(), "Cart checked out");

        Ok(lines)
    }
}
