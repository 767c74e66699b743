//! PostgreSQL implementation of ProductRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fanverse_core::entities::{Product, ProductCategory};
use fanverse_core::error::DomainError;
use fanverse_core::traits::{ProductRepository, RepoResult};
use fanverse_core::value_objects::Snowflake;

use crate::models::{ProductCategoryModel, ProductModel};

use super::error::{map_constraint_violation, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self))]
    async fn create_category(&self, category: &ProductCategory) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO product_categories (id, name, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(category.id.into_inner())
        .bind(&category.name)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::CategoryExists(category.name.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_category(&self, id: Snowflake) -> RepoResult<Option<ProductCategory>> {
        let result = sqlx::query_as::<_, ProductCategoryModel>(
            "SELECT id, name, created_at FROM product_categories WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ProductCategory::from))
    }

    #[instrument(skip(self))]
    async fn find_categories(&self) -> RepoResult<Vec<ProductCategory>> {
        let result = sqlx::query_as::<_, ProductCategoryModel>(
            "SELECT id, name, created_at FROM product_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(ProductCategory::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, product: &Product) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO products (id, community_id, category_id, name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(product.id.into_inner())
        .bind(product.community_id.into_inner())
        .bind(product.category_id.map(Snowflake::into_inner))
        .bind(&product.name)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(
                e,
                || DomainError::InternalError(format!("duplicate product id {}", product.id)),
                || DomainError::CommunityNotFound(product.community_id),
            )
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Product>> {
        let result = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, community_id, category_id, name, created_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn find_by_community(&self, community_id: Snowflake) -> RepoResult<Vec<Product>> {
        let result = sqlx::query_as::<_, ProductModel>(
            r"
            SELECT id, community_id, category_id, name, created_at
            FROM products
            WHERE community_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(community_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Product::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgProductRepository>();
    }
}
