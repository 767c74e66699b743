//! Storefront database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for product_categories table
#[derive(Debug, Clone, FromRow)]
pub struct ProductCategoryModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for products table
#[derive(Debug, Clone, FromRow)]
pub struct ProductModel {
    pub id: i64,
    pub community_id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for merchandise_posts table
#[derive(Debug, Clone, FromRow)]
pub struct MerchandisePostModel {
    pub id: i64,
    pub product_id: i64,
    pub community_id: i64,
    pub title: String,
    pub content: String,
    pub price: i64,
    pub delivery_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MerchandiseOptionModel {
    pub id: i64,
    pub merchandise_post_id: i64,
    pub name: String,
    pub price: i64,
    pub stock: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct MerchandiseImageModel {
    pub id: i64,
    pub merchandise_post_id: i64,
    pub url: String,
    pub position: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct CartModel {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CartItemModel {
    pub id: i64,
    pub cart_id: i64,
    pub merchandise_post_id: i64,
    pub merchandise_option_id: i64,
    pub quantity: i32,
}

/// Cart item joined with its listing and option
#[derive(Debug, Clone, FromRow)]
pub struct CartLineModel {
    pub id: i64,
    pub cart_id: i64,
    pub merchandise_post_id: i64,
    pub merchandise_option_id: i64,
    pub quantity: i32,
    pub merchandise_title: String,
    pub option_name: String,
    pub unit_price: i64,
    pub stock: i32,
}
