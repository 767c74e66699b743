//! Storefront entities - products, merchandise listings and carts

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::validation::{EntityRules, FieldErrors};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    pub id: Snowflake,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ProductCategory {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

impl EntityRules for ProductCategory {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("name", &self.name, 50);
        errors
    }
}

/// A community's shop line, grouping merchandise listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub category_id: Option<Snowflake>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        id: Snowflake,
        community_id: Snowflake,
        category_id: Option<Snowflake>,
        name: String,
    ) -> Self {
        Self {
            id,
            community_id,
            category_id,
            name,
            created_at: Utc::now(),
        }
    }
}

impl EntityRules for Product {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("name", &self.name, 100);
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchandisePost {
    pub id: Snowflake,
    pub product_id: Snowflake,
    pub community_id: Snowflake,
    pub title: String,
    pub content: String,
    pub price: i64,
    pub delivery_price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MerchandisePost {
    pub const TITLE_MAX: usize = 100;
    pub const CONTENT_MAX: usize = 5000;
    pub const OPTIONS_MAX: usize = 50;
    pub const IMAGES_MAX: usize = 10;
    /// Upper bound for listing, delivery and option prices
    pub const PRICE_MAX: i64 = 100_000_000;

    pub fn new(
        id: Snowflake,
        product_id: Snowflake,
        community_id: Snowflake,
        title: String,
        content: String,
        price: i64,
        delivery_price: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            product_id,
            community_id,
            title,
            content,
            price,
            delivery_price,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl EntityRules for MerchandisePost {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("title", &self.title, Self::TITLE_MAX);
        errors.text("content", &self.content, Self::CONTENT_MAX);
        errors.amount("price", self.price, Self::PRICE_MAX);
        errors.amount("deliveryPrice", self.delivery_price, Self::PRICE_MAX);
        errors
    }
}

/// Purchasable variant of a listing; the unit price charged at checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchandiseOption {
    pub id: Snowflake,
    pub merchandise_post_id: Snowflake,
    pub name: String,
    pub price: i64,
    pub stock: i32,
}

impl MerchandiseOption {
    pub fn new(
        id: Snowflake,
        merchandise_post_id: Snowflake,
        name: String,
        price: i64,
        stock: i32,
    ) -> Self {
        Self {
            id,
            merchandise_post_id,
            name,
            price,
            stock,
        }
    }
}

impl EntityRules for MerchandiseOption {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.text("options.name", &self.name, 50);
        errors.amount("options.price", self.price, MerchandisePost::PRICE_MAX);
        errors.non_negative("options.stock", i64::from(self.stock));
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchandiseImage {
    pub id: Snowflake,
    pub merchandise_post_id: Snowflake,
    pub url: String,
    pub position: i32,
}

impl MerchandiseImage {
    pub fn new(id: Snowflake, merchandise_post_id: Snowflake, url: String, position: i32) -> Self {
        Self {
            id,
            merchandise_post_id,
            url,
            position,
        }
    }
}

/// One cart per user, created on first add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: Snowflake,
    pub cart_id: Snowflake,
    pub merchandise_post_id: Snowflake,
    pub merchandise_option_id: Snowflake,
    pub quantity: i32,
}

impl CartItem {
    pub fn new(
        id: Snowflake,
        cart_id: Snowflake,
        merchandise_post_id: Snowflake,
        merchandise_option_id: Snowflake,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            cart_id,
            merchandise_post_id,
            merchandise_option_id,
            quantity,
        }
    }
}

impl EntityRules for CartItem {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.quantity < 1 {
            errors.push("quantity", "must be at least 1");
        }
        errors
    }
}

/// Cart item joined with the listing and option it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CartItem,
    pub merchandise_title: String,
    pub option_name: String,
    pub unit_price: i64,
    pub stock: i32,
}

impl CartLine {
    pub fn line_total(&self) -> Result<i64, DomainError> {
        self.unit_price
            .checked_mul(i64::from(self.item.quantity))
            .ok_or(DomainError::PriceOverflow)
    }
}

/// Sum of every line total
pub fn cart_total(lines: &[CartLine]) -> Result<i64, DomainError> {
    lines.iter().try_fold(0_i64, |sum, line| {
        sum.checked_add(line.line_total()?)
            .ok_or(DomainError::PriceOverflow)
    })
}
