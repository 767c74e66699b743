//! Storefront mappers

use fanverse_core::entities::{
    Cart, CartItem, CartLine, MerchandiseImage, MerchandiseOption, MerchandisePost, Product,
    ProductCategory,
};
use fanverse_core::value_objects::Snowflake;

use crate::models::{
    CartItemModel, CartLineModel, CartModel, MerchandiseImageModel, MerchandiseOptionModel,
    MerchandisePostModel, ProductCategoryModel, ProductModel,
};

impl From<ProductCategoryModel> for ProductCategory {
    fn from(model: ProductCategoryModel) -> Self {
        ProductCategory {
            id: Snowflake::new(model.id),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Product {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            category_id: model.category_id.map(Snowflake::new),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<MerchandisePostModel> for MerchandisePost {
    fn from(model: MerchandisePostModel) -> Self {
        MerchandisePost {
            id: Snowflake::new(model.id),
            product_id: Snowflake::new(model.product_id),
            community_id: Snowflake::new(model.community_id),
            title: model.title,
            content: model.content,
            price: model.price,
            delivery_price: model.delivery_price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<MerchandiseOptionModel> for MerchandiseOption {
    fn from(model: MerchandiseOptionModel) -> Self {
        MerchandiseOption {
            id: Snowflake::new(model.id),
            merchandise_post_id: Snowflake::new(model.merchandise_post_id),
            name: model.name,
            price: model.price,
            stock: model.stock,
        }
    }
}

impl From<MerchandiseImageModel> for MerchandiseImage {
    fn from(model: MerchandiseImageModel) -> Self {
        MerchandiseImage {
            id: Snowflake::new(model.id),
            merchandise_post_id: Snowflake::new(model.merchandise_post_id),
            url: model.url,
            position: model.position,
        }
    }
}

impl From<CartModel> for Cart {
    fn from(model: CartModel) -> Self {
        Cart {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}

impl From<CartItemModel> for CartItem {
    fn from(model: CartItemModel) -> Self {
        CartItem {
            id: Snowflake::new(model.id),
            cart_id: Snowflake::new(model.cart_id),
            merchandise_post_id: Snowflake::new(model.merchandise_post_id),
            merchandise_option_id: Snowflake::new(model.merchandise_option_id),
            quantity: model.quantity,
        }
    }
}

impl From<CartLineModel> for CartLine {
    fn from(model: CartLineModel) -> Self {
        CartLine {
            item: CartItem {
                id: Snowflake::new(model.id),
                cart_id: Snowflake::new(model.cart_id),
                merchandise_post_id: Snowflake::new(model.merchandise_post_id),
                merchandise_option_id: Snowflake::new(model.merchandise_option_id),
                quantity: model.quantity,
            },
            merchandise_title: model.merchandise_title,
            option_name: model.option_name,
            unit_price: model.unit_price,
            stock: model.stock,
        }
    }
}
