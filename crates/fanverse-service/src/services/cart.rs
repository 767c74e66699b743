//! Cart service
//!
//! One cart per user, created on first use. Stock is checked when items are
//! added and again, under row locks, at checkout.

use fanverse_core::entities::{cart_total, Cart, CartItem, CartLine};
use fanverse_core::{AuthContext, DomainError, EntityRules, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    AddCartItemRequest, CartLineResponse, CartResponse, CheckoutResponse, Envelope,
    UpdateCartItemRequest,
};
use crate::messages;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct CartService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CartService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn find(&self, auth: &AuthContext) -> ServiceResult<Envelope<CartResponse>> {
        let cart = self.cart_of(auth).await?;
        let response = self.snapshot(&cart).await?;
        Ok(Envelope::ok(messages::cart::FIND, response))
    }

    /// Adding an option already in the cart increases its quantity
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn add_item(
        &self,
        auth: &AuthContext,
        request: AddCartItemRequest,
    ) -> ServiceResult<Envelope<CartResponse>> {
        let merchandise = self
            .ctx
            .merchandise_repo()
            .find_by_id(request.merchandise_post_id)
            .await?
            .ok_or(DomainError::MerchandiseNotFound(request.merchandise_post_id))?;

        let option = self
            .ctx
            .merchandise_repo()
            .find_option(request.merchandise_option_id)
            .await?
            .filter(|option| option.merchandise_post_id == merchandise.id)
            .ok_or(DomainError::MerchandiseOptionNotFound(
                request.merchandise_option_id,
            ))?;

        let cart = self.cart_of(auth).await?;
        let existing = self
            .ctx
            .cart_repo()
            .find_item_by_option(cart.id, option.id)
            .await?;

        let quantity = existing
            .as_ref()
            .map_or(0, |item| item.quantity)
            .saturating_add(request.quantity);
        option
            .price
            .checked_mul(i64::from(quantity))
            .ok_or(DomainError::PriceOverflow)?;
        if quantity > option.stock {
            warn!(option_id = %option.id, quantity, stock = option.stock, "Not enough stock");
            return Err(DomainError::InsufficientStock {
                option_id: option.id,
                available: option.stock,
            }
            .into());
        }

        match existing {
            Some(item) => {
                self.ctx.cart_repo().set_quantity(item.id, quantity).await?;
            }
            None => {
                let item = CartItem::new(
                    self.ctx.generate_id(),
                    cart.id,
                    merchandise.id,
                    option.id,
                    quantity,
                );
                item.check()?;
                self.ctx.cart_repo().add_item(&item).await?;
            }
        }

        info!(option_id = %option.id, quantity, "Cart item added");

        let response = self.snapshot(&cart).await?;
        Ok(Envelope::created(messages::cart::ADD_ITEM, response))
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn update_item(
        &self,
        auth: &AuthContext,
        item_id: Snowflake,
        request: UpdateCartItemRequest,
    ) -> ServiceResult<Envelope<CartResponse>> {
        let (cart, item) = self.owned_item(auth, item_id).await?;

        let option = self
            .ctx
            .merchandise_repo()
            .find_option(item.merchandise_option_id)
            .await?
            .ok_or(DomainError::MerchandiseOptionNotFound(
                item.merchandise_option_id,
            ))?;

        if request.quantity > option.stock {
            return Err(DomainError::InsufficientStock {
                option_id: option.id,
                available: option.stock,
            }
            .into());
        }

        let mut updated = item;
        updated.quantity = request.quantity;
        updated.check()?;

        self.ctx
            .cart_repo()
            .set_quantity(item_id, request.quantity)
            .await?;
        info!(item_id = %item_id, quantity = request.quantity, "Cart item updated");

        let response = self.snapshot(&cart).await?;
        Ok(Envelope::ok(messages::cart::UPDATE_ITEM, response))
    }

    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn remove_item(
        &self,
        auth: &AuthContext,
        item_id: Snowflake,
    ) -> ServiceResult<Envelope<CartResponse>> {
        let (cart, _) = self.owned_item(auth, item_id).await?;

        self.ctx.cart_repo().remove_item(item_id).await?;
        info!(item_id = %item_id, "Cart item removed");

        let response = self.snapshot(&cart).await?;
        Ok(Envelope::ok(messages::cart::REMOVE_ITEM, response))
    }

    /// Decrement stock for every line and empty the cart, all or nothing
    #[instrument(skip(self, auth), fields(user_id = %auth.user_id))]
    pub async fn checkout(&self, auth: &AuthContext) -> ServiceResult<Envelope<CheckoutResponse>> {
        let cart = self
            .ctx
            .cart_repo()
            .find_by_user(auth.user_id)
            .await?
            .ok_or(DomainError::EmptyCart)?;

        // Totals are checked before any stock is taken
        cart_total(&self.ctx.cart_repo().find_lines(cart.id).await?)?;

        let lines = self.ctx.cart_repo().checkout(cart.id).await?;
        let total_price = cart_total(&lines)?;

        info!(cart_id = %cart.id, lines = lines.len(), total_price, "Checkout completed");

        Ok(Envelope::ok(
            messages::cart::CHECKOUT,
            CheckoutResponse {
                items: line_responses(&lines)?,
                total_price,
            },
        ))
    }

    async fn cart_of(&self, auth: &AuthContext) -> ServiceResult<Cart> {
        if let Some(cart) = self.ctx.cart_repo().find_by_user(auth.user_id).await? {
            return Ok(cart);
        }
        let cart = Cart::new(self.ctx.generate_id(), auth.user_id);
        Ok(self.ctx.cart_repo().get_or_create(&cart).await?)
    }

    /// Items in other users' carts are reported as missing
    async fn owned_item(
        &self,
        auth: &AuthContext,
        item_id: Snowflake,
    ) -> ServiceResult<(Cart, CartItem)> {
        let not_found = || DomainError::CartItemNotFound(item_id);

        let item = self
            .ctx
            .cart_repo()
            .find_item(item_id)
            .await?
            .ok_or_else(not_found)?;
        let cart = self
            .ctx
            .cart_repo()
            .find_by_user(auth.user_id)
            .await?
            .filter(|cart| cart.id == item.cart_id)
            .ok_or_else(not_found)?;

        Ok((cart, item))
    }

    async fn snapshot(&self, cart: &Cart) -> ServiceResult<CartResponse> {
        let lines = self.ctx.cart_repo().find_lines(cart.id).await?;
        Ok(CartResponse {
            cart_id: cart.id,
            total_price: cart_total(&lines)?,
            items: line_responses(&lines)?,
        })
    }
}

fn line_responses(lines: &[CartLine]) -> Result<Vec<CartLineResponse>, DomainError> {
    lines.iter().map(CartLineResponse::try_from).collect()
}
