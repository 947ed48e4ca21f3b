//! Cart route handlers.
//!
//! Each handler loads the session's cart, applies one cart operation, and
//! saves it. Requests sent by `storefront.js` carry `HX-Request` and get the
//! re-rendered cart panel back with an `HX-Trigger: cart-updated` header;
//! plain form posts are redirected to `return_to`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use maas_pickles_core::{Cart, CartLine, catalog};

use super::layout::{CartFragment, Layout};
use crate::error::{AppError, Result};
use crate::services::cart::SessionCart;
use crate::services::notifications::{self, Notification};

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub weight: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
    /// Quantity the minus button submits. Zero removes the line.
    pub decrement: i64,
    pub increment: i64,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    pub is_open: bool,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::from(&Cart::new())
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let quantity = line.quantity();
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            weight: line.product.weight.clone(),
            image: line.product.image.clone(),
            price: line.product.price.to_string(),
            quantity,
            line_price: line.line_total().to_string(),
            decrement: i64::from(quantity) - 1,
            increment: i64::from(quantity) + 1,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total_price().to_string(),
            item_count: cart.total_items(),
            is_open: cart.is_open(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// Update quantity form data. Zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
    pub return_to: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
    pub return_to: Option<String>,
}

/// Forms that only say where to go back to.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
}

/// Cart panel fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub layout: CartFragment,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub layout: CartFragment,
}

// =============================================================================
// Helpers
// =============================================================================

fn is_fragment_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some_and(|v| v == "true")
}

/// Only same-site relative paths are followed; anything else goes to `/cart`.
///
/// Control characters are refused too: they cannot go in a `Location` header.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.bytes().any(|b| b.is_ascii_control()) =>
        {
            path
        }
        _ => "/cart",
    }
}

/// Save the cart and answer the mutation.
async fn respond(
    cart: &SessionCart,
    headers: &HeaderMap,
    return_to: Option<&str>,
) -> Result<Response> {
    cart.save().await?;

    let return_to = safe_return_path(return_to);
    if is_fragment_request(headers) {
        let fragment = CartFragment {
            cart: CartView::from(cart.cart()),
            current_path: return_to.to_string(),
        };
        return Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartPanelTemplate { layout: fragment },
        )
            .into_response());
    }

    Ok(Redirect::to(return_to).into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page, with the panel open.
#[instrument(skip_all)]
pub async fn show(session: Session, mut layout: Layout) -> Result<impl IntoResponse> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().open();
    cart.save().await?;

    layout.set_cart(CartView::from(cart.cart()));
    Ok(CartShowTemplate { layout })
}

/// Cart count badge.
#[instrument(skip_all)]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = SessionCart::load(&session).await?;
    Ok(CartCountTemplate {
        layout: CartFragment {
            cart: CartView::from(cart.cart()),
            current_path: "/cart".to_string(),
        },
    })
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns 404 for an unknown product and 400 for a zero quantity.
#[instrument(skip(session, headers), fields(product_id = %form.id))]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = catalog::find(&form.id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.id)))?;

    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().add_item(product, quantity);

    crate::error::add_breadcrumb("cart", "Added to cart", Some(&[("product_id", form.id.as_str())]));
    tracing::info!(quantity, total_items = cart.cart().total_items(), "Added to cart");

    if !is_fragment_request(&headers) {
        notifications::push_or_log(
            &session,
            Notification::success("Added to cart", format!("{} × {quantity}", product.name)),
        )
        .await;
    }

    respond(&cart, &headers, form.return_to.as_deref()).await
}

/// Set a line's quantity.
#[instrument(skip(session, headers), fields(product_id = %form.id, quantity = form.quantity))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut()
        .update_quantity(&form.id.as_str().into(), form.quantity);

    respond(&cart, &headers, form.return_to.as_deref()).await
}

/// Remove a line.
#[instrument(skip(session, headers), fields(product_id = %form.id))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().remove_item(&form.id.as_str().into());

    respond(&cart, &headers, form.return_to.as_deref()).await
}

/// Empty the cart. The panel stays as it was.
#[instrument(skip_all)]
pub async fn clear(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ReturnForm>,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().clear();

    respond(&cart, &headers, form.return_to.as_deref()).await
}

/// Open the cart panel.
#[instrument(skip_all)]
pub async fn open(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ReturnForm>,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().open();

    respond(&cart, &headers, form.return_to.as_deref()).await
}

/// Close the cart panel.
#[instrument(skip_all)]
pub async fn close(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ReturnForm>,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().close();

    respond(&cart, &headers, form.return_to.as_deref()).await
}

/// Flip the cart panel.
#[instrument(skip_all)]
pub async fn toggle(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ReturnForm>,
) -> Result<Response> {
    let mut cart = SessionCart::load(&session).await?;
    cart.cart_mut().toggle();

    respond(&cart, &headers, form.return_to.as_deref()).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_return_path_rejects_offsite() {
        assert_eq!(safe_return_path(Some("/menu?category=veg")), "/menu?category=veg");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/cart");
        assert_eq!(safe_return_path(Some("//evil.example")), "/cart");
        assert_eq!(safe_return_path(Some("/\\evil.example")), "/cart");
        assert_eq!(safe_return_path(Some("/menu\nX-Evil: 1")), "/cart");
        assert_eq!(safe_return_path(Some("/menu\r\n")), "/cart");
        assert_eq!(safe_return_path(Some("/menu\t")), "/cart");
        assert_eq!(safe_return_path(None), "/cart");
    }

    #[test]
    fn test_fragment_request_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_fragment_request(&headers));
        headers.insert("hx-request", HeaderValue::from_static("true"));
        assert!(is_fragment_request(&headers));
    }

    #[test]
    fn test_view_buttons_step_quantity() {
        let mut cart = Cart::new();
        cart.add_item(catalog::find("lime-pickle").unwrap(), 1);
        cart.add_item(catalog::find("chili-pickle").unwrap(), 3);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 4);
        assert_eq!(view.total, "₹736");
        assert_eq!(view.items[0].decrement, 0);
        assert_eq!(view.items[1].increment, 4);
        assert_eq!(view.items[1].line_price, "₹537");
    }

    #[test]
    fn test_default_view_is_empty() {
        let view = CartView::default();
        assert!(view.is_empty());
        assert_eq!(view.total, "₹0");
        assert!(!view.is_open);
    }
}
