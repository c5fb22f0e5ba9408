//! Cart row markup.

use askama::Template;

use bozor_core::CartView;

/// Cart rows fragment written into the cart list.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
}

/// Render the rows of `view`.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_rows(view: &CartView) -> askama::Result<String> {
    CartItemsTemplate { cart: view }.render()
}
