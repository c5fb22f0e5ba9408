//! Page surface of the cart.

use rust_decimal::Decimal;
use web_sys::Document;

use bozor_core::{CartSurface, CartView, Notice, format_uzs};

use crate::config::WidgetConfig;
use crate::{dom, template, toast};

/// Selectors of the hidden input holding the product id on a product page.
const PAGE_PRODUCT_ID: [&str; 2] = [".productSingleId", ".productId"];

/// Writes cart state into the page.
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
    config: WidgetConfig,
}

impl DomSurface {
    #[must_use]
    pub const fn new(document: Document, config: WidgetConfig) -> Self {
        Self { document, config }
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    fn page_product_id(&self) -> Option<String> {
        PAGE_PRODUCT_ID
            .iter()
            .find_map(|selector| dom::input_value(&self.document, selector))
            .filter(|id| !id.is_empty())
    }

    /// Line total of the product this page shows. Left as is when the
    /// product is not in the cart.
    fn render_single_total(&self, view: &CartView) {
        let Some(id) = self.page_product_id() else {
            return;
        };
        if let Some(row) = view.rows.iter().find(|row| row.id == id) {
            dom::set_text_by_id(
                &self.document,
                &self.config.single_total_id,
                &format_uzs(row.line_total),
            );
        }
    }
}

impl CartSurface for DomSurface {
    fn badge(&mut self, count: Decimal) {
        dom::set_text_by_id(
            &self.document,
            &self.config.item_count_id,
            &count.normalize().to_string(),
        );
    }

    fn render(&mut self, view: &CartView) {
        if let Some(list) = self.document.get_element_by_id(&self.config.cart_list_id) {
            match template::render_rows(view) {
                Ok(html) => list.set_inner_html(&html),
                Err(e) => dom::console_error(&format!("cart widget: cannot render rows: {e}")),
            }
        }
        dom::set_text_by_id(
            &self.document,
            &self.config.total_price_id,
            &view.total_display,
        );
        self.render_single_total(view);
    }

    fn notify(&mut self, notice: &Notice) {
        toast::show(&self.document, notice);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bozor_core::{Cart, NoticeKind};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn surface(markup: &str) -> DomSurface {
        let document = dom::document().unwrap();
        document.body().unwrap().set_inner_html(markup);
        DomSurface::new(document, WidgetConfig::default())
    }

    fn text(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn test_badge_writes_count() {
        let mut surface = surface(r#"<span id="itemCount"></span>"#);
        surface.badge(Decimal::new(250, 2));
        assert_eq!(text(surface.document(), "itemCount"), "2.5");
    }

    #[wasm_bindgen_test]
    fn test_render_empty_cart() {
        let mut surface =
            surface(r#"<div id="cartList"><p>old</p></div><span id="totalPrice">9</span>"#);
        surface.render(&CartView::from(&Cart::new()));
        assert_eq!(text(surface.document(), "totalPrice"), "0");
        assert!(dom::query_all(surface.document(), "#cartList .cart-modal-item").is_empty());
    }

    #[wasm_bindgen_test]
    fn test_notify_stacks_toasts() {
        let mut surface = surface("");
        let notice = WidgetConfig::default().cart_config().notice(NoticeKind::Added);
        surface.notify(&notice);
        surface.notify(&notice);
        assert_eq!(dom::query_all(surface.document(), ".bozor-toast").len(), 2);
    }
}
