//! Widget configuration.
//!
//! Defaults match the storefront templates. A page can override them with
//! attributes on `<body>`:
//! - `data-cart-init-delay` - first paint delay in ms (default: 300)
//! - `data-cart-notice-duration` - toast duration in ms (default: 2000)

use web_sys::Document;

use bozor_core::CartConfig;
use bozor_core::config::DEFAULT_NOTICE_DURATION_MS;

const DEFAULT_INIT_DELAY_MS: u32 = 300;

/// Element ids and timings used by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Badge with the total item count.
    pub item_count_id: String,
    /// Container the cart rows are rendered into.
    pub cart_list_id: String,
    /// Grand total element.
    pub total_price_id: String,
    /// Line total of the product shown on a product page.
    pub single_total_id: String,
    pub clear_button_id: String,
    pub delete_button_id: String,
    /// Delay before the first paint after start.
    pub init_delay_ms: u32,
    pub notice_duration_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            item_count_id: "itemCount".to_string(),
            cart_list_id: "cartList".to_string(),
            total_price_id: "totalPrice".to_string(),
            single_total_id: "totalSinglePriceUzs".to_string(),
            clear_button_id: "clearCartButton".to_string(),
            delete_button_id: "deleteFromCart".to_string(),
            init_delay_ms: DEFAULT_INIT_DELAY_MS,
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
        }
    }
}

impl WidgetConfig {
    /// Read overrides from `<body>` data attributes.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        document.body().map_or_else(Self::default, |body| {
            Self::from_lookup(|name| body.get_attribute(name))
        })
    }

    /// Apply overrides from an attribute lookup. Unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            init_delay_ms: parse_ms(lookup("data-cart-init-delay"), defaults.init_delay_ms),
            notice_duration_ms: parse_ms(
                lookup("data-cart-notice-duration"),
                defaults.notice_duration_ms,
            ),
            ..defaults
        }
    }

    /// Engine configuration derived from these settings.
    #[must_use]
    pub fn cart_config(&self) -> CartConfig {
        CartConfig::default().with_notice_duration(self.notice_duration_ms)
    }
}

fn parse_ms(raw: Option<String>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
