//! Cart configuration: storage keys and notification presentation.
//!
//! The defaults match the storage layout pages already have in the wild:
//! - `cart` - serialized array of cart items
//! - `product_<id>` - per-item quantity mirror

use crate::types::{Notice, NoticeKind};

/// Default storage key of the cart snapshot.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Default prefix of the per-item counter keys.
pub const DEFAULT_COUNTER_PREFIX: &str = "product_";

/// Default toast duration.
pub const DEFAULT_NOTICE_DURATION_MS: u32 = 2000;

/// Text and color of one notice kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeStyle {
    pub message: String,
    pub color: String,
}

impl NoticeStyle {
    fn new(message: &str, color: &str) -> Self {
        Self {
            message: message.to_string(),
            color: color.to_string(),
        }
    }
}

/// Cart engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key holding the serialized cart.
    pub cart_key: String,
    /// Prefix of the per-item counter keys.
    pub counter_prefix: String,
    /// How long toasts stay visible.
    pub notice_duration_ms: u32,
    pub added: NoticeStyle,
    pub removed: NoticeStyle,
    pub cleared: NoticeStyle,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            cart_key: DEFAULT_CART_KEY.to_string(),
            counter_prefix: DEFAULT_COUNTER_PREFIX.to_string(),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            added: NoticeStyle::new("Товар добавлен в корзину", "#4CAF50"),
            removed: NoticeStyle::new("Товар удален из корзины", "#FF0000"),
            cleared: NoticeStyle::new("Корзина очищена", "#ff006e"),
        }
    }
}

impl CartConfig {
    /// Override the toast duration.
    #[must_use]
    pub const fn with_notice_duration(mut self, duration_ms: u32) -> Self {
        self.notice_duration_ms = duration_ms;
        self
    }

    /// Build the notice for `kind`.
    #[must_use]
    pub fn notice(&self, kind: NoticeKind) -> Notice {
        let style = match kind {
            NoticeKind::Added => &self.added,
            NoticeKind::Removed => &self.removed,
            NoticeKind::Cleared => &self.cleared,
        };
        Notice {
            kind,
            message: style.message.clone(),
            duration_ms: self.notice_duration_ms,
            color: style.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = CartConfig::default();
        assert_eq!(config.cart_key, "cart");
        assert_eq!(config.counter_prefix, "product_");
    }

    #[test]
    fn test_notice_uses_kind_style() {
        let config = CartConfig::default().with_notice_duration(500);
        let notice = config.notice(NoticeKind::Cleared);
        assert_eq!(notice.kind, NoticeKind::Cleared);
        assert_eq!(notice.color, "#ff006e");
        assert_eq!(notice.duration_ms, 500);
    }
}
