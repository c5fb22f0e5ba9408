//! Terminal surface: cart changes go to the log.

use rust_decimal::Decimal;
use tracing::{debug, info};

use bozor_core::{CartSurface, CartView, Notice};

/// Logs badge updates and notices, keeping the notices of the current run.
#[derive(Debug, Default)]
pub struct LogSurface {
    notices: Vec<Notice>,
}

impl LogSurface {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notices: Vec::new(),
        }
    }

    /// Notices raised so far.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl CartSurface for LogSurface {
    fn badge(&mut self, count: Decimal) {
        debug!(count = %count.normalize(), "Badge updated");
    }

    fn render(&mut self, view: &CartView) {
        debug!(lines = view.item_count, total = %view.total_display, "Cart rendered");
    }

    fn notify(&mut self, notice: &Notice) {
        info!(kind = ?notice.kind, "{}", notice.message);
        self.notices.push(notice.clone());
    }
}
