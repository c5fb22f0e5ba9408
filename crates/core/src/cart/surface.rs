//! Presentation hooks driven by the cart engine.

use rust_decimal::Decimal;

use super::CartView;
use crate::types::Notice;

/// Where cart changes become visible.
///
/// After every mutation the engine calls, in order, [`badge`](Self::badge),
/// [`render`](Self::render) and then [`notify`](Self::notify) when the
/// operation produced a notice. State is already persisted by then.
pub trait CartSurface {
    /// Update the item-count badge.
    fn badge(&mut self, count: Decimal);

    /// Replace the cart list and total.
    fn render(&mut self, view: &CartView);

    /// Show a transient notice.
    fn notify(&mut self, notice: &Notice);
}

/// A surface that shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl CartSurface for NullSurface {
    fn badge(&mut self, _count: Decimal) {}

    fn render(&mut self, _view: &CartView) {}

    fn notify(&mut self, _notice: &Notice) {}
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Badge(Decimal),
    Render(CartView),
    Notify(Notice),
}

/// A surface that records every call, for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Notices shown so far.
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.events.iter().filter_map(|event| match event {
            SurfaceEvent::Notify(notice) => Some(notice),
            _ => None,
        })
    }

    /// The most recently rendered view.
    #[must_use]
    pub fn last_view(&self) -> Option<&CartView> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Render(view) => Some(view),
            _ => None,
        })
    }

    /// The most recent badge value.
    #[must_use]
    pub fn last_badge(&self) -> Option<Decimal> {
        self.events.iter().rev().find_map(|event| match event {
            SurfaceEvent::Badge(count) => Some(*count),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl CartSurface for RecordingSurface {
    fn badge(&mut self, count: Decimal) {
        self.events.push(SurfaceEvent::Badge(count));
    }

    fn render(&mut self, view: &CartView) {
        self.events.push(SurfaceEvent::Render(view.clone()));
    }

    fn notify(&mut self, notice: &Notice) {
        self.events.push(SurfaceEvent::Notify(notice.clone()));
    }
}
