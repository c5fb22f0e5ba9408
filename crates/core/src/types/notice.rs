//! Transient notifications shown after cart changes.

use serde::{Deserialize, Serialize};

/// What a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// An item was added or its quantity changed through an add control.
    Added,
    /// An item was removed.
    Removed,
    /// The whole cart was cleared.
    Cleared,
}

/// A toast message with its presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration_ms: u32,
    /// CSS color of the toast background.
    pub color: String,
}
