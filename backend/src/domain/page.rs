//! Limit/skip pagination primitives shared by every listing operation.
//!
//! The store sorts by creation time descending before the window is applied;
//! `total` on [`PageOf`] always reflects the filter alone so callers can
//! render page controls.

use serde::Deserialize;

/// Default page size when the caller does not supply `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Pagination window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Maximum number of items returned.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of matching items skipped before the window starts.
    #[serde(default)]
    pub skip: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

/// A page of items together with the total matching count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOf<T> {
    /// Items inside the requested window.
    pub items: Vec<T>,
    /// Count of all items matching the filter, ignoring the window.
    pub total: u64,
}
