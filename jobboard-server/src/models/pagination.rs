//! Pagination types for the job search window

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page a single request may ask for
pub const MAX_LIMIT: i64 = 500;

/// Page window (limit/offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    /// Build a window from optional inputs.
    ///
    /// Missing or negative values fall back to the defaults (50, 0); the
    /// limit is capped at `MAX_LIMIT`.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if l >= 0 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        };
        let offset = match offset {
            Some(o) if o >= 0 => o,
            _ => 0,
        };
        Self { limit, offset }
    }

    /// Apply the window to an already filtered and ordered sequence.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A page of results plus the size of the full result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items inside the window
    pub items: Vec<T>,
    /// Total matching records, independent of the window
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let w = PageWindow::default();
        assert_eq!(w.limit, 50);
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn negative_falls_back_to_default() {
        let w = PageWindow::new(Some(-5), Some(-1));
        assert_eq!(w, PageWindow::default());
    }

    #[test]
    fn caps_limit() {
        assert_eq!(PageWindow::new(Some(10_000), None).limit, MAX_LIMIT);
        assert_eq!(PageWindow::new(Some(0), None).limit, 0);
    }

    #[test]
    fn slice_window() {
        let w = PageWindow::new(Some(2), Some(1));
        assert_eq!(w.slice(vec![1, 2, 3, 4]), vec![2, 3]);

        let past_end = PageWindow::new(Some(2), Some(10));
        assert!(past_end.slice(vec![1, 2, 3]).is_empty());
    }
}
