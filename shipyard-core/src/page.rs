//! Pagination of ordered ship collections.

use crate::domain::Ship;

/// Page size used when a request omits one.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Zero-based page selection; absent values fall back to defaults.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_number: Option<usize>,
    /// Number of ships per page.
    pub page_size: Option<usize>,
}

impl PageRequest {
    /// Build a request for an explicit page.
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    /// Effective page index.
    pub fn number(&self) -> usize {
        self.page_number.unwrap_or(0)
    }

    /// Effective page size.
    pub fn size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// Take one page out of `ships`.
///
/// The window is `[number * size, number * size + size)` clamped to the
/// collection; a start past the end yields an empty page.
pub fn paginate(ships: Vec<Ship>, page: &PageRequest) -> Vec<Ship> {
    let size = page.size();
    let from = page.number().saturating_mul(size);
    if from >= ships.len() {
        return Vec::new();
    }
    ships.into_iter().skip(from).take(size).collect()
}
