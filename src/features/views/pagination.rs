use serde::{Deserialize, Serialize};

use crate::shared::constants::MAX_PAGE_SIZE;

/// Pagination metadata for a derived page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PageMeta {
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let clamped_page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let total_pages = total_items.div_ceil(clamped_page_size);
        Self {
            page: page.max(1),
            page_size: clamped_page_size,
            total_items,
            total_pages,
        }
    }
}

/// Slice one page out of a filtered+sorted sequence (1-indexed pages).
///
/// Pages past the end come back empty rather than failing.
pub fn paginate<'a, T>(items: &[&'a T], page: usize, page_size: usize) -> (Vec<&'a T>, PageMeta) {
    let meta = PageMeta::new(page, page_size, items.len());

    let start = (meta.page - 1).saturating_mul(meta.page_size);
    let slice = if start >= items.len() {
        Vec::new()
    } else {
        let end = (start + meta.page_size).min(items.len());
        items[start..end].to_vec()
    };

    (slice, meta)
}
