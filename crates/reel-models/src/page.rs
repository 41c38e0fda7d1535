//! Pagination of stored records.

use serde::Serialize;

/// One page of a listing, newest records first.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub current_page: u32,
}

impl<T> Page<T> {
    /// Total page count for `total` records at `page_size` per page.
    pub fn page_count(total: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        total.div_ceil(page_size as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(Page::<()>::page_count(0, 5), 0);
        assert_eq!(Page::<()>::page_count(1, 5), 1);
        assert_eq!(Page::<()>::page_count(5, 5), 1);
        assert_eq!(Page::<()>::page_count(6, 5), 2);
        assert_eq!(Page::<()>::page_count(11, 5), 3);
        assert_eq!(Page::<()>::page_count(10, 0), 0);
    }
}
