//! Pagination types for the service layer
//!
//! `PageRequest` is validated on construction; `Page` carries one slice of
//! an ordered result plus the totals needed to address its neighbours.

use crate::errors::ServiceError;

/// Page size ceiling used when none is configured
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

/// Validated pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page_index: u64,
    /// items per page, within `1..=max`
    pub page_size: u64,
}

impl PageRequest {
    /// Reject sizes outside `1..=max_page_size` instead of clamping them.
    pub fn new(page_index: u64, page_size: u64, max_page_size: u64) -> Result<Self, ServiceError> {
        if page_size == 0 {
            return Err(ServiceError::Validation("page size must be at least 1".into()));
        }
        if page_size > max_page_size {
            return Err(ServiceError::Validation(format!(
                "page size {} exceeds the maximum of {}",
                page_size, max_page_size
            )));
        }
        Ok(Self { page_index, page_size })
    }
}

/// A bounded slice of an ordered collection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page_index: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            page_index: self.page_index,
        }
    }
}

/// `ceil(total / size)`; zero items means zero pages.
pub fn total_pages(total_elements: u64, page_size: u64) -> u64 {
    if page_size == 0 { 0 } else { total_elements.div_ceil(page_size) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_oversized_pages() {
        assert!(matches!(PageRequest::new(0, 0, 100), Err(ServiceError::Validation(_))));
        assert!(matches!(PageRequest::new(0, 101, 100), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn accepts_bounds() {
        assert_eq!(PageRequest::new(3, 1, 100).unwrap(), PageRequest { page_index: 3, page_size: 1 });
        assert_eq!(PageRequest::new(0, 100, 100).unwrap().page_size, 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn map_keeps_totals() {
        let p = Page { items: vec![1, 2], total_pages: 4, total_elements: 7, page_index: 1 };
        let q = p.map(|x| x * 10);
        assert_eq!(q.items, vec![10, 20]);
        assert_eq!((q.total_pages, q.total_elements, q.page_index), (4, 7, 1));
    }
}
