use std::fmt;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Zero-based page index and a positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub index: u32,
    pub size: u32,
}

impl PageRequest {
    /// A zero size is bumped to one.
    pub fn new(index: u32, size: u32) -> Self {
        Self {
            index,
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn with_index(self, index: u32) -> Self {
        Self { index, ..self }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Clamps `index` into `[0, total_pages - 1]` when the page count is known.
pub fn clamp_index(index: u32, total_pages: Option<u32>) -> u32 {
    match total_pages {
        Some(total) => index.min(total.saturating_sub(1)),
        None => index,
    }
}

/// "Showing X to Y of Z", computed from the request and the reported total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub from: u64,
    pub to: u64,
    pub total: u64,
}

impl PageSummary {
    pub fn new(page: PageRequest, total_elements: u64) -> Self {
        let offset = page.index as u64 * page.size as u64;
        if offset >= total_elements {
            return Self {
                from: 0,
                to: 0,
                total: total_elements,
            };
        }
        Self {
            from: offset + 1,
            to: (offset + page.size as u64).min(total_elements),
            total: total_elements,
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} to {} of {}", self.from, self.to, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_middle_page() {
        let summary = PageSummary::new(PageRequest::new(1, 10), 25);
        assert_eq!(summary.to_string(), "Showing 11 to 20 of 25");
    }

    #[test]
    fn test_summary_last_partial_page() {
        let summary = PageSummary::new(PageRequest::new(2, 10), 25);
        assert_eq!(summary.to_string(), "Showing 21 to 25 of 25");
    }

    #[test]
    fn test_summary_empty_result() {
        let summary = PageSummary::new(PageRequest::first(10), 0);
        assert_eq!(summary.to_string(), "Showing 0 to 0 of 0");
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(7, Some(3)), 2);
        assert_eq!(clamp_index(1, Some(3)), 1);
        assert_eq!(clamp_index(4, Some(0)), 0);
        assert_eq!(clamp_index(9, None), 9);
    }

    #[test]
    fn test_zero_size_is_bumped() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }
}
