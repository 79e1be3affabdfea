/// Number of products shown before the first "load more".
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// What: "Load more" pagination over a filtered list.
///
/// Inputs:
/// - `page_size` from settings; `load_more` and `reset` from user actions.
///
/// Output:
/// - `visible_count(len)` items of the sorted/filtered list are shown.
///
/// Details:
/// - The requested count starts at one page and grows by one page per `load_more`,
///   never past `max(page_size, len)`. The exposed count is additionally capped at `len`,
///   so it never exceeds the filtered length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    requested: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            requested: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to the first page; called on every filter, sort or search change.
    pub fn reset(&mut self) {
        self.requested = self.page_size;
    }

    /// Show one more page of a list with `filtered_len` items.
    pub fn load_more(&mut self, filtered_len: usize) {
        let ceiling = filtered_len.max(self.page_size);
        self.requested = (self.requested + self.page_size).min(ceiling);
    }

    pub fn visible_count(&self, filtered_len: usize) -> usize {
        self.requested.min(filtered_len)
    }

    pub fn can_load_more(&self, filtered_len: usize) -> bool {
        self.visible_count(filtered_len) < filtered_len
    }
}
