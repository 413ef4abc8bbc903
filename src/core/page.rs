//! Pagination parameters and the paged result envelope

use serde::{Deserialize, Serialize};

/// Sortable voucher attributes.
///
/// Ties are always broken by `voucher_id` ascending so that repeated
/// `find_all` calls paginate deterministically across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
    ExpirationAt,
    DiscountValue,
    Quantity,
}

/// Sort direction for a [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Pagination parameters for a listing query.
///
/// Pages are zero-based. A size of zero is clamped to one rather than
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort_key: SortKey,
    sort_direction: SortDirection,
}

impl PageRequest {
    /// A request for the given zero-based page, sorted by creation time
    /// ascending.
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort_key: SortKey::CreatedAt,
            sort_direction: SortDirection::Ascending,
        }
    }

    /// Replace the sort key and direction.
    pub fn sorted_by(mut self, sort_key: SortKey, sort_direction: SortDirection) -> Self {
        self.sort_key = sort_key;
        self.sort_direction = sort_direction;
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Page size, clamped to a minimum of 1.
    pub fn size(&self) -> usize {
        self.size.max(1)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Number of records to skip before this page starts.
    pub fn offset(&self) -> usize {
        self.page * self.size()
    }
}

/// The paged result envelope returned by `find_all`.
///
/// Totals are computed over the filtered set, not the whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// The page slice, at most `size` items
    pub items: Vec<T>,

    /// The zero-based page these items belong to
    pub page: usize,

    /// The requested page size
    pub size: usize,

    /// Count of all records matching the filter
    pub total_elements: usize,

    /// `ceil(total_elements / size)`; zero when nothing matched
    pub total_pages: usize,
}

impl<T> PageResult<T> {
    /// Assemble a page from a slice of the filtered set.
    pub fn new(items: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        let size = request.size();
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            items,
            page: request.page(),
            size,
            total_elements,
            total_pages,
        }
    }

    /// An empty result for a filter that matched nothing.
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0 && self.total_pages > 0
    }

    /// Map the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
