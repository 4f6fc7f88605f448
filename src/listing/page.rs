//! Page requests, page sizes and result pages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::listing::criteria::ValidationError;

/// The page sizes offered by the page-size selector.
pub const ALLOWED_PAGE_SIZES: [usize; 5] = [10, 25, 50, 75, 100];

/// Number of rows per page, restricted to [`ALLOWED_PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const DEFAULT: Self = Self(10);

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// The next allowed size, wrapping from the largest back to the smallest.
    #[must_use]
    pub fn cycle_next(self) -> Self {
        let idx = ALLOWED_PAGE_SIZES
            .iter()
            .position(|&s| s == self.0)
            .unwrap_or(0);
        Self(ALLOWED_PAGE_SIZES[(idx + 1) % ALLOWED_PAGE_SIZES.len()])
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if ALLOWED_PAGE_SIZES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidPageSize(value))
        }
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-based page number together with the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: usize,
    pub size: PageSize,
}

impl PageRequest {
    #[must_use]
    pub const fn first(size: PageSize) -> Self {
        Self { number: 1, size }
    }

    /// Offset of the first row of this page into the full result set.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.number.saturating_sub(1)) * self.size.get()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(PageSize::DEFAULT)
    }
}

/// How an entity's list endpoint is paginated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStrategy {
    /// The backend slices and counts; every page change is a request.
    Server,
    /// The whole collection is fetched once per filter application, then
    /// filtered, sorted and sliced in memory.
    FetchAllLocal,
}

/// Number of pages needed for `total_count` rows. Never less than one.
#[must_use]
pub const fn total_pages(total_count: usize, size: PageSize) -> usize {
    let pages = total_count.div_ceil(size.get());
    if pages == 0 { 1 } else { pages }
}

/// One materialised page of entities.
///
/// Always replaced wholesale, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<E> {
    pub items: Vec<E>,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<E> ResultPage<E> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 1,
        }
    }

    /// A page produced by the server. `total_count` is raised to at least the
    /// number of returned items and the items are truncated to the page size.
    #[must_use]
    pub fn from_server(mut items: Vec<E>, total_count: usize, size: PageSize) -> Self {
        items.truncate(size.get());
        let total_count = total_count.max(items.len());
        Self {
            items,
            total_count,
            total_pages: total_pages(total_count, size),
        }
    }

    /// A page cut out of a fully fetched set.
    #[must_use]
    pub fn from_slice(all: &[E], page: PageRequest) -> Self
    where
        E: Clone,
    {
        let items = all
            .iter()
            .skip(page.offset())
            .take(page.size.get())
            .cloned()
            .collect();
        Self {
            items,
            total_count: all.len(),
            total_pages: total_pages(all.len(), page.size),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<E> Default for ResultPage<E> {
    fn default() -> Self {
        Self::empty()
    }
}
