//! Offset pagination primitives shared by list endpoints.
//!
//! Pages are 1-indexed. A [`PageRequest`] pairs a [`PageNumber`] with a fixed
//! page size and derives the store offset; a [`Page`] carries one slice of
//! results together with the last page number computed from the total count
//! observed in the same read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised when building a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size of zero cannot address any rows.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// A 1-indexed page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Construct a page number, rejecting zero.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        if page == 0 { None } else { Some(Self(page)) }
    }

    /// Parse a raw query value, falling back to the first page.
    ///
    /// Missing, non-numeric, zero and negative inputs all resolve to page 1
    /// so a malformed `page` parameter never fails a listing.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::parse_or_first(Some("3")).get(), 3);
    /// assert_eq!(PageNumber::parse_or_first(Some("abc")).get(), 1);
    /// assert_eq!(PageNumber::parse_or_first(None).get(), 1);
    /// ```
    #[must_use]
    pub fn parse_or_first(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<u32>().ok())
            .and_then(Self::new)
            .unwrap_or_else(Self::first)
    }

    /// Numeric value of the page.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

impl TryFrom<u32> for PageNumber {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("page number must be at least 1")
    }
}

/// A request for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: PageNumber,
    page_size: u32,
}

impl PageRequest {
    /// Build a request for `page` with `page_size` rows per page.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `page_size` is zero.
    pub const fn new(page: PageNumber, page_size: u32) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Rows per page; used as the store `LIMIT`.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before the page starts: `(page - 1) * page_size`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageNumber, PageRequest};
    ///
    /// let request = PageRequest::new(PageNumber::new(3).unwrap(), 5).unwrap();
    /// assert_eq!(request.offset(), 10);
    /// ```
    #[must_use]
    pub fn offset(&self) -> u64 {
        // Both factors fit in u32 so the product cannot overflow u64.
        u64::from(self.page.get() - 1) * u64::from(self.page_size)
    }

    /// Last page number for `total` rows: `ceil(total / page_size)`.
    ///
    /// Returns zero when there are no rows.
    #[must_use]
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size))
    }
}

/// One page of results plus the navigation metadata derived from the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page, at most `page_size` of them.
    pub items: Vec<T>,
    /// Page number that was requested.
    pub page: u32,
    /// Highest page number that holds rows.
    pub last_page: u64,
}

impl<T> Page<T> {
    /// Assemble a page from a request, its rows and the matching total count.
    #[must_use]
    pub fn new(request: &PageRequest, items: Vec<T>, total: u64) -> Self {
        Self {
            items,
            page: request.page().get(),
            last_page: request.last_page(total),
        }
    }

    /// Convert the items while keeping the navigation metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            last_page: self.last_page,
        }
    }
}
