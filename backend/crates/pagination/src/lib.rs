//! Page-number pagination primitives shared by backend endpoints.
//!
//! Endpoints that slice collections into fixed-size pages use these types so
//! that page arithmetic and envelope metadata live in one place. The envelope
//! carries the total record count, which is what pagination controls need to
//! render page links.

use serde::Serialize;

/// Errors raised when constructing pagination values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers are 1-based; zero does not address a page.
    #[error("page number must be at least 1")]
    ZeroPageNumber,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// One-based page number.
///
/// # Examples
/// ```
/// use pagination::PageNumber;
///
/// assert_eq!(PageNumber::FIRST.get(), 1);
/// assert!(PageNumber::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Validate and construct a page number.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageNumber`] when `number` is zero.
    pub const fn new(number: u32) -> Result<Self, PaginationError> {
        if number == 0 {
            return Err(PaginationError::ZeroPageNumber);
        }
        Ok(Self(number))
    }

    /// Coerce arbitrary caller input to an addressable page.
    ///
    /// Zero becomes the first page; every other value is taken as-is. Use
    /// this at inbound edges where out-of-range input should browse rather
    /// than error.
    #[must_use]
    pub const fn saturating_from(number: u32) -> Self {
        if number == 0 { Self::FIRST } else { Self(number) }
    }

    /// The raw 1-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// A request for one fixed-size slice of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: PageNumber,
    size: u32,
}

impl PageRequest {
    /// Construct a request for the given page with the given page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    pub const fn new(number: PageNumber, size: u32) -> Result<Self, PaginationError> {
        if size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { number, size })
    }

    /// The requested page number.
    #[must_use]
    pub const fn number(self) -> PageNumber {
        self.number
    }

    /// The number of items per page.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Zero-based record offset of the first item on this page, sized for
    /// SQL `OFFSET` clauses.
    #[must_use]
    pub const fn offset(self) -> i64 {
        (self.number.get() as i64 - 1) * self.size as i64
    }

    /// Record limit for SQL `LIMIT` clauses.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.size as i64
    }
}

/// One slice of a collection plus the metadata pagination controls need.
///
/// # Examples
/// ```
/// use pagination::{Page, PageNumber, PageRequest};
///
/// let request = PageRequest::new(PageNumber::FIRST, 6)?;
/// let page = Page::new(vec!["a", "b"], request, 14);
/// assert_eq!(page.items().len(), 2);
/// assert_eq!(page.total_pages(), 3);
/// # Ok::<(), pagination::PaginationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    per_page: u32,
    total: u64,
}

impl<T> Page<T> {
    /// Wrap one slice of results in the pagination envelope.
    ///
    /// `total` is the number of records matching the query across all pages,
    /// not the length of `items`.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.number().get(),
            per_page: request.size(),
            total,
        }
    }

    /// An empty page for the given request.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the envelope, yielding the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based number of this page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size the slice was produced with.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total matching records across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages needed to cover `total` records.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page as u64)
    }

    /// Transform the items while keeping the envelope metadata.
    #[must_use]
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(transform).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn request(number: u32, size: u32) -> PageRequest {
        let page_number = match PageNumber::new(number) {
            Ok(value) => value,
            Err(error) => panic!("fixture page number: {error}"),
        };
        match PageRequest::new(page_number, size) {
            Ok(value) => value,
            Err(error) => panic!("fixture page request: {error}"),
        }
    }

    #[rstest]
    fn zero_page_number_is_rejected() {
        assert_eq!(PageNumber::new(0), Err(PaginationError::ZeroPageNumber));
    }

    #[rstest]
    fn zero_page_size_is_rejected() {
        assert_eq!(
            PageRequest::new(PageNumber::FIRST, 0),
            Err(PaginationError::ZeroPageSize)
        );
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(7, 7)]
    fn saturating_from_coerces_zero_to_first_page(#[case] input: u32, #[case] expected: u32) {
        assert_eq!(PageNumber::saturating_from(input).get(), expected);
    }

    #[rstest]
    #[case(1, 6, 0)]
    #[case(2, 6, 6)]
    #[case(5, 3, 12)]
    fn offset_addresses_the_first_item_of_the_page(
        #[case] number: u32,
        #[case] size: u32,
        #[case] expected: i64,
    ) {
        let slice = request(number, size);
        assert_eq!(slice.offset(), expected);
        assert_eq!(slice.limit(), i64::from(size));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(6, 1)]
    #[case(7, 2)]
    #[case(14, 3)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] expected: u64) {
        let page: Page<u8> = Page::new(Vec::new(), request(1, 6), total);
        assert_eq!(page.total_pages(), expected);
    }

    #[rstest]
    fn map_preserves_envelope_metadata() {
        let page = Page::new(vec![1_u8, 2, 3], request(2, 3), 9);
        let mapped = page.map(|item| item * 10);

        assert_eq!(mapped.items(), &[10, 20, 30]);
        assert_eq!(mapped.page(), 2);
        assert_eq!(mapped.per_page(), 3);
        assert_eq!(mapped.total(), 9);
    }

    #[rstest]
    fn envelope_serialises_in_camel_case() {
        let page = Page::new(vec!["x"], request(1, 6), 1);
        let json = match serde_json::to_value(&page) {
            Ok(value) => value,
            Err(error) => panic!("serialise page: {error}"),
        };

        assert_eq!(json["page"], 1);
        assert_eq!(json["perPage"], 6);
        assert_eq!(json["total"], 1);
        assert_eq!(json["items"][0], "x");
    }

    #[rstest]
    fn empty_page_has_no_items() {
        let page: Page<u8> = Page::empty(request(3, 6));
        assert!(page.items().is_empty());
        assert_eq!(page.page(), 3);
        assert_eq!(page.total(), 0);
    }
}
