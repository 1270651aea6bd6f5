//! Pagination and sorting value objects.

use serde::Serialize;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc` (case-insensitive). Anything else sorts ascending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// A sortable column of an entity.
///
/// Implementors map API field names onto a fixed set of column names, so the
/// column can be written into SQL text without binding.
pub trait SortField: Sized + Copy + Send + Sync {
    /// Parse an API field name (camelCase) or a column name (snake_case).
    fn parse(name: &str) -> Option<Self>;

    /// Column the field is stored in.
    fn column(&self) -> &'static str;
}

/// Zero-based page request with ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub page_number: u32,
    pub page_size: u32,
    pub sort_by: F,
    pub direction: SortDirection,
}

impl<F> PageRequest<F> {
    pub fn new(page_number: u32, page_size: u32, sort_by: F, direction: SortDirection) -> Self {
        Self {
            page_number,
            page_size,
            sort_by,
            direction,
        }
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new<F>(data: Vec<T>, request: &PageRequest<F>, total_elements: i64) -> Self {
        Self {
            data,
            page_number: request.page_number,
            page_size: request.page_size,
            total_elements,
            total_pages: total_pages(total_elements, request.page_size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / page_size)`; zero elements means zero pages.
pub fn total_pages(total_elements: i64, page_size: u32) -> i64 {
    if page_size == 0 || total_elements <= 0 {
        return 0;
    }
    let size = i64::from(page_size);
    (total_elements + size - 1) / size
}

/// Case-insensitive substring match used by in-process filtering.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
