//! Page requests and page results for repository listings

use serde::Serialize;
use thiserror::Error;

/// Largest page a caller may ask for
pub const MAX_PAGE_SIZE: u32 = 2000;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PagingError {
    #[error("size must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
    InvalidSize(u32),

    #[error("Invalid sort direction '{0}'. Expected 'asc' or 'desc'")]
    InvalidDirection(String),

    #[error("No sortable property '{0}'")]
    InvalidSortProperty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse of `asc` / `desc`
    pub fn parse(value: &str) -> Result<Self, PagingError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PagingError::InvalidDirection(value.to_string())),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A zero-based page request sorted by one or more properties of type `S`
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest<S> {
    page: u32,
    size: u32,
    sort: Vec<S>,
    direction: SortDirection,
}

impl<S> PageRequest<S> {
    pub fn new(
        page: u32,
        size: u32,
        sort: Vec<S>,
        direction: SortDirection,
    ) -> Result<Self, PagingError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PagingError::InvalidSize(size));
        }

        Ok(Self {
            page,
            size,
            sort,
            direction,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &[S] {
        &self.sort
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Number of rows to skip before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One slice of a sorted listing plus the totals needed to navigate it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new<S>(content: Vec<T>, request: &PageRequest<S>, total_elements: u64) -> Self {
        let size = request.size();

        Self {
            content,
            size,
            number: request.page(),
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(size)),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            size: self.size,
            number: self.number,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
