//! Listing query parameters and pagination arithmetic.
//!
//! This module turns the loosely-typed `page`/`limit`/`sort` query string into
//! a `FindQuery` window for the store, and computes the pagination block
//! returned alongside each page.

use folio_adapters::{FindQuery, SortOrder};
use serde::{Deserialize, Serialize};

use crate::services::validation::ValidationError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset the document store accepts (it takes a signed 64-bit skip).
pub const MAX_SKIP: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PageRequest {
    /// Page 0 is treated as page 1 and the limit is clamped to `1..=MAX_LIMIT`.
    pub fn from_params(params: &ListParams) -> Result<Self, ValidationError> {
        let sort = match params.sort.as_deref() {
            None | Some("") => SortOrder::default(),
            Some(raw) => SortOrder::parse(raw).ok_or_else(|| {
                ValidationError::single("sort", format!("unsupported sort order '{raw}'"))
            })?,
        };

        Ok(Self {
            page: params.page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            sort,
        })
    }

    pub fn find_query(&self) -> FindQuery {
        FindQuery {
            skip: (self.page - 1).saturating_mul(self.limit).min(MAX_SKIP),
            limit: self.limit,
            sort: self.sort,
        }
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            pages: total.div_ceil(self.limit),
        }
    }
}
