// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use serde::Serialize;

/// Sortable record fields. Anything outside the allow-list silently falls
/// back to `Id` rather than reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Amount,
    Date,
    Title,
}

impl SortField {
    pub fn from_param(s: &str) -> SortField {
        match s.to_lowercase().as_str() {
            "amount" => SortField::Amount,
            "date" => SortField::Date,
            "title" => SortField::Title,
            "id" => SortField::Id,
            _ => SortField::Id,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Amount => "amount",
            SortField::Date => "date",
            SortField::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn from_param(s: &str) -> SortDir {
        match s.to_lowercase().as_str() {
            "desc" => SortDir::Desc,
            _ => SortDir::Asc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// One page of a listing. No cursor, no retained state; every request is
/// independent.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> LedgerResult<PageRequest> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 {
            return Err(LedgerError::Validation(
                "page must be at least 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(LedgerError::Validation(
                "pageSize must be greater than 0".to_string(),
            ));
        }
        Ok(PageRequest { page, page_size })
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl PageMeta {
    /// `total_pages` is zero only for an empty result set; `PageRequest`
    /// already rejected a zero page size.
    pub fn new(total_items: u64, req: PageRequest) -> PageMeta {
        PageMeta {
            total_items,
            page: req.page,
            page_size: req.page_size,
            total_pages: total_items.div_ceil(req.page_size),
        }
    }
}
