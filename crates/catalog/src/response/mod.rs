//! Response envelopes shared by every endpoint.
//!
//! Every JSON body is an [`ApiResponse`]. List and search results nest a
//! [`PagedResult`] inside `data`.

pub mod dto;

pub use dto::{CategoryDto, CategoryLabel, GlobalSearchResult, LaborCategoryDto, MaterialDto};

use serde::Serialize;

use crate::search::types::SearchPage;

/// Uniform success/error wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Failed response without data.
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

/// Pagination envelope for list and search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub results: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl<T> From<SearchPage<T>> for PagedResult<T> {
    fn from(page: SearchPage<T>) -> Self {
        let total_pages = page.total_pages();
        Self {
            results: page.items,
            total_count: page.total_count,
            page: page.window.page,
            page_size: page.window.page_size,
            total_pages,
        }
    }
}
