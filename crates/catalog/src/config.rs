//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::search::types::PageWindow;

/// Which store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// In-process store seeded with a demo catalog.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Store backend: "postgres" (default) or "memory".
    pub store_backend: StoreBackend,

    /// PostgreSQL connection URL. Required for the postgres backend.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Per-request timeout (default: 30 seconds).
    pub request_timeout: Duration,

    /// Bearer token guarding bulk operations. When None, the gate allows everything.
    pub admin_api_token: Option<String>,

    /// Paging and search term limits.
    pub limits: SearchLimits,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("STORE_BACKEND must be \"postgres\" or \"memory\", got {other:?}"),
        };

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL environment variable is required for the postgres backend");
        }

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let request_timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let admin_api_token = env::var("ADMIN_API_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let defaults = SearchLimits::default();

        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .map(|v| v.parse::<u32>().context("DEFAULT_PAGE_SIZE must be a valid u32"))
            .unwrap_or(Ok(defaults.default_page_size))?;

        let max_page_size = env::var("MAX_PAGE_SIZE")
            .map(|v| v.parse::<u32>().context("MAX_PAGE_SIZE must be a valid u32"))
            .unwrap_or(Ok(defaults.max_page_size))?;

        let max_term_len = env::var("SEARCH_TERM_MAX_LEN")
            .map(|v| v.parse::<usize>().context("SEARCH_TERM_MAX_LEN must be a valid usize"))
            .unwrap_or(Ok(defaults.max_term_len))?;

        let limits = SearchLimits::new(default_page_size, max_page_size, max_term_len)?;

        Ok(Self {
            port,
            store_backend,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            request_timeout: Duration::from_secs(request_timeout_secs),
            admin_api_token,
            limits,
        })
    }
}

/// Limits applied by the filter compiler.
///
/// Out-of-range paging values are clamped here, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Page size used when none is supplied (default: 20).
    pub default_page_size: u32,

    /// Largest accepted page size, also the cap on result limits and bulk batches (default: 100).
    pub max_page_size: u32,

    /// Search terms are truncated to this many characters (default: 100).
    pub max_term_len: usize,

    /// Result limit for popular and global listings (default: 10).
    pub default_result_limit: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            max_term_len: 100,
            default_result_limit: 10,
        }
    }
}

impl SearchLimits {
    /// Build limits, checking that the defaults fit inside the maximum.
    pub fn new(default_page_size: u32, max_page_size: u32, max_term_len: usize) -> Result<Self> {
        if max_page_size == 0 {
            anyhow::bail!("MAX_PAGE_SIZE must be at least 1");
        }
        if default_page_size == 0 || default_page_size > max_page_size {
            anyhow::bail!("DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE ({max_page_size})");
        }
        if max_term_len == 0 {
            anyhow::bail!("SEARCH_TERM_MAX_LEN must be at least 1");
        }

        Ok(Self {
            default_page_size,
            max_page_size,
            max_term_len,
            default_result_limit: SearchLimits::default().default_result_limit.min(max_page_size),
        })
    }

    /// Clamp raw `page`/`pageSize` values into a valid window.
    pub fn window(&self, page: Option<i64>, page_size: Option<i64>) -> PageWindow {
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));
        let page_size = page_size
            .unwrap_or(i64::from(self.default_page_size))
            .clamp(1, i64::from(self.max_page_size));

        // Both values are clamped into u32 range above.
        PageWindow::new(page as u32, page_size as u32)
    }

    /// Clamp a raw result `limit` for popular and global listings.
    pub fn result_limit(&self, limit: Option<i64>) -> u32 {
        limit
            .unwrap_or(i64::from(self.default_result_limit))
            .clamp(1, i64::from(self.max_page_size)) as u32
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults() {
        let limits = SearchLimits::default();
        let window = limits.window(None, None);
        assert_eq!(window.page, 1);
        assert_eq!(window.page_size, 20);
    }

    #[test]
    fn window_clamps_out_of_range_values() {
        let limits = SearchLimits::default();

        let window = limits.window(Some(0), Some(0));
        assert_eq!((window.page, window.page_size), (1, 1));

        let window = limits.window(Some(-5), Some(500));
        assert_eq!((window.page, window.page_size), (1, 100));

        let window = limits.window(Some(7), Some(100));
        assert_eq!((window.page, window.page_size), (7, 100));
    }

    #[test]
    fn result_limit_clamps() {
        let limits = SearchLimits::default();
        assert_eq!(limits.result_limit(None), 10);
        assert_eq!(limits.result_limit(Some(0)), 1);
        assert_eq!(limits.result_limit(Some(1000)), 100);
    }

    #[test]
    fn limits_reject_default_above_max() {
        assert!(SearchLimits::new(50, 20, 100).is_err());
        assert!(SearchLimits::new(0, 20, 100).is_err());
        assert!(SearchLimits::new(20, 20, 0).is_err());
    }

    #[test]
    fn small_max_caps_result_limit() {
        let limits = SearchLimits::new(5, 5, 100).unwrap();
        assert_eq!(limits.default_result_limit, 5);
    }
}
