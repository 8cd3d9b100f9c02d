//! Product dashboard SDK for Rust.
//!
//! Provides a high-level client for the product admin dashboard: paginated
//! product browsing with search and category filters, product create/update/
//! delete, the read-only category listing, and the analytics views computed
//! from the full product list. Reads go through an in-process query cache
//! that is persisted to disk for offline use.
//!
//! # Quick start
//!
//! ```no_run
//! use product_dashboard::{DashboardSdk, DashboardState};
//!
//! let sdk = DashboardSdk::builder().build().unwrap();
//!
//! // One page of the product table
//! let mut state = DashboardState::default();
//! state.set_category("smartphones");
//! let page = sdk.products().list(&state.list_params()).unwrap();
//!
//! // Analytics over every matching product
//! let (search, category) = state.insights_scope();
//! let report = sdk.insights(search, category).unwrap();
//! println!("{} products, avg rating {}", report.summary.total_products, report.summary.avg_rating);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod insights;
pub mod models;
pub mod pagination;
pub mod queries;
pub mod url_builder;
pub mod validation;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboardSdk;
pub use cache::{CacheManager, QueryKey};
pub use connection::Connection;
pub use error::{DashboardError, Result};
pub use models::ProductInsights;
pub use pagination::{DashboardState, PageInfo};
pub use url_builder::UrlBuilder;
pub use validation::{FieldError, ValidationErrors};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// DashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DashboardSdk`] instance.
///
/// Use [`DashboardSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardSdkBuilder::build) to create the SDK.
#[derive(Debug, Clone)]
pub struct DashboardSdkBuilder {
    base_url: String,
    cache_dir: Option<PathBuf>,
    offline: bool,
    persist: bool,
    timeout: Duration,
    stale_time: Duration,
    retries: u32,
    delay: Option<Duration>,
}

impl Default for DashboardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE_URL.to_string(),
            cache_dir: None,
            offline: false,
            persist: true,
            timeout: config::DEFAULT_TIMEOUT,
            stale_time: config::DEFAULT_STALE_TIME,
            retries: config::DEFAULT_RETRIES,
            delay: None,
        }
    }
}

impl DashboardSdkBuilder {
    /// Point the SDK at a different products endpoint.
    ///
    /// Defaults to `https://dummyjson.com/products`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/product-dashboard` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the API: reads are answered from
    /// previously cached results and mutations fail. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Write successful reads to the cache directory. Defaults to `true`.
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a read is reused before it is fetched again.
    ///
    /// Defaults to 5 minutes.
    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    /// Extra attempts for reads that fail at the transport level or with a
    /// server error. Defaults to 1.
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Ask the API to delay read responses (DummyJSON's `delay` parameter),
    /// useful for exercising loading states. Off by default.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Build the SDK, validating the base URL and creating the cache
    /// directory. No request is made until the first query.
    pub fn build(self) -> Result<DashboardSdk> {
        let mut cache = CacheManager::new(self.cache_dir, self.offline, self.timeout)?;
        cache.persist = self.persist;
        cache.set_stale_time(self.stale_time);
        cache.set_retries(self.retries);
        let conn = Connection::new(cache, &self.base_url, self.delay)?;
        tracing::debug!(base_url = %conn.base_url(), offline = self.offline, "dashboard SDK ready");
        Ok(DashboardSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// DashboardSdk
// ---------------------------------------------------------------------------

/// The main entry point for the product dashboard SDK.
///
/// Wraps a [`Connection`] (which owns the [`CacheManager`] and HTTP client)
/// and exposes the query interfaces as lightweight borrowing wrappers.
///
/// Created via [`DashboardSdk::builder()`].
pub struct DashboardSdk {
    conn: Connection,
}

impl DashboardSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DashboardSdkBuilder {
        DashboardSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the product query interface.
    ///
    /// Returns a lightweight wrapper that borrows from the underlying
    /// connection and provides listing, lookup and CRUD methods.
    pub fn products(&self) -> queries::products::ProductQuery<'_> {
        queries::products::ProductQuery::new(&self.conn)
    }

    /// Access the category query interface.
    pub fn categories(&self) -> queries::categories::CategoryQuery<'_> {
        queries::categories::CategoryQuery::new(&self.conn)
    }

    // -- Analytics ---------------------------------------------------------

    /// Compute the analytics views over every product matching the filters.
    ///
    /// The full, unpaginated list is fetched (or taken from the cache) and
    /// handed to [`ProductInsights::from_products`].
    pub fn insights(&self, search: Option<&str>, category: Option<&str>) -> Result<ProductInsights> {
        self.products().insights(search, category)
    }

    // -- Cache management --------------------------------------------------

    /// Drop every cached query so the next reads go to the API.
    pub fn refresh(&self) -> Result<()> {
        self.conn.cache.borrow_mut().clear()?;
        tracing::info!("query cache cleared");
        Ok(())
    }

    /// Consume the SDK and release all resources.
    pub fn close(self) {
        self.conn.cache.borrow_mut().close();
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DashboardSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.conn.cache.borrow();
        write!(
            f,
            "DashboardSdk(base_url={}, cache_dir={}, cached_queries={}, offline={})",
            self.conn.base_url(),
            cache.cache_dir.display(),
            cache.len(),
            cache.offline
        )
    }
}
