//! Async wrapper around [`DashboardSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the API.
//!
//! # Example
//!
//! ```no_run
//! use product_dashboard::AsyncDashboardSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncDashboardSdk::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let categories = sdk.run(|s| s.categories().names()).await.unwrap();
//!
//!     // Convenience method for the analytics views
//!     let report = sdk.insights(None, None).await.unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{DashboardError, Result};
use crate::models::ProductInsights;
use crate::{DashboardSdk, DashboardSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncDashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboardSdk`] instance.
///
/// Accepts the same options as [`DashboardSdkBuilder`].
#[derive(Default)]
pub struct AsyncDashboardSdkBuilder {
    inner: DashboardSdkBuilder,
}

impl AsyncDashboardSdkBuilder {
    /// Point the SDK at a different products endpoint.
    pub fn base_url(mut self, url: &str) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.cache_dir(path);
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.inner = self.inner.offline(offline);
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// How long a read is reused before it is fetched again.
    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.inner = self.inner.stale_time(stale_time);
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncDashboardSdk> {
        let builder = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = builder.build()?;
            Ok(AsyncDashboardSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboardSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DashboardSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`DashboardSdk`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncDashboardSdk {
    inner: Arc<Mutex<DashboardSdk>>,
}

impl AsyncDashboardSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDashboardSdkBuilder {
        AsyncDashboardSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&DashboardSdk` reference and should return
    /// a `Result<T>`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use product_dashboard::AsyncDashboardSdk;
    /// # use product_dashboard::queries::ListProductsParams;
    /// # async fn example() -> product_dashboard::Result<()> {
    /// # let sdk = AsyncDashboardSdk::builder().build().await?;
    /// let page = sdk.run(|s| {
    ///     s.products().list(&ListProductsParams::default())
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DashboardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Compute the analytics views asynchronously.
    pub async fn insights(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<ProductInsights> {
        let search = search.map(str::to_string);
        let category = category.map(str::to_string);
        self.run(move |s| s.insights(search.as_deref(), category.as_deref()))
            .await
    }

    /// Drop every cached query.
    pub async fn refresh(&self) -> Result<()> {
        self.run(|s| s.refresh()).await
    }
}
