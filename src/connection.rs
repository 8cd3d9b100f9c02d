//! Connection to the products API.
//!
//! Binds the [`CacheManager`] to a base URL and turns query-level calls
//! (typed reads, mutations, invalidation) into cache and HTTP operations.

use std::cell::RefCell;
use std::time::Duration;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{CacheManager, QueryKey};
use crate::error::{DashboardError, Result};
use crate::url_builder::UrlBuilder;

/// API endpoint plus the query cache that fronts it.
pub struct Connection {
    /// The cache manager that performs and caches requests.
    pub cache: RefCell<CacheManager>,
    base_url: Url,
    delay: Option<Duration>,
}

impl Connection {
    /// Create a connection to `base_url` backed by the given cache.
    ///
    /// The base URL must be an absolute `http` or `https` URL.
    pub fn new(cache: CacheManager, base_url: &str, delay: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DashboardError::InvalidArgument(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(DashboardError::InvalidArgument(format!(
                "Base URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        Ok(Self {
            cache: RefCell::new(cache),
            base_url,
            delay,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Simulated latency requested on reads.
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Builder for a read request. Carries the simulated delay, if any.
    pub fn read_url(&self, segments: &[&str]) -> UrlBuilder {
        let mut builder = self.write_url(segments);
        builder.delay(self.delay);
        builder
    }

    /// Builder for a mutation request.
    pub fn write_url(&self, segments: &[&str]) -> UrlBuilder {
        let mut builder = UrlBuilder::new(&self.base_url);
        for segment in segments {
            builder.segment(segment);
        }
        builder
    }

    /// Fetch and decode a document through the query cache.
    pub fn fetch<T: DeserializeOwned>(&self, key: &QueryKey, url: &Url, failure: &str) -> Result<T> {
        let value = self.cache.borrow_mut().fetch_json(key, url, failure)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a mutation and decode the response body.
    pub fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
        failure: &str,
    ) -> Result<T> {
        let value = self
            .cache
            .borrow_mut()
            .send_json(method, url, body, failure)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Drop every cached query in each of `scopes`.
    pub fn invalidate_scopes(&self, scopes: &[&str]) -> Result<()> {
        let mut cache = self.cache.borrow_mut();
        for scope in scopes {
            cache.invalidate_scope(scope)?;
        }
        Ok(())
    }

    /// Drop a single cached query.
    pub fn invalidate(&self, key: &QueryKey) -> Result<()> {
        self.cache.borrow_mut().invalidate(key)
    }
}
