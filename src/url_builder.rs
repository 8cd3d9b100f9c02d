//! Request URL builder.
//!
//! Path segments and query values are percent-encoded by [`reqwest::Url`],
//! never spliced in by string formatting. Builder methods return `&mut Self`
//! for chaining.
//!
//! # Example
//!
//! ```rust
//! use product_dashboard::UrlBuilder;
//! use reqwest::Url;
//!
//! let base = Url::parse("https://dummyjson.com/products").unwrap();
//! let url = UrlBuilder::new(&base)
//!     .segment("search")
//!     .param("q", "phone")
//!     .limit(10)
//!     .skip(0)
//!     .build();
//! assert_eq!(
//!     url.as_str(),
//!     "https://dummyjson.com/products/search?q=phone&limit=10&skip=0"
//! );
//! ```

use std::time::Duration;

use reqwest::Url;

/// Builds API request URLs relative to a base URL.
pub struct UrlBuilder {
    base: Url,
    segments: Vec<String>,
    params: Vec<(String, String)>,
}

impl UrlBuilder {
    /// Create a builder rooted at `base`.
    pub fn new(base: &Url) -> Self {
        Self {
            base: base.clone(),
            segments: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Append one path segment. Slashes inside `segment` are encoded.
    pub fn segment(&mut self, segment: &str) -> &mut Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Append a query parameter.
    pub fn param(&mut self, key: &str, value: &str) -> &mut Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when `value` is present.
    pub fn param_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.param(key, v);
        }
        self
    }

    /// Page size. `0` asks the API for every matching row.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.param("limit", &n.to_string())
    }

    /// Number of rows to skip.
    pub fn skip(&mut self, n: usize) -> &mut Self {
        self.param("skip", &n.to_string())
    }

    /// Simulated response latency, sent as `delay=<millis>`.
    pub fn delay(&mut self, delay: Option<Duration>) -> &mut Self {
        if let Some(d) = delay {
            self.param("delay", &d.as_millis().to_string());
        }
        self
    }

    /// Build the final URL.
    pub fn build(&self) -> Url {
        let mut url = self.base.clone();

        if !self.segments.is_empty() {
            // Bases are validated as http(s) on construction, so they always
            // have a path to extend.
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty();
                path.extend(&self.segments);
            }
        }

        if !self.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (k, v) in &self.params {
                query.append_pair(k, v);
            }
        }

        url
    }
}
