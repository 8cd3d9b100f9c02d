//! Query cache and HTTP transport.
//!
//! Read requests are cached in memory per [`QueryKey`] and served until they
//! go stale. Successful reads are also written to the cache directory so the
//! SDK can keep answering in offline mode or when the API is unreachable.
//! Mutations always go to the network and never touch the cache directly;
//! callers invalidate the affected scopes afterwards.

use crate::config;
use crate::error::{DashboardError, Result};
use reqwest::blocking::{Client, Response};
use reqwest::{Method, Url};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// QueryKey
// ---------------------------------------------------------------------------

/// Identity of a cached read: a scope (`"products"`, `"categories"`, ...)
/// plus the parameters that distinguish one request from another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    scope: String,
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            parts: Vec::new(),
        }
    }

    /// Append a distinguishing part. `None` is recorded as an empty part so
    /// that positions stay aligned.
    pub fn part<T: ToString>(mut self, value: Option<T>) -> Self {
        self.parts
            .push(value.map(|v| v.to_string()).unwrap_or_default());
        self
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// File name of the on-disk copy.
    ///
    /// `[A-Za-z0-9-]` pass through, every other byte becomes `_xx`. The scope
    /// and each part are encoded separately and joined with `.`, which the
    /// encoding never emits, so two different keys never share a file and a
    /// whole scope can be matched by prefix.
    pub fn file_name(&self) -> String {
        let mut name = encode_component(&self.scope);
        for part in &self.parts {
            name.push('.');
            name.push_str(&encode_component(part));
        }
        name.push_str(".json");
        name
    }
}

/// Human-readable form for logs and error messages. Not unique when a part
/// contains `:`; use [`QueryKey::file_name`] where identity matters.
impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scope)?;
        for part in &self.parts {
            write!(f, ":{}", part)?;
        }
        Ok(())
    }
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(b as char);
        } else {
            out.push_str(&format!("_{:02x}", b));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// CacheManager
// ---------------------------------------------------------------------------

struct Entry {
    value: Value,
    /// `None` for copies loaded from disk, which are always stale.
    fetched_at: Option<Instant>,
}

/// Caches API reads in memory and on disk, and owns the HTTP client.
pub struct CacheManager {
    /// Directory where persisted query results are stored.
    pub cache_dir: PathBuf,
    /// If true, never touch the network (serve cached results only).
    pub offline: bool,
    /// If true, successful reads are written to `cache_dir`.
    pub persist: bool,
    timeout: Duration,
    stale_time: Duration,
    retries: u32,
    client: Option<Client>,
    entries: HashMap<QueryKey, Entry>,
}

impl CacheManager {
    /// Create a new cache manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>, offline: bool, timeout: Duration) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            persist: true,
            timeout,
            stale_time: config::DEFAULT_STALE_TIME,
            retries: config::DEFAULT_RETRIES,
            client: None,
            entries: HashMap::new(),
        })
    }

    /// How long a read is served from memory before it is refetched.
    pub fn set_stale_time(&mut self, stale_time: Duration) {
        self.stale_time = stale_time;
    }

    /// Extra attempts for reads that fail at the transport level or with a 5xx.
    pub fn set_retries(&mut self, retries: u32) {
        self.retries = retries;
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| DashboardError::InvalidArgument("HTTP client unavailable".into()))
    }

    /// Number of queries held in memory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if `key` is in memory and younger than the stale time.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .and_then(|e| e.fetched_at)
            .is_some_and(|t| t.elapsed() < self.stale_time)
    }

    /// Read a JSON document through the cache.
    ///
    /// Fresh memory entries are returned as-is. Otherwise the document is
    /// fetched from `url` (unless offline) and stored. When the network is
    /// unavailable the last memory or disk copy is used instead.
    ///
    /// `failure` is the message carried by [`DashboardError::Api`] when the
    /// API answers with an error status.
    pub fn fetch_json(&mut self, key: &QueryKey, url: &Url, failure: &str) -> Result<Value> {
        if self.is_fresh(key) {
            tracing::debug!(%key, "query cache hit");
            if let Some(entry) = self.entries.get(key) {
                return Ok(entry.value.clone());
            }
        }

        if self.offline {
            return self.cached_copy(key)?.ok_or_else(|| {
                DashboardError::NotFound(format!(
                    "Query {} not cached and offline mode is enabled",
                    key
                ))
            });
        }

        match self.get_with_retry(url, failure) {
            Ok(value) => {
                self.store(key, value.clone());
                Ok(value)
            }
            Err(e) if is_retryable(&e) => match self.cached_copy(key) {
                Ok(Some(value)) => {
                    tracing::warn!(%key, error = %e, "request failed; serving cached copy");
                    Ok(value)
                }
                Ok(None) => Err(e),
                Err(cache_err) => {
                    tracing::debug!(%key, error = %cache_err, "no usable cached copy");
                    Err(e)
                }
            },
            Err(e) => Err(e),
        }
    }

    /// Send a mutation and return the decoded response body.
    pub fn send_json(
        &mut self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
        failure: &str,
    ) -> Result<Value> {
        if self.offline {
            return Err(DashboardError::Offline(format!(
                "{}: mutations are unavailable in offline mode",
                failure
            )));
        }

        tracing::debug!(%method, %url, "sending request");
        let client = self.client()?.clone();
        let mut request = client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = check_status(request.send()?, failure)?;
        Ok(resp.json()?)
    }

    /// Insert a document into the memory cache and, when persisting, on disk.
    ///
    /// A failed disk write is logged and otherwise ignored; the memory copy
    /// still serves later reads.
    pub fn store(&mut self, key: &QueryKey, value: Value) {
        if self.persist {
            let path = self.cache_dir.join(key.file_name());
            if let Err(e) = self.write_file(&path, &value) {
                tracing::warn!(
                    %key,
                    path = %path.display(),
                    error = %e,
                    "failed to persist query; keeping memory copy"
                );
            }
        }
        self.entries.insert(
            key.clone(),
            Entry {
                value,
                fetched_at: Some(Instant::now()),
            },
        );
    }

    /// Drop one query from memory and disk.
    pub fn invalidate(&mut self, key: &QueryKey) -> Result<()> {
        self.entries.remove(key);
        remove_if_exists(&self.cache_dir.join(key.file_name()))
    }

    /// Drop every query of `scope` from memory and disk.
    pub fn invalidate_scope(&mut self, scope: &str) -> Result<()> {
        self.entries.retain(|k, _| k.scope() != scope);

        let prefix = format!("{}.", encode_component(scope));
        for entry in fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix));
            if matches {
                remove_if_exists(&path)?;
            }
        }
        tracing::info!(scope, "invalidated cached queries");
        Ok(())
    }

    /// Remove all cached queries and recreate the cache directory.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }

    // -- internals ---------------------------------------------------------

    fn get_with_retry(&mut self, url: &Url, failure: &str) -> Result<Value> {
        let client = self.client()?.clone();
        let mut attempt = 0;
        loop {
            tracing::debug!(%url, attempt, "fetching");
            let result = client
                .get(url.clone())
                .send()
                .map_err(DashboardError::from)
                .and_then(|resp| check_status(resp, failure))
                .and_then(|resp| resp.json::<Value>().map_err(DashboardError::from));

            match result {
                Err(e) if attempt < self.retries && is_retryable(&e) => {
                    tracing::warn!(%url, error = %e, "request failed; retrying");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Stale memory entry first, then the disk copy.
    fn cached_copy(&mut self, key: &QueryKey) -> Result<Option<Value>> {
        if let Some(entry) = self.entries.get(key) {
            return Ok(Some(entry.value.clone()));
        }
        let path = self.cache_dir.join(key.file_name());
        if !path.exists() {
            return Ok(None);
        }
        let value = self.read_file(&path)?;
        self.entries.insert(
            key.clone(),
            Entry {
                value: value.clone(),
                fetched_at: None,
            },
        );
        Ok(Some(value))
    }

    /// Load a persisted query result.
    ///
    /// A corrupt file (truncated write, disk error) is deleted so the next
    /// online read replaces it.
    fn read_file(&self, path: &Path) -> Result<Value> {
        let contents = fs::read_to_string(path)?;
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt cache file; removing");
                if let Err(remove_err) = fs::remove_file(path) {
                    tracing::debug!(
                        path = %path.display(),
                        error = %remove_err,
                        "could not remove corrupt cache file"
                    );
                }
                Err(DashboardError::NotFound(format!(
                    "Cache file '{}' was corrupt and has been removed. \
                     Retry to re-fetch. Original error: {}",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown"),
                    e
                )))
            }
        }
    }

    /// Write via a temp file in the same directory and rename on success, so
    /// an interrupted write never leaves a partial file behind.
    fn write_file(&self, dest: &Path, value: &Value) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.cache_dir)?;
        serde_json::to_writer(&mut tmp, value)?;
        tmp.flush()?;
        tmp.persist(dest).map_err(|e| DashboardError::Io(e.error))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_status(resp: Response, failure: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(DashboardError::Api {
            status: status.as_u16(),
            message: failure.to_string(),
        })
    }
}

fn is_retryable(err: &DashboardError) -> bool {
    match err {
        DashboardError::Http(_) => true,
        DashboardError::Api { status, .. } => *status >= 500,
        _ => false,
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
