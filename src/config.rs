use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE_URL: &str = "https://dummyjson.com/products";

/// Rows per page in the product table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a fetched query is served from memory before it is refetched.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Extra attempts for a read that failed at the transport level or with a 5xx.
pub const DEFAULT_RETRIES: u32 = 1;

// Query cache scopes. Mutations invalidate by scope.
pub const SCOPE_PRODUCTS: &str = "products";
pub const SCOPE_ALL_PRODUCTS: &str = "all-products";
pub const SCOPE_PRODUCT: &str = "product";
pub const SCOPE_CATEGORIES: &str = "categories";

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("product-dashboard")
    } else {
        PathBuf::from(".product-dashboard-cache")
    }
}
