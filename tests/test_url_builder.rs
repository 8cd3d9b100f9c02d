//! Unit tests for request URL construction.

use std::time::Duration;

use product_dashboard::{CacheManager, Connection, DashboardError, UrlBuilder};
use reqwest::Url;

fn base() -> Url {
    Url::parse("https://dummyjson.com/products").unwrap()
}

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_without_parts_is_the_base() {
    let url = UrlBuilder::new(&base()).build();
    assert_eq!(url.as_str(), "https://dummyjson.com/products");
}

#[test]
fn listing_with_limit_and_skip() {
    let url = UrlBuilder::new(&base()).limit(10).skip(20).build();
    assert_eq!(url.as_str(), "https://dummyjson.com/products?limit=10&skip=20");
}

#[test]
fn search_listing() {
    let url = UrlBuilder::new(&base())
        .segment("search")
        .param("q", "phone")
        .limit(10)
        .skip(0)
        .build();
    assert_eq!(
        url.as_str(),
        "https://dummyjson.com/products/search?q=phone&limit=10&skip=0"
    );
}

#[test]
fn category_listing() {
    let url = UrlBuilder::new(&base())
        .segment("category")
        .segment("smartphones")
        .limit(0)
        .skip(0)
        .build();
    assert_eq!(
        url.as_str(),
        "https://dummyjson.com/products/category/smartphones?limit=0&skip=0"
    );
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn query_values_are_encoded() {
    let url = UrlBuilder::new(&base())
        .segment("search")
        .param("q", "red & blue")
        .build();
    assert_eq!(
        url.as_str(),
        "https://dummyjson.com/products/search?q=red+%26+blue"
    );
}

#[test]
fn path_segments_are_encoded() {
    let url = UrlBuilder::new(&base())
        .segment("category")
        .segment("home decoration/new")
        .build();
    assert_eq!(
        url.as_str(),
        "https://dummyjson.com/products/category/home%20decoration%2Fnew"
    );
}

#[test]
fn trailing_slash_on_base_is_not_doubled() {
    let base = Url::parse("https://dummyjson.com/products/").unwrap();
    let url = UrlBuilder::new(&base).segment("add").build();
    assert_eq!(url.as_str(), "https://dummyjson.com/products/add");
}

// ---------------------------------------------------------------------------
// Optional parameters
// ---------------------------------------------------------------------------

#[test]
fn param_opt_skips_none() {
    let url = UrlBuilder::new(&base())
        .param_opt("q", None)
        .param_opt("sortBy", Some("price"))
        .build();
    assert_eq!(url.as_str(), "https://dummyjson.com/products?sortBy=price");
}

#[test]
fn delay_is_sent_in_millis() {
    let url = UrlBuilder::new(&base())
        .delay(Some(Duration::from_secs(1)))
        .build();
    assert_eq!(url.as_str(), "https://dummyjson.com/products?delay=1000");

    let url = UrlBuilder::new(&base()).delay(None).build();
    assert_eq!(url.query(), None);
}

// ---------------------------------------------------------------------------
// Connection URL helpers
// ---------------------------------------------------------------------------

fn connection(base_url: &str, delay: Option<Duration>) -> (Result<Connection, DashboardError>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let cache = CacheManager::new(Some(tmp.path().to_path_buf()), true, Duration::from_secs(5)).unwrap();
    (Connection::new(cache, base_url, delay), tmp)
}

#[test]
fn read_urls_carry_delay_but_write_urls_do_not() {
    let (conn, _tmp) = connection("https://dummyjson.com/products", Some(Duration::from_millis(1000)));
    let conn = conn.unwrap();

    let read = conn.read_url(&["categories"]).build();
    assert_eq!(
        read.as_str(),
        "https://dummyjson.com/products/categories?delay=1000"
    );

    let write = conn.write_url(&["7"]).build();
    assert_eq!(write.as_str(), "https://dummyjson.com/products/7");
}

#[test]
fn connection_rejects_invalid_base_url() {
    let (conn, _tmp) = connection("not a url", None);
    assert!(matches!(conn, Err(DashboardError::InvalidArgument(_))));

    let (conn, _tmp) = connection("ftp://example.com/products", None);
    assert!(matches!(conn, Err(DashboardError::InvalidArgument(_))));
}
