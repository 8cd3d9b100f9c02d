//! Shared test fixtures for the product dashboard integration tests.
//!
//! Provides sample products in the API's JSON shape and `setup_offline_sdk()`,
//! which builds an offline SDK over a temporary cache directory pre-seeded
//! with those responses.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use product_dashboard::cache::QueryKey;
use product_dashboard::models::Product;
use product_dashboard::queries::categories::categories_key;
use product_dashboard::queries::products::{all_products_key, product_key};
use product_dashboard::queries::ListProductsParams;
use product_dashboard::DashboardSdk;
use serde_json::{json, Value};

/// A product with only the fields the analytics look at filled in.
pub fn product(id: i64, category: &str, price: f64, stock: i64, rating: f64) -> Product {
    Product {
        id,
        title: format!("Product {}", id),
        description: String::new(),
        category: category.to_string(),
        price,
        rating,
        stock,
        brand: String::new(),
        discount_percentage: None,
        thumbnail: None,
        images: Vec::new(),
        tags: Vec::new(),
        is_deleted: None,
        deleted_on: None,
    }
}

/// Five products spanning four categories, every stock status and four of
/// the five price ranges. The groceries item has no `brand`, as in the API.
pub fn sample_products_json() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara known for its volumizing effects.",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 99,
            "tags": ["beauty", "mascara"],
            "brand": "Essence",
            "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/thumbnail.png",
            "images": []
        }),
        json!({
            "id": 2,
            "title": "Eyeshadow Palette with Mirror",
            "description": "Versatile range of eyeshadow shades.",
            "category": "beauty",
            "price": 19.99,
            "discountPercentage": 5.5,
            "rating": 3.28,
            "stock": 34,
            "tags": ["beauty", "eyeshadow"],
            "brand": "Glamour Beauty"
        }),
        json!({
            "id": 16,
            "title": "Apple",
            "description": "Fresh and crisp apples.",
            "category": "groceries",
            "price": 1.99,
            "rating": 4.19,
            "stock": 0,
            "tags": ["fruits"]
        }),
        json!({
            "id": 122,
            "title": "iPhone 5s",
            "description": "A classic smartphone with a sleek design.",
            "category": "smartphones",
            "price": 199.99,
            "rating": 2.83,
            "stock": 10,
            "brand": "Apple"
        }),
        json!({
            "id": 6,
            "title": "Annibale Colombo Bed",
            "description": "Luxurious bed crafted with high-quality materials.",
            "category": "furniture",
            "price": 1899.99,
            "rating": 4.14,
            "stock": 47,
            "brand": "Annibale Colombo"
        }),
    ]
}

pub fn sample_products() -> Vec<Product> {
    sample_products_json()
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}

pub fn sample_categories_json() -> Value {
    json!([
        { "slug": "beauty", "name": "Beauty", "url": "https://dummyjson.com/products/category/beauty" },
        { "slug": "furniture", "name": "Furniture", "url": "https://dummyjson.com/products/category/furniture" },
        { "slug": "groceries", "name": "Groceries", "url": "https://dummyjson.com/products/category/groceries" },
        { "slug": "smartphones", "name": "Smartphones", "url": "https://dummyjson.com/products/category/smartphones" }
    ])
}

/// Wrap products in the listing envelope.
pub fn products_response(products: &[Value], total: usize, skip: usize, limit: usize) -> Value {
    json!({
        "products": products,
        "total": total,
        "skip": skip,
        "limit": limit
    })
}

/// Create an offline SDK over a fresh temp cache directory.
///
/// Returns `(DashboardSdk, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn empty_offline_sdk() -> (DashboardSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = DashboardSdk::builder()
        .cache_dir(tmp_dir.path())
        .offline(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// Seed one cached response.
pub fn seed(sdk: &DashboardSdk, key: &QueryKey, value: Value) {
    sdk.connection()
        .cache
        .borrow_mut()
        .store(key, value);
}

/// Create an offline SDK whose cache already holds:
///
/// - the first page (limit 2) of the unfiltered listing,
/// - the unfiltered and `beauty` full listings,
/// - product 1,
/// - the category listing.
pub fn setup_offline_sdk() -> (DashboardSdk, tempfile::TempDir) {
    let (sdk, tmp_dir) = empty_offline_sdk();
    let products = sample_products_json();

    let first_page = ListProductsParams {
        limit: 2,
        ..Default::default()
    };
    seed(
        &sdk,
        &first_page.query_key(),
        products_response(&products[..2], products.len(), 0, 2),
    );

    seed(
        &sdk,
        &all_products_key(None, None),
        products_response(&products, products.len(), 0, products.len()),
    );

    let beauty: Vec<Value> = products
        .iter()
        .filter(|p| p["category"] == "beauty")
        .cloned()
        .collect();
    seed(
        &sdk,
        &all_products_key(None, Some("beauty")),
        products_response(&beauty, beauty.len(), 0, beauty.len()),
    );

    seed(&sdk, &product_key(1), products[0].clone());
    seed(&sdk, &categories_key(), sample_categories_json());

    (sdk, tmp_dir)
}

// ---------------------------------------------------------------------------
// Scripted HTTP server
// ---------------------------------------------------------------------------

/// A local HTTP server that answers each incoming request with the next
/// `(status, body)` from its script, then stops listening.
///
/// Every response carries `Connection: close`, so each request the SDK makes
/// arrives on its own connection and is counted.
pub struct ScriptedServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedServer {
    pub fn start(script: Vec<(u16, Value)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for (status, body) in script {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request_line = read_request(&mut stream);
                seen.lock().unwrap().push(request_line);

                let body = body.to_string();
                let response = format!(
                    "HTTP/1.1 {} Scripted\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { addr, requests }
    }

    /// Products endpoint served by this server.
    pub fn base_url(&self) -> String {
        format!("http://{}/products", self.addr)
    }

    /// Request lines received so far, e.g. `GET /products/1 HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Read one request (headers plus any `Content-Length` body) and return its
/// request line.
fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut content_length = 0;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();

    request_line.trim_end().to_string()
}

/// A base URL on a local port with nothing listening.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/products", addr)
}

/// An online SDK against `base_url` with a short timeout.
pub fn online_sdk(base_url: &str, cache_dir: &Path) -> DashboardSdk {
    DashboardSdk::builder()
        .base_url(base_url)
        .cache_dir(cache_dir)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
