//! Product listing, lookup and CRUD against the products API.

use reqwest::Method;

use crate::cache::QueryKey;
use crate::config::{SCOPE_ALL_PRODUCTS, SCOPE_PRODUCT, SCOPE_PRODUCTS};
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Product, ProductFormData, ProductInsights, ProductsResponse};

// ---------------------------------------------------------------------------
// ListProductsParams
// ---------------------------------------------------------------------------

/// Parameters for a paginated product listing.
///
/// A non-empty `search` takes precedence over `category`; the API cannot
/// combine the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProductsParams {
    pub limit: usize,
    pub skip: usize,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl Default for ListProductsParams {
    fn default() -> Self {
        Self {
            limit: crate::config::DEFAULT_PAGE_SIZE,
            skip: 0,
            search: None,
            category: None,
        }
    }
}

impl ListProductsParams {
    /// Cache key of this listing.
    pub fn query_key(&self) -> QueryKey {
        QueryKey::new(SCOPE_PRODUCTS)
            .part(Some(self.limit))
            .part(Some(self.skip))
            .part(self.search.as_deref())
            .part(self.category.as_deref())
    }
}

/// Cache key of the unpaginated listing used for insights.
pub fn all_products_key(search: Option<&str>, category: Option<&str>) -> QueryKey {
    QueryKey::new(SCOPE_ALL_PRODUCTS).part(search).part(category)
}

/// Cache key of a single product.
pub fn product_key(id: i64) -> QueryKey {
    QueryKey::new(SCOPE_PRODUCT).part(Some(id))
}

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for products.
pub struct ProductQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ProductQuery<'a> {
    /// Create a new `ProductQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Fetch one page of products, filtered by search text or category.
    pub fn list(&self, params: &ListProductsParams) -> Result<ProductsResponse> {
        let url = self.listing_url(
            params.limit,
            params.skip,
            params.search.as_deref(),
            params.category.as_deref(),
        );
        self.conn
            .fetch(&params.query_key(), &url, "Failed to fetch products")
    }

    /// Fetch every product matching the filters in one request.
    ///
    /// This is the working set the analytics are computed over.
    pub fn all(&self, search: Option<&str>, category: Option<&str>) -> Result<ProductsResponse> {
        let url = self.listing_url(0, 0, search, category);
        self.conn.fetch(
            &all_products_key(search, category),
            &url,
            "Failed to fetch products",
        )
    }

    /// Fetch a single product by id.
    pub fn get(&self, id: i64) -> Result<Product> {
        let id_segment = id.to_string();
        let url = self.conn.read_url(&[id_segment.as_str()]).build();
        self.conn
            .fetch(&product_key(id), &url, "Failed to fetch product")
    }

    /// Create a product. The form is validated before anything is sent.
    pub fn create(&self, form: &ProductFormData) -> Result<Product> {
        form.validate()?;
        let body = serde_json::to_value(form)?;
        let url = self.conn.write_url(&["add"]).build();
        let product: Product =
            self.conn
                .send(Method::POST, &url, Some(&body), "Failed to create product")?;
        self.conn
            .invalidate_scopes(&[SCOPE_PRODUCTS, SCOPE_ALL_PRODUCTS])?;
        Ok(product)
    }

    /// Replace the editable fields of a product.
    pub fn update(&self, id: i64, form: &ProductFormData) -> Result<Product> {
        form.validate()?;
        let body = serde_json::to_value(form)?;
        let id_segment = id.to_string();
        let url = self.conn.write_url(&[id_segment.as_str()]).build();
        let product: Product =
            self.conn
                .send(Method::PUT, &url, Some(&body), "Failed to update product")?;
        self.invalidate_after_change(id)?;
        Ok(product)
    }

    /// Delete a product. Returns the deleted record as echoed by the API.
    pub fn delete(&self, id: i64) -> Result<Product> {
        let id_segment = id.to_string();
        let url = self.conn.write_url(&[id_segment.as_str()]).build();
        let product: Product =
            self.conn
                .send(Method::DELETE, &url, None, "Failed to delete product")?;
        self.invalidate_after_change(id)?;
        Ok(product)
    }

    /// Fetch the full filtered product list and aggregate it.
    pub fn insights(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<ProductInsights> {
        let all = self.all(search, category)?;
        Ok(ProductInsights::from_products(&all.products))
    }

    // -- helpers -----------------------------------------------------------

    fn listing_url(
        &self,
        limit: usize,
        skip: usize,
        search: Option<&str>,
        category: Option<&str>,
    ) -> reqwest::Url {
        let search = search.filter(|s| !s.is_empty());
        let category = category.filter(|c| !c.is_empty());

        let mut builder = match (search, category) {
            (Some(q), _) => {
                let mut b = self.conn.write_url(&["search"]);
                b.param("q", q);
                b
            }
            (None, Some(c)) => self.conn.write_url(&["category", c]),
            (None, None) => self.conn.write_url(&[]),
        };
        builder
            .limit(limit)
            .skip(skip)
            .delay(self.conn.delay());
        builder.build()
    }

    fn invalidate_after_change(&self, id: i64) -> Result<()> {
        self.conn
            .invalidate_scopes(&[SCOPE_PRODUCTS, SCOPE_ALL_PRODUCTS])?;
        self.conn.invalidate(&product_key(id))
    }
}
