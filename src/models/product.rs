use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — A single catalog record as returned by the API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub brand: String,
    pub discount_percentage: Option<f64>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    // Set on the echo returned by a delete.
    pub is_deleted: Option<bool>,
    pub deleted_on: Option<String>,
}

// ---------------------------------------------------------------------------
// ProductsResponse — One page of products plus the total match count
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

// ---------------------------------------------------------------------------
// ProductFormData — Create/update payload
// ---------------------------------------------------------------------------

/// The editable subset of a [`Product`], sent as the body of create and
/// update requests.
///
/// `price` and `stock` are optional so that a cleared numeric input can be
/// told apart from an explicit zero; see [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormData {
    pub title: String,
    pub price: Option<f64>,
    pub category: String,
    pub stock: Option<i64>,
    pub description: String,
    pub brand: String,
}

impl Default for ProductFormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            price: Some(0.0),
            category: String::new(),
            stock: Some(0),
            description: String::new(),
            brand: String::new(),
        }
    }
}

impl From<&Product> for ProductFormData {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: Some(product.price),
            category: product.category.clone(),
            stock: Some(product.stock),
            description: product.description.clone(),
            brand: product.brand.clone(),
        }
    }
}
