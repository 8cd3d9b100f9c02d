use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CategoryCount — Products per distinct category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

// ---------------------------------------------------------------------------
// StockBucket — In / low / out of stock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBucket {
    pub name: String,
    pub value: usize,
}

// ---------------------------------------------------------------------------
// PriceBucket — Half-open price range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub name: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// RatingBucket — Whole-star rating
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub name: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// SummaryMetrics — Headline numbers for the summary cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_products: usize,
    /// Sum of `price * stock` over all products.
    pub total_value: f64,
    /// Rounded to one decimal.
    pub avg_rating: f64,
    /// Rounded to two decimals.
    pub avg_price: f64,
    /// Number of distinct categories.
    pub categories: usize,
}

// ---------------------------------------------------------------------------
// ProductInsights — All five derived views of one product list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsights {
    pub categories: Vec<CategoryCount>,
    pub stock: [StockBucket; 3],
    pub price_ranges: [PriceBucket; 5],
    pub ratings: [RatingBucket; 5],
    pub summary: SummaryMetrics,
}
