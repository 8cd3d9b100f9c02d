//! Derived analytics over a product list.
//!
//! Turns a fully loaded product list into the five summary views shown on the
//! analytics tab: category counts, stock status, price ranges, rating
//! distribution and headline metrics. Every function here is pure and
//! deterministic; results are rebuilt from scratch on each call.
//!
//! Records that fall outside every bucket of a view (a negative price, a
//! rating below one star) are left out of that view only. Nothing here
//! returns an error.
//!
//! # Example
//!
//! ```rust
//! use product_dashboard::insights;
//! use product_dashboard::models::{Product, ProductInsights};
//!
//! let products: Vec<Product> = Vec::new();
//! let report = ProductInsights::from_products(&products);
//! assert_eq!(report.summary.total_products, 0);
//! assert!(insights::aggregate_by_category(&products).is_empty());
//! ```

use std::collections::HashMap;

use crate::models::{
    CategoryCount, PriceBucket, Product, ProductInsights, RatingBucket, StockBucket,
    SummaryMetrics,
};

/// Stock above this is "In Stock"; 1 through this is "Low Stock".
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Price ranges as `(label, min inclusive, max exclusive)`, ascending.
pub const PRICE_RANGES: [(&str, f64, f64); 5] = [
    ("Under $10", 0.0, 10.0),
    ("$10-$50", 10.0, 50.0),
    ("$50-$100", 50.0, 100.0),
    ("$100-$500", 100.0, 500.0),
    ("Over $500", 500.0, f64::INFINITY),
];

pub const STOCK_LABELS: [&str; 3] = ["In Stock", "Low Stock", "Out of Stock"];

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Count products per category, in the order categories are first seen.
pub fn aggregate_by_category(products: &[Product]) -> Vec<CategoryCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for product in products {
        match index.get(product.category.as_str()) {
            Some(&i) => counts[i].value += 1,
            None => {
                index.insert(product.category.as_str(), counts.len());
                counts.push(CategoryCount {
                    name: product.category.clone(),
                    value: 1,
                });
            }
        }
    }

    counts
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// Classify products into in-stock, low-stock and out-of-stock.
///
/// All three buckets are always present. Negative stock matches none.
pub fn aggregate_by_stock(products: &[Product]) -> [StockBucket; 3] {
    let mut counts = [0usize; 3];

    for product in products {
        let slot = match product.stock {
            s if s > LOW_STOCK_THRESHOLD => Some(0),
            s if s > 0 => Some(1),
            0 => Some(2),
            _ => None,
        };
        if let Some(i) = slot {
            counts[i] += 1;
        }
    }

    std::array::from_fn(|i| StockBucket {
        name: STOCK_LABELS[i].to_string(),
        value: counts[i],
    })
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// Count products per price range (see [`PRICE_RANGES`]).
///
/// Each product lands in the first range whose half-open interval contains
/// its price, so `10.0` is counted under `"$10-$50"`.
pub fn aggregate_by_price_range(products: &[Product]) -> [PriceBucket; 5] {
    let mut counts = [0usize; 5];

    for product in products {
        if let Some(i) = PRICE_RANGES
            .iter()
            .position(|&(_, min, max)| product.price >= min && product.price < max)
        {
            counts[i] += 1;
        }
    }

    std::array::from_fn(|i| PriceBucket {
        name: PRICE_RANGES[i].0.to_string(),
        count: counts[i],
    })
}

// ---------------------------------------------------------------------------
// Rating
// ---------------------------------------------------------------------------

/// Count products per whole-star rating, 1 through 5.
///
/// The rating is floored first. A floored rating of 0 (or anything else
/// outside 1..=5) is dropped from the distribution but still counts toward
/// [`SummaryMetrics::avg_rating`].
pub fn aggregate_by_rating(products: &[Product]) -> [RatingBucket; 5] {
    let mut counts = [0usize; 5];

    for product in products {
        let stars = product.rating.floor();
        if (1.0..=5.0).contains(&stars) {
            counts[stars as usize - 1] += 1;
        }
    }

    std::array::from_fn(|i| RatingBucket {
        name: format!("{} Star", i + 1),
        count: counts[i],
    })
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Compute the headline metrics.
///
/// `category_counts` is the output of [`aggregate_by_category`] for the same
/// list. Averages are `0` for an empty list.
pub fn compute_summary_metrics(
    products: &[Product],
    category_counts: &[CategoryCount],
) -> SummaryMetrics {
    let total_products = products.len();
    let total_value: f64 = products.iter().map(|p| p.price * p.stock as f64).sum();
    let rating_sum: f64 = products.iter().map(|p| p.rating).sum();
    let price_sum: f64 = products.iter().map(|p| p.price).sum();

    SummaryMetrics {
        total_products,
        total_value,
        avg_rating: round_to(average(rating_sum, total_products), 1),
        avg_price: round_to(average(price_sum, total_products), 2),
        categories: category_counts.len(),
    }
}

impl ProductInsights {
    /// Build every derived view for `products`.
    pub fn from_products(products: &[Product]) -> Self {
        let categories = aggregate_by_category(products);
        let summary = compute_summary_metrics(products, &categories);
        Self {
            stock: aggregate_by_stock(products),
            price_ranges: aggregate_by_price_range(products),
            ratings: aggregate_by_rating(products),
            categories,
            summary,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let avg = sum / count as f64;
    if avg.is_nan() {
        0.0
    } else {
        avg
    }
}

/// Enough fractional digits to print any `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Round to `decimals` places the way a fixed-point display does.
///
/// Rounding looks at the exact decimal value of `value`, so `1.005` (stored
/// as `1.00499...`) rounds down to `1.0`. Exact halves round away from zero.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (whole, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let keep = decimals.min(frac.len());

    let mut digits: Vec<char> = whole.chars().chain(frac[..keep].chars()).collect();
    let round_up = frac.as_bytes().get(keep).is_some_and(|&b| b >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == '9' {
                *d = '0';
            } else {
                *d = char::from(*d as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, '1');
        }
    }

    let split = digits.len() - keep;
    let int_part: String = digits[..split].iter().collect();
    let frac_part: String = digits[split..].iter().collect();
    let rounded: f64 = format!("{int_part}.{frac_part}0").parse().unwrap_or(value);
    rounded.copysign(value)
}
