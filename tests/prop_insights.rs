//! Property tests for the analytics invariants.

mod common;

use product_dashboard::insights::{aggregate_by_rating, compute_summary_metrics};
use product_dashboard::models::Product;
use product_dashboard::ProductInsights;
use proptest::prelude::*;

fn arb_product() -> impl Strategy<Value = Product> {
    (
        1i64..10_000,
        prop::sample::select(vec!["beauty", "groceries", "laptops", "furniture", "tops"]),
        0.0f64..5_000.0,
        0i64..200,
        0.0f64..=5.0,
    )
        .prop_map(|(id, category, price, stock, rating)| {
            common::product(id, category, price, stock, rating)
        })
}

fn arb_products() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(arb_product(), 0..60)
}

proptest! {
    #[test]
    fn category_counts_sum_to_input_length(products in arb_products()) {
        let report = ProductInsights::from_products(&products);
        let sum: usize = report.categories.iter().map(|c| c.value).sum();
        prop_assert_eq!(sum, products.len());
        prop_assert_eq!(report.summary.total_products, products.len());
    }

    #[test]
    fn stock_buckets_partition_the_input(products in arb_products()) {
        let report = ProductInsights::from_products(&products);
        let sum: usize = report.stock.iter().map(|b| b.value).sum();
        prop_assert_eq!(sum, products.len());
    }

    #[test]
    fn price_buckets_partition_non_negative_prices(products in arb_products()) {
        let report = ProductInsights::from_products(&products);
        let sum: usize = report.price_ranges.iter().map(|b| b.count).sum();
        prop_assert_eq!(sum, products.len());
    }

    #[test]
    fn rating_buckets_never_exceed_input(products in arb_products()) {
        let buckets = aggregate_by_rating(&products);
        let sum: usize = buckets.iter().map(|b| b.count).sum();
        let below_one = products.iter().filter(|p| p.rating < 1.0).count();
        prop_assert_eq!(sum, products.len() - below_one);
    }

    #[test]
    fn summary_categories_match_category_counts(products in arb_products()) {
        let report = ProductInsights::from_products(&products);
        prop_assert_eq!(report.summary.categories, report.categories.len());
        let direct = compute_summary_metrics(&products, &report.categories);
        prop_assert_eq!(direct, report.summary);
    }

    #[test]
    fn averages_stay_in_range(products in arb_products()) {
        let summary = ProductInsights::from_products(&products).summary;
        prop_assert!(summary.avg_rating >= 0.0 && summary.avg_rating <= 5.0);
        prop_assert!(summary.avg_price >= 0.0 && summary.avg_price <= 5_000.0);
        prop_assert!(!summary.avg_rating.is_nan());
    }

    #[test]
    fn aggregation_is_idempotent(products in arb_products()) {
        prop_assert_eq!(
            ProductInsights::from_products(&products),
            ProductInsights::from_products(&products)
        );
    }
}
