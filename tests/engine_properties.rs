//! Property-style checks of the aggregation engine over generated catalogs.

use fake::faker::lorem::en::Word;
use fake::{Dummy, Fake, Faker};
use rand::Rng;
use rust_decimal::Decimal;
use stockroom::engine::{fill_percent, DEFAULT_CAPACITY, LOW_STOCK_THRESHOLD};
use stockroom::{
    adjust_quantity, classify_status, compute_summary, filter_by_name, low_stock_list, Product, StockStatus,
};

#[derive(Debug, Dummy)]
struct LineItem {
    #[dummy(faker = "Word()")]
    name: String,
    #[dummy(faker = "0..200")]
    quantity: u32,
    /// price in minor units (grosze)
    #[dummy(faker = "0..100_000")]
    cents: i64,
}

fn catalog(len: usize) -> Vec<Product> {
    (0..len)
        .map(|i| {
            let item: LineItem = Faker.fake();
            Product {
                id: i as i32 + 1,
                name: item.name,
                description: None,
                unit_price: Decimal::new(item.cents, 2),
                quantity: item.quantity,
                category_id: None,
            }
        })
        .collect()
}

#[test]
fn total_quantity_is_the_arithmetic_sum() {
    for len in [0, 1, 7, 250] {
        let products = catalog(len);
        let expected: u64 = products.iter().map(|p| u64::from(p.quantity)).sum();
        assert_eq!(compute_summary(&products).total_quantity, expected);
    }
}

#[test]
fn total_value_is_exact_over_ten_thousand_lines() {
    let products = catalog(10_000);
    // integer arithmetic in minor units is the reference
    let expected_cents: i128 = products
        .iter()
        .map(|p| i128::from(p.quantity) * p.unit_price.mantissa())
        .sum();
    let summary = compute_summary(&products);
    assert_eq!(summary.total_value, Decimal::from_i128_with_scale(expected_cents, 2));
}

#[test]
fn fill_percent_is_monotonic_and_clamped() {
    let mut rng = rand::thread_rng();
    let mut quantities: Vec<u64> = (0..500).map(|_| rng.gen_range(0..3 * DEFAULT_CAPACITY)).collect();
    quantities.sort_unstable();
    let fills: Vec<f64> = quantities.iter().map(|q| fill_percent(*q, DEFAULT_CAPACITY)).collect();
    for pair in fills.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    for (q, f) in quantities.iter().zip(&fills) {
        if *q >= DEFAULT_CAPACITY {
            assert_eq!(*f, 1.0);
        }
        assert!((0.0..=1.0).contains(f));
    }
}

#[test]
fn status_and_reorder_list_agree() {
    let products = catalog(300);
    let reorder = low_stock_list(&products, LOW_STOCK_THRESHOLD);
    let flagged: Vec<&str> = products
        .iter()
        .filter(|p| classify_status(p) != StockStatus::InStock)
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(reorder, flagged);
}

#[test]
fn adjust_never_goes_negative() {
    let mut rng = rand::thread_rng();
    for product in catalog(200) {
        let delta: i64 = rng.gen_range(-500..500);
        let adjusted = adjust_quantity(&product, delta);
        let expected = (i64::from(product.quantity) + delta).max(0);
        assert_eq!(i64::from(adjusted), expected);
    }
}

#[test]
fn empty_filter_is_identity() {
    let products = catalog(50);
    let filtered = filter_by_name(&products, "");
    assert_eq!(filtered.len(), products.len());
    for (a, b) in filtered.iter().zip(&products) {
        assert_eq!(a.id, b.id);
    }
}

#[test]
fn filter_is_a_stable_subsequence() {
    let products = catalog(200);
    let query: String = products[0].name.chars().take(1).collect();
    let filtered = filter_by_name(&products, &query);
    let ids: Vec<i32> = filtered.iter().map(|p| p.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert!(filtered
        .iter()
        .all(|p| p.name.to_lowercase().contains(&query.to_lowercase())));
}
