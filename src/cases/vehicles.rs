//! Paging and aggregation cases over the `vehicles` collection.

use crate::cases::{Case, expect};
use crate::domain::InventoryVehicle;
use crate::error::Result;
use crate::fixtures::VEHICLES;
use crate::query::{MatchAllQuery, MatchQuery};
use crate::search::{
    MetricAggregation, SearchRequest, SearchResponse, SortField, SortOrder, TermsAggregation,
    decode_hits,
};

const POPULAR_CARS: &str = "popular_cars";
const MAKE_FIELD: &str = "make.keyword";

/// Document count per make over the whole inventory.
const COUNTS_BY_MAKE: [(&str, u64); 6] = [
    ("dodge", 5),
    ("chevrolet", 3),
    ("bmw", 2),
    ("ford", 2),
    ("honda", 2),
    ("toyota", 2),
];

/// Price statistics per make: count, min, max, avg, sum.
const PRICE_STATS_BY_MAKE: [(&str, u64, f64, f64, f64, f64); 6] = [
    ("dodge", 5, 10_000.0, 35_000.0, 18_900.0, 94_500.0),
    ("chevrolet", 3, 13_000.0, 28_000.0, 20_333.333333333332, 61_000.0),
    ("bmw", 2, 30_000.0, 80_000.0, 55_000.0, 110_000.0),
    ("ford", 2, 25_000.0, 30_000.0, 27_500.0, 55_000.0),
    ("honda", 2, 10_000.0, 20_000.0, 15_000.0, 30_000.0),
    ("toyota", 2, 12_000.0, 15_000.0, 13_500.0, 27_000.0),
];

fn popular_cars() -> TermsAggregation {
    TermsAggregation::new(POPULAR_CARS, MAKE_FIELD)
}

fn popular_cars_with_price_metrics() -> TermsAggregation {
    popular_cars()
        .sub_aggregation(MetricAggregation::avg("avg_price", "price"))
        .sub_aggregation(MetricAggregation::max("max_price", "price"))
        .sub_aggregation(MetricAggregation::min("min_price", "price"))
}

/// The vehicle cases, in catalog order.
pub fn cases() -> Vec<Case> {
    vec![
        Case::new(
            "vehicles-first-page-by-price",
            "the five most expensive vehicles",
            SearchRequest::new(VEHICLES)
                .query(Box::new(MatchAllQuery::new()))
                .offset(0)
                .limit(5)
                .sort(SortField::new("price", SortOrder::Desc)),
            check_first_page,
        ),
        Case::new(
            "count-toyotas",
            "how many toyotas, without fetching them",
            SearchRequest::new(VEHICLES)
                .query(Box::new(MatchQuery::new("make", "toyota")))
                .limit(0),
            check_toyota_count,
        ),
        Case::new(
            "buckets-by-make",
            "vehicles grouped by make",
            SearchRequest::new(VEHICLES).aggregation(popular_cars()),
            check_buckets_by_make,
        ),
        Case::new(
            "price-metrics-by-make",
            "average, highest and lowest price per make",
            SearchRequest::new(VEHICLES).aggregation(popular_cars_with_price_metrics()),
            check_price_metrics,
        ),
        Case::new(
            "red-car-price-metrics",
            "price metrics per make for red vehicles only",
            SearchRequest::new(VEHICLES)
                .query(Box::new(MatchQuery::new("color", "red")))
                .limit(0)
                .aggregation(popular_cars_with_price_metrics()),
            check_red_price_metrics,
        ),
        Case::new(
            "price-stats-by-make",
            "price statistics per make",
            SearchRequest::new(VEHICLES).aggregation(
                popular_cars().sub_aggregation(MetricAggregation::stats("stats_on_price", "price")),
            ),
            check_price_stats,
        ),
    ]
}

fn check_first_page(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 16)?;
    expect::returned_hits(response, 5)?;
    let vehicles: Vec<InventoryVehicle> = decode_hits(response)?;
    let prices: Vec<f64> = vehicles.iter().map(|v| v.price).collect();
    expect::equal(
        "prices",
        prices,
        vec![80_000.0, 35_000.0, 30_000.0, 30_000.0, 28_000.0],
    )
}

fn check_toyota_count(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 2)?;
    expect::returned_hits(response, 0)
}

fn check_buckets_by_make(response: &SearchResponse) -> Result<()> {
    let terms = response.terms(POPULAR_CARS)?;
    expect::bucket_counts(&terms, &COUNTS_BY_MAKE)
}

fn check_price_metrics(response: &SearchResponse) -> Result<()> {
    let terms = response.terms(POPULAR_CARS)?;
    expect::bucket_counts(&terms, &COUNTS_BY_MAKE)?;
    for (make, _, min, max, avg, _) in PRICE_STATS_BY_MAKE {
        let bucket = expect::bucket(&terms, make)?;
        expect::bucket_metric(bucket, "min_price", min)?;
        expect::bucket_metric(bucket, "max_price", max)?;
        expect::bucket_metric(bucket, "avg_price", avg)?;
    }
    Ok(())
}

fn check_red_price_metrics(response: &SearchResponse) -> Result<()> {
    expect::total_hits(response, 5)?;
    expect::returned_hits(response, 0)?;

    let terms = response.terms(POPULAR_CARS)?;
    expect::bucket_counts(&terms, &[("dodge", 3), ("chevrolet", 1), ("bmw", 1)])?;
    for (make, max, avg, min) in [
        ("dodge", 35_000.0, 24_000.0, 18_000.0),
        ("chevrolet", 20_000.0, 20_000.0, 20_000.0),
        ("bmw", 80_000.0, 80_000.0, 80_000.0),
    ] {
        let bucket = expect::bucket(&terms, make)?;
        expect::bucket_metric(bucket, "max_price", max)?;
        expect::bucket_metric(bucket, "avg_price", avg)?;
        expect::bucket_metric(bucket, "min_price", min)?;
    }
    Ok(())
}

fn check_price_stats(response: &SearchResponse) -> Result<()> {
    let terms = response.terms(POPULAR_CARS)?;
    expect::bucket_counts(&terms, &COUNTS_BY_MAKE)?;
    for (make, count, min, max, avg, sum) in PRICE_STATS_BY_MAKE {
        let stats = expect::bucket(&terms, make)?.stats("stats_on_price")?;
        expect::equal(&format!("{make} count"), stats.count, count)?;
        expect::approx(&format!("{make} min"), stats.min.unwrap_or(f64::NAN), min)?;
        expect::approx(&format!("{make} max"), stats.max.unwrap_or(f64::NAN), max)?;
        expect::approx(&format!("{make} avg"), stats.avg.unwrap_or(f64::NAN), avg)?;
        expect::approx(&format!("{make} sum"), stats.sum, sum)?;
    }
    Ok(())
}
