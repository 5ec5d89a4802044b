//! Integration tests for the analytics breakdown endpoint: aggregation,
//! search filtering and sorting.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Breakdown {
    category: String,
    amount: f64,
    percentage: f64,
}

#[derive(Debug, Deserialize)]
struct BreakdownResponse {
    total: f64,
    breakdowns: Vec<Breakdown>,
}

async fn seeded_client() -> TestClient {
    let client = TestClient::with_user("alice").await;
    client.add_expense("Food", 100.0).await;
    client.add_expense("Food", 20.0).await;
    client.add_expense("Transport", 80.0).await;
    client
}

#[tokio::test]
async fn test_empty_dataset_has_no_divide_by_zero() {
    let client = TestClient::with_user("alice").await;

    let (status, parsed): (_, Option<BreakdownResponse>) =
        client.get_json("/api/analytics/breakdown").await;

    assert_eq!(status, StatusCode::OK);
    let response = parsed.unwrap();
    assert_eq!(response.total, 0.0);
    assert!(response.breakdowns.is_empty());
}

#[tokio::test]
async fn test_percentages_sum_to_hundred() {
    let client = seeded_client().await;

    let (_, parsed): (_, Option<BreakdownResponse>) =
        client.get_json("/api/analytics/breakdown").await;
    let response = parsed.unwrap();

    assert_eq!(response.total, 200.0);
    let sum: f64 = response.breakdowns.iter().map(|b| b.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);

    // Default ordering is amount descending.
    assert_eq!(response.breakdowns[0].category, "Food");
    assert_eq!(response.breakdowns[0].amount, 120.0);
    assert_eq!(response.breakdowns[1].category, "Transport");
}

#[tokio::test]
async fn test_sort_directions_invert_amount_order() {
    let client = seeded_client().await;

    let (_, desc): (_, Option<BreakdownResponse>) = client
        .get_json("/api/analytics/breakdown?sort=amount_desc")
        .await;
    let (_, asc): (_, Option<BreakdownResponse>) = client
        .get_json("/api/analytics/breakdown?sort=amount_asc")
        .await;

    let desc_amounts: Vec<f64> = desc.unwrap().breakdowns.iter().map(|b| b.amount).collect();
    let mut asc_amounts: Vec<f64> = asc.unwrap().breakdowns.iter().map(|b| b.amount).collect();
    asc_amounts.reverse();
    assert_eq!(desc_amounts, asc_amounts);
}

#[tokio::test]
async fn test_name_sort() {
    let client = seeded_client().await;

    let (_, parsed): (_, Option<BreakdownResponse>) = client
        .get_json("/api/analytics/breakdown?sort=name_asc")
        .await;
    let names: Vec<String> = parsed
        .unwrap()
        .breakdowns
        .into_iter()
        .map(|b| b.category)
        .collect();
    assert_eq!(names, vec!["Food", "Transport"]);
}

#[tokio::test]
async fn test_filter_by_category_name() {
    let client = seeded_client().await;

    let (_, parsed): (_, Option<BreakdownResponse>) = client
        .get_json("/api/analytics/breakdown?query=food")
        .await;
    let response = parsed.unwrap();

    assert_eq!(response.breakdowns.len(), 1);
    assert_eq!(response.breakdowns[0].category, "Food");
    // The overall total is unaffected by filtering.
    assert_eq!(response.total, 200.0);
}

#[tokio::test]
async fn test_filter_matches_formatted_percentage() {
    // Food 120 (60%), Transport 80 (40%): "40" matches only the
    // Transport percentage.
    let client = seeded_client().await;

    let (_, parsed): (_, Option<BreakdownResponse>) = client
        .get_json("/api/analytics/breakdown?query=40")
        .await;
    let response = parsed.unwrap();

    assert_eq!(response.breakdowns.len(), 1);
    assert_eq!(response.breakdowns[0].category, "Transport");
}

#[tokio::test]
async fn test_breakdown_reflects_mutations() {
    let client = seeded_client().await;

    let (status, _) = client.delete("/api/expenses").await;
    assert_eq!(status, StatusCode::OK);

    let (_, parsed): (_, Option<BreakdownResponse>) =
        client.get_json("/api/analytics/breakdown").await;
    let response = parsed.unwrap();
    assert_eq!(response.total, 0.0);
    assert!(response.breakdowns.is_empty());
}

#[tokio::test]
async fn test_breakdown_requires_login() {
    let client = TestClient::new();
    let (status, _) = client.get("/api/analytics/breakdown").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
