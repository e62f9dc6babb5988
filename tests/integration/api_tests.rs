//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create a book and return its id
async fn create_book(client: &Client, title: &str, author: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": title, "author": author }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book");
    body["id"].as_i64().expect("No id in response")
}

async fn delete_book(client: &Client, id: i64) {
    client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send delete request");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_get_delete_book() {
    let client = Client::new();
    let id = create_book(&client, "The Left Hand of Darkness", "Le Guin").await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"], "Le Guin");

    delete_book(&client, id).await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_invalid_book_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "No", "author": "" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_search_books() {
    let client = Client::new();
    let id = create_book(&client, "Solaris", "Stanislaw Lem").await;

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[("search_term", "lem")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|book| book["id"] == id));

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_reserve_and_return() {
    let client = Client::new();
    let id = create_book(&client, "Hyperion", "Dan Simmons").await;

    let response = client
        .post(format!("{}/reservations/reserve/{}", BASE_URL, id))
        .query(&[("comment", "reading club")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["reservation"]["status"], "CheckedOut");

    // Second reserve is a business rule violation
    let response = client
        .post(format!("{}/reservations/reserve/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "The book is already reserved");

    let reserved: Value = client
        .get(format!("{}/reservations/reserved_books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(reserved
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|book| book["id"] == id && book["reservation_comment"] == "reading club"));

    let response = client
        .post(format!("{}/reservations/return/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let available: Value = client
        .get(format!("{}/reservations/available_books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert!(available
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|book| book["id"] == id));

    let history: Value = client
        .get(format!("{}/reservations/history", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let entry = history
        .as_array()
        .expect("Expected an array")
        .iter()
        .find(|entry| entry["id"] == id)
        .expect("Book missing from history");
    assert_eq!(entry["reservations"].as_array().map(Vec::len), Some(2));

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_reserve_unknown_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/reservations/reserve/{}", BASE_URL, i32::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Please enter a valid Book ID");
}

#[tokio::test]
#[ignore]
async fn test_concurrent_reserves_check_out_once() {
    let client = Client::new();
    let id = create_book(&client, "Neuromancer", "William Gibson").await;

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .post(format!("{}/reservations/reserve/{}", BASE_URL, id))
                    .query(&[("comment", format!("reader {}", n))])
                    .send()
                    .await
                    .expect("Failed to send request")
                    .status()
            })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        let status = handle.await.expect("Request task panicked");
        if status.is_success() {
            succeeded += 1;
        } else {
            assert_eq!(status, 400);
        }
    }
    assert_eq!(succeeded, 1);

    let history: Value = client
        .get(format!("{}/reservations/history", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let entry = history
        .as_array()
        .expect("Expected an array")
        .iter()
        .find(|entry| entry["id"] == id)
        .expect("Book missing from history");
    assert_eq!(entry["reservations"].as_array().map(Vec::len), Some(1));

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_create_reservation_for_missing_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .json(&json!({
            "book_id": i32::MAX,
            "status_changing_date": "2024-05-01T12:00:00Z",
            "status": "CheckedOut",
            "comment": null
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Please enter a valid Book ID");
}
