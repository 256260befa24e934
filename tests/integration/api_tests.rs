//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create a booking session and return its id
async fn create_session(client: &Client) -> String {
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to create booking session");

    let body: Value = response.json().await.expect("Failed to parse session response");
    body["id"].as_str().expect("No id in response").to_string()
}

/// Helper to set one field of a session
async fn set_field(client: &Client, id: &str, field: &str, value: &str) -> Value {
    let response = client
        .put(format!("{}/bookings/{}/fields/{}", BASE_URL, id, field))
        .json(&json!({ "value": value }))
        .send()
        .await
        .expect("Failed to set field");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse field response")
}

/// Tomorrow in YYYY-MM-DD, always a bookable date
fn tomorrow() -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
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
async fn test_list_services() {
    let client = Client::new();

    let response = client
        .get(format!("{}/services", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[tokio::test]
#[ignore]
async fn test_service_quote() {
    let client = Client::new();

    let response = client
        .get(format!("{}/services/haircut/quote", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let total = body["quote"]["total"].as_u64().unwrap();
    let advance = body["quote"]["advance"].as_u64().unwrap();
    let remaining = body["quote"]["remaining"].as_u64().unwrap();
    assert_eq!(advance + remaining, total);
}

#[tokio::test]
#[ignore]
async fn test_booking_walkthrough() {
    let client = Client::new();
    let id = create_session(&client).await;

    set_field(&client, &id, "name", "Jane Doe").await;
    set_field(&client, &id, "phone", "9876543210").await;
    set_field(&client, &id, "service", "haircut").await;
    set_field(&client, &id, "date", &tomorrow()).await;
    set_field(&client, &id, "time", "10:00").await;
    let last = set_field(&client, &id, "address", "123 Main Street").await;
    assert_eq!(last["stage"], "valid");

    let response = client
        .post(format!("{}/bookings/{}/submit", BASE_URL, id))
        .send()
        .await
        .expect("Failed to submit booking");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse submit response");
    assert_eq!(body["stage"], "payment_pending");
    assert!(body["quote"]["advance"].as_u64().unwrap() > 0);

    let response = client
        .post(format!("{}/bookings/{}/confirm", BASE_URL, id))
        .send()
        .await
        .expect("Failed to confirm booking");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse confirm response");
    assert_eq!(body["delivery"], "unverified");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Name: Jane Doe"));
    assert!(body["handoff_url"].as_str().unwrap().contains("wa.me"));

    // The session is discarded after the handoff
    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to fetch session");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_submit_reports_all_invalid_fields() {
    let client = Client::new();
    let id = create_session(&client).await;

    set_field(&client, &id, "phone", "98765").await;

    let response = client
        .post(format!("{}/bookings/{}/submit", BASE_URL, id))
        .send()
        .await
        .expect("Failed to submit booking");
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse error response");
    let fields = body["fields"].as_array().expect("No fields in error");
    assert!(fields.len() >= 6);
}

#[tokio::test]
#[ignore]
async fn test_confirm_without_submit_conflicts() {
    let client = Client::new();
    let id = create_session(&client).await;

    let response = client
        .post(format!("{}/bookings/{}/confirm", BASE_URL, id))
        .send()
        .await
        .expect("Failed to confirm booking");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_location_map_url_always_succeeds() {
    let client = Client::new();

    let response = client
        .post(format!("{}/location/map-url", BASE_URL))
        .json(&json!({ "high_accuracy": false }))
        .send()
        .await
        .expect("Failed to request map url");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["map_url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
#[ignore]
async fn test_contact_and_referral() {
    let client = Client::new();

    let response = client
        .post(format!("{}/contact", BASE_URL))
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "message": "Do you serve my area on weekends?"
        }))
        .send()
        .await
        .expect("Failed to send contact message");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/referral", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch referral");
    let body: Value = response.json().await.expect("Failed to parse referral");
    assert!(body["share_text"].as_str().unwrap().contains(body["code"].as_str().unwrap()));
}
