use serde_json::json;

use crate::helpers::{assert_error, valid_contact, TestApp};

#[tokio::test]
async fn submit_returns_a_200_and_the_contact_is_listed() {
    let app = TestApp::spawn().await;

    let response = app.post_submit(&valid_contact()).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Thank you for contacting us! We will get back to you soon."
    );
    let id = body["id"].as_i64().expect("id is not a number");

    let (status, listing) = app.get_json("/contacts").await;
    assert_eq!(status, 200);
    assert_eq!(listing["success"], true);
    assert_eq!(listing["count"], 1);
    let contact = &listing["contacts"][0];
    assert_eq!(contact["id"], id);
    assert_eq!(contact["name"], "Al");
    assert_eq!(contact["email"], "al@x.com");
    assert_eq!(contact["message"], "Hello there, this is long enough.");
    assert!(contact["created_at"].is_string());
}

#[tokio::test]
async fn submit_assigns_strictly_increasing_ids() {
    let app = TestApp::spawn().await;

    let mut previous = 0;
    for _ in 0..5 {
        let body: serde_json::Value = app.post_submit(&valid_contact()).await.json().await.unwrap();
        let id = body["id"].as_i64().unwrap();
        assert!(id > previous, "{id} is not greater than {previous}");
        previous = id;
    }
}

#[tokio::test]
async fn submit_stores_sanitized_fields() {
    let app = TestApp::spawn().await;
    let body = json!({
        "name": "<b>Bob</b>",
        "email": "  bob@example.com ",
        "message": "<script>alert('hi')</script>Please call me back soon. "
    });

    let response = app.post_submit(&body).await;
    assert_eq!(response.status().as_u16(), 200);

    let (_, listing) = app.get_json("/contacts").await;
    let contact = &listing["contacts"][0];
    assert_eq!(contact["name"], "Bob");
    assert_eq!(contact["email"], "bob@example.com");
    assert_eq!(contact["message"], "alert('hi')Please call me back soon.");
}

#[tokio::test]
async fn contacts_are_listed_newest_first() {
    let app = TestApp::spawn().await;
    let mut first = valid_contact();
    first["name"] = json!("Alice");
    let mut second = valid_contact();
    second["name"] = json!("Bruno");

    app.post_submit(&first).await;
    app.post_submit(&second).await;

    let (_, listing) = app.get_json("/contacts").await;
    assert_eq!(listing["count"], 2);
    assert_eq!(listing["contacts"][0]["name"], "Bruno");
    assert_eq!(listing["contacts"][1]["name"], "Alice");
}

#[tokio::test]
async fn submit_returns_a_400_when_fields_are_missing() {
    let app = TestApp::spawn().await;
    let test_cases = vec![
        (json!({"email": "al@x.com", "message": "Hello there, long enough"}), "missing the name"),
        (json!({"name": "Al", "message": "Hello there, long enough"}), "missing the email"),
        (json!({"name": "Al", "email": "al@x.com"}), "missing the message"),
        (json!({}), "an empty object"),
        (json!(null), "null"),
    ];

    for (body, description) in test_cases {
        let response = app.post_submit(&body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 Bad Request when the payload was {description}"
        );
        assert_error(response, 400, "Missing required fields").await;
    }

    let response = app.post_raw("/submit", "").await;
    assert_error(response, 400, "Missing required fields").await;
}

#[tokio::test]
async fn submit_returns_a_400_with_the_failing_rule() {
    let app = TestApp::spawn().await;
    let message = "Hello there, long enough";
    let test_cases = vec![
        (json!({"name": "A", "email": "al@x.com", "message": message}), "Name must be at least 2 characters"),
        (json!({"name": null, "email": "al@x.com", "message": message}), "Name must be at least 2 characters"),
        (json!({"name": "<i></i> A ", "email": "al@x.com", "message": message}), "Name must be at least 2 characters"),
        (json!({"name": "Al", "email": "not-an-email", "message": message}), "Invalid email address"),
        (json!({"name": "Al", "email": "a@b", "message": message}), "Invalid email address"),
        (json!({"name": "Al", "email": "@b.com", "message": message}), "Invalid email address"),
        (json!({"name": "Al", "email": "al@x.com", "message": "too short"}), "Message must be at least 10 characters"),
        (json!({"name": "Al", "email": "al@x.com", "message": "<p>tiny</p>      "}), "Message must be at least 10 characters"),
    ];

    for (body, expected) in test_cases {
        let response = app.post_submit(&body).await;
        assert_error(response, 400, expected).await;
    }

    // Nothing reached the database
    let (_, listing) = app.get_json("/contacts").await;
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn submit_treats_blank_non_string_values_as_empty_text() {
    let app = TestApp::spawn().await;
    let message = "Hello there, long enough";
    let test_cases = vec![
        (json!({"name": false, "email": "al@x.com", "message": message}), "Name must be at least 2 characters"),
        (json!({"name": "Al", "email": 0, "message": message}), "Invalid email address"),
        (json!({"name": "Al", "email": "al@x.com", "message": []}), "Message must be at least 10 characters"),
        (json!({"name": "Al", "email": {}, "message": message}), "Invalid email address"),
    ];

    for (body, expected) in test_cases {
        let response = app.post_submit(&body).await;
        assert_error(response, 400, expected).await;
    }

    // A blank top-level value is a missing body
    for body in ["false", "0", "[]", "\"\""] {
        let response = app.post_raw("/submit", body).await;
        assert_error(response, 400, "Missing required fields").await;
    }
}

#[tokio::test]
async fn submit_returns_a_500_for_unparseable_json() {
    let app = TestApp::spawn().await;

    let response = app.post_raw("/submit", "{\"name\": \"Al\",").await;
    assert_error(response, 500, "Internal server error. Please try again later.").await;

    let response = app
        .post_raw("/submit", r#"{"name": 7, "email": "al@x.com", "message": "Hello there, long enough"}"#)
        .await;
    assert_error(response, 500, "Internal server error. Please try again later.").await;
}

#[tokio::test]
async fn database_failures_are_reported_as_a_generic_500() {
    let app = TestApp::spawn().await;
    let mut conn = app.db_connection().await;
    sqlx::query("DROP TABLE contacts")
        .execute(&mut conn)
        .await
        .unwrap();

    let response = app.post_submit(&valid_contact()).await;
    assert_error(response, 500, "Internal server error. Please try again later.").await;

    let response = app.get("/contacts").await;
    assert_error(response, 500, "Internal server error").await;
}
