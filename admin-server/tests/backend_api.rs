//! Black-box tests for the backend customers endpoints: the router is driven
//! directly as a tower service, with an in-memory database and a temp invoice
//! directory.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use admin_server::core::{Config, ServerState};
use admin_server::db::DbService;
use admin_server::routes::build_app;
use admin_server::services::{FileRenderer, InvoiceMailer, LogMailer, MailerError, StaticTokenGuard};

const TOKEN: &str = "test-token";

/// Mailer that always fails; used to assert mail is best-effort.
struct FailingMailer;

#[async_trait]
impl InvoiceMailer for FailingMailer {
    async fn send(&self, _recipient: &str, _artifact: &Path) -> Result<(), MailerError> {
        Err(MailerError::Delivery("smtp unreachable".into()))
    }
}

async fn test_app_with_mailer(mailer: Arc<dyn InvoiceMailer>) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().to_path_buf(),
        http_port: 0,
        base_url: "http://localhost:3000".into(),
        csrf_token: TOKEN.into(),
        log_level: "warn".into(),
    };
    std::fs::create_dir_all(config.invoice_dir()).unwrap();

    let db = DbService::in_memory().await.unwrap();
    let state = ServerState::with_parts(
        config,
        db.pool,
        Arc::new(FileRenderer),
        mailer,
        Arc::new(StaticTokenGuard::new(TOKEN)),
    );

    (build_app(&state).with_state(state), dir)
}

async fn test_app() -> (Router, tempfile::TempDir) {
    test_app_with_mailer(Arc::new(LogMailer)).await
}

async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn save_customer(app: &Router, first: &str, last: &str, email: &str) -> i64 {
    let (status, body) = post(
        app,
        "/backend_api/ajax_save_customer",
        json!({
            "csrfToken": TOKEN,
            "customer": {"first_name": first, "last_name": last, "email": email}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "save failed: {body}");
    body["id"].as_i64().unwrap()
}

async fn filter(app: &Router, key: &str) -> Vec<Value> {
    let (status, body) = post(
        app,
        "/backend_api/ajax_filter_customers",
        json!({"csrfToken": TOKEN, "key": key}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}

/// Seed one appointment with a fixed id for a customer.
async fn seed_appointment(app_state_pool: &sqlx::SqlitePool, id: i64, customer_id: i64) {
    sqlx::query("INSERT OR IGNORE INTO service (id, name) VALUES (1, 'Haircut')")
        .execute(app_state_pool)
        .await
        .unwrap();
    sqlx::query("INSERT OR IGNORE INTO provider (id, first_name, last_name) VALUES (1, 'Jane', 'Doe')")
        .execute(app_state_pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO appointment (id, customer_id, service_id, provider_id, start_datetime, end_datetime) VALUES (?, ?, 1, 1, '2016-05-01 10:00:00', '2016-05-01 11:00:00')",
    )
    .bind(id)
    .bind(customer_id)
    .execute(app_state_pool)
    .await
    .unwrap();
}

// Variant of test_app that also exposes the pool for seeding.
async fn test_app_with_pool() -> (Router, sqlx::SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        work_dir: dir.path().to_path_buf(),
        http_port: 0,
        base_url: "http://localhost:3000".into(),
        csrf_token: TOKEN.into(),
        log_level: "warn".into(),
    };
    std::fs::create_dir_all(config.invoice_dir()).unwrap();

    let db = DbService::in_memory().await.unwrap();
    let pool = db.pool.clone();
    let state = ServerState::with_parts(
        config,
        db.pool,
        Arc::new(FileRenderer),
        Arc::new(LogMailer),
        Arc::new(StaticTokenGuard::new(TOKEN)),
    );

    (build_app(&state).with_state(state), pool, dir)
}

#[tokio::test]
async fn filter_matches_substring_case_insensitively() {
    let (app, _dir) = test_app().await;
    save_customer(&app, "John", "Smith", "john@smith.co").await;
    save_customer(&app, "Ada", "Lee", "ada@lee.co").await;

    let result = filter(&app, "smi").await;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["last_name"], "Smith");
    assert!(result[0]["appointments"].as_array().unwrap().is_empty());
    assert!(result[0]["invoices"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn saved_customer_appears_in_unfiltered_results() {
    let (app, _dir) = test_app().await;
    let id = save_customer(&app, "A", "B", "a@b.co").await;
    assert!(id > 0);

    let result = filter(&app, "").await;
    assert!(result.iter().any(|c| c["id"].as_i64() == Some(id)));
}

#[tokio::test]
async fn save_without_first_name_is_a_validation_error() {
    let (app, _dir) = test_app().await;
    let (status, body) = post(
        &app,
        "/backend_api/ajax_save_customer",
        json!({
            "csrfToken": TOKEN,
            "customer": {"first_name": "", "last_name": "B", "email": "a@b.co"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let exception = &body["exceptions"][0];
    assert_eq!(exception["kind"], "validation-error");
    assert_eq!(exception["fields"][0], "first_name");
}

#[tokio::test]
async fn save_then_filter_round_trips_field_values() {
    let (app, _dir) = test_app().await;
    let id = save_customer(&app, "John", "Smith", "john@smith.co").await;

    // Edit through the same endpoint, then re-filter with the same key.
    let (status, _) = post(
        &app,
        "/backend_api/ajax_save_customer",
        json!({
            "csrfToken": TOKEN,
            "customer": {"id": id, "first_name": "John", "last_name": "Smith",
                         "email": "john@smith.co", "city": "Athens"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let result = filter(&app, "smith").await;
    assert_eq!(result[0]["city"], "Athens");
}

#[tokio::test]
async fn appointment_flags_survive_a_fresh_filter() {
    let (app, pool, _dir) = test_app_with_pool().await;
    let customer_id = save_customer(&app, "John", "Smith", "john@smith.co").await;
    seed_appointment(&pool, 7, customer_id).await;

    let (status, _) = post(
        &app,
        "/backend_api/ajax_save_appointment_checked",
        json!({"csrfToken": TOKEN, "id": 7, "is_paid": 1, "is_shown": 0, "is_invoice": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let result = filter(&app, "smith").await;
    let appointment = &result[0]["appointments"][0];
    assert_eq!(appointment["id"], 7);
    assert_eq!(appointment["is_paid"], 1);
    assert_eq!(appointment["is_shown"], 0);
    assert_eq!(appointment["is_invoice"], 1);
}

#[tokio::test]
async fn flag_toggle_rejects_non_binary_values_and_unknown_ids() {
    let (app, _dir) = test_app().await;

    let (status, body) = post(
        &app,
        "/backend_api/ajax_save_appointment_checked",
        json!({"csrfToken": TOKEN, "id": 7, "is_paid": 2, "is_shown": 0, "is_invoice": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["exceptions"][0]["kind"], "bad-argument");

    let (status, body) = post(
        &app,
        "/backend_api/ajax_save_appointment_checked",
        json!({"csrfToken": TOKEN, "id": 999, "is_paid": 1, "is_shown": 0, "is_invoice": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["exceptions"][0]["kind"], "not-found");
}

#[tokio::test]
async fn create_invoice_returns_descriptor_and_fresh_hashes() {
    let (app, _dir) = test_app().await;
    let customer_id = save_customer(&app, "John", "Smith", "john@smith.co").await;

    let (status, first) = post(
        &app,
        "/backend_api/ajax_create_invoice",
        json!({"csrfToken": TOKEN, "id_users_customer": customer_id, "sendEmail": false}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let hash = first["hash"].as_str().unwrap();
    assert!(first["filename"].as_str().unwrap().contains(hash));
    assert!(first["id"].as_i64().unwrap() > 0);
    assert!(first.get("email_sent").is_none());

    let (_, second) = post(
        &app,
        "/backend_api/ajax_create_invoice",
        json!({"csrfToken": TOKEN, "id_users_customer": customer_id, "sendEmail": false}),
    )
    .await;
    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["hash"], second["hash"]);

    // Both descriptors are mirrored into subsequent aggregates.
    let result = filter(&app, "smith").await;
    assert_eq!(result[0]["invoices"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_invoice_for_unknown_customer_is_not_found() {
    let (app, _dir) = test_app().await;
    let (status, body) = post(
        &app,
        "/backend_api/ajax_create_invoice",
        json!({"csrfToken": TOKEN, "id_users_customer": 999, "sendEmail": false}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["exceptions"][0]["kind"], "not-found");
}

#[tokio::test]
async fn mail_failure_is_reported_but_invoice_persists() {
    let (app, _dir) = test_app_with_mailer(Arc::new(FailingMailer)).await;
    let customer_id = save_customer(&app, "John", "Smith", "john@smith.co").await;

    let (status, body) = post(
        &app,
        "/backend_api/ajax_create_invoice",
        json!({"csrfToken": TOKEN, "id_users_customer": customer_id, "sendEmail": true}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email_sent"], false);

    let result = filter(&app, "smith").await;
    assert_eq!(result[0]["invoices"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_rejects_non_numeric_and_tolerates_absent_ids() {
    let (app, _dir) = test_app().await;

    let (status, body) = post(
        &app,
        "/backend_api/ajax_delete_customer",
        json!({"csrfToken": TOKEN, "customer_id": "abc"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["exceptions"][0]["kind"], "bad-argument");

    let (status, _) = post(
        &app,
        "/backend_api/ajax_delete_customer",
        json!({"csrfToken": TOKEN, "customer_id": 999}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Replaying a real delete is also success.
    let id = save_customer(&app, "A", "B", "a@b.co").await;
    for _ in 0..2 {
        let (status, _) = post(
            &app,
            "/backend_api/ajax_delete_customer",
            json!({"csrfToken": TOKEN, "customer_id": id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn wrong_csrf_token_is_rejected() {
    let (app, _dir) = test_app().await;
    let (status, body) = post(
        &app,
        "/backend_api/ajax_filter_customers",
        json!({"csrfToken": "wrong", "key": ""}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["exceptions"][0]["kind"], "bad-argument");
}
