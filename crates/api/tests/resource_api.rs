//! HTTP-level integration tests for the generic resource endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, signed_in};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn student(name: &str, program: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "program": program,
        "year_level": "2",
        "date": "2024-06-01",
        "email": "student@school.test",
        "contact": "09171234567"
    })
}

// ---------------------------------------------------------------------------
// CRUD lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let created = post_json(&app, "/api/student", cookie, student("Ana Reyes", "BSIT")).await;
    assert_eq!(created.status(), StatusCode::OK);
    let json = body_json(created).await;
    assert_eq!(json["message"], "Student added");
    let id = json["id"].as_i64().unwrap();

    let fetched = body_json(get(&app, &format!("/api/student/{id}"), cookie).await).await;
    assert_eq!(fetched["name"], "Ana Reyes");
    assert_eq!(fetched["date"], "2024-06-01");

    let updated = put_json(
        &app,
        &format!("/api/student/{id}"),
        cookie,
        student("Ana Reyes", "BSCS"),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["message"], "Student updated");

    let fetched = body_json(get(&app, &format!("/api/student/{id}"), cookie).await).await;
    assert_eq!(fetched["program"], "BSCS");

    let deleted = delete(&app, &format!("/api/student/{id}"), cookie).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["message"], "Student deleted");

    let gone = get(&app, &format!("/api/student/{id}"), cookie).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_rows_are_not_found(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let body = serde_json::json!({ "type": "Misc", "amount": 10 });
    assert_eq!(
        put_json(&app, "/api/tuition-fee/999", cookie, body).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        delete(&app, "/api/tuition-fee/999", cookie).await.status(),
        StatusCode::NOT_FOUND
    );
    let response = get(&app, "/api/tuition-fee/999", cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_ids_use_the_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    for uri in ["/api/student/abc", "/api/audit-log/abc"] {
        let response = get(&app, uri, cookie).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    let response = delete(&app, "/api/tuition-fee/1.5", cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filter_is_case_insensitive(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    for (name, program) in [("Ana Reyes", "BSIT"), ("Ben Cruz", "BSN"), ("Carla Dy", "BSIT")] {
        post_json(&app, "/api/student", cookie, student(name, program)).await;
    }

    let all = body_json(get(&app, "/api/student", cookie).await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let filtered = body_json(get(&app, "/api/student?filter=bsit", cookie).await).await;
    let names: Vec<&str> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana Reyes", "Carla Dy"]);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_message_is_itemized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let response = post_json(
        &app,
        "/api/payment-plan",
        cookie,
        serde_json::json!({ "name": "", "amount": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Invalid input: amount must be a positive number; name is required"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payment_plans")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_numeric_text_and_camel_case_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let created = post_json(
        &app,
        "/api/student-payment",
        cookie,
        serde_json::json!({
            "studentId": "2024-001",
            "studentName": "Ana Reyes",
            "amount": "1500.50",
            "description": "Prelim"
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let row = body_json(get(&app, &format!("/api/student-payment/{id}"), cookie).await).await;
    assert_eq!(row["studentId"], "2024-001");
    assert_eq!(row["amount"].as_f64(), Some(1500.5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;

    let response = common::post_raw(
        &app,
        "/api/tuition-fee",
        Some(&cookie),
        "application/json",
        "{not json",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Refunds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refund_status_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let created = post_json(
        &app,
        "/api/request-refund",
        cookie,
        serde_json::json!({ "paymentId": "P-1", "amount": 200 }),
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();
    let uri = format!("/api/request-refund/{id}");

    let row = body_json(get(&app, &uri, cookie).await).await;
    assert_eq!(row["status"], "Pending");

    put_json(
        &app,
        &uri,
        cookie,
        serde_json::json!({ "paymentId": "P-1", "amount": 200, "status": "Approved" }),
    )
    .await;
    put_json(
        &app,
        &uri,
        cookie,
        serde_json::json!({ "paymentId": "P-1", "amount": 180, "description": "partial" }),
    )
    .await;

    let row = body_json(get(&app, &uri, cookie).await).await;
    assert_eq!(row["status"], "Approved");
    assert_eq!(row["amount"].as_f64(), Some(180.0));

    let bad = put_json(
        &app,
        &uri,
        cookie,
        serde_json::json!({ "paymentId": "P-1", "amount": 180, "status": "Refunded" }),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refund_requested_from_payment(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let created = post_json(
        &app,
        "/api/student-payment",
        cookie,
        serde_json::json!({ "studentId": "2024-001", "studentName": "Ana", "amount": 900 }),
    )
    .await;
    let payment_id = body_json(created).await["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/student-payment/{payment_id}/refund"),
        cookie,
        serde_json::json!({ "description": "Dropped subject" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Refund requested");
    let refund_id = json["id"].as_i64().unwrap();

    let refund = body_json(get(&app, &format!("/api/request-refund/{refund_id}"), cookie).await).await;
    assert_eq!(refund["paymentId"], payment_id.to_string());
    assert_eq!(refund["amount"].as_f64(), Some(900.0));
    assert_eq!(refund["status"], "Pending");
    assert_eq!(refund["description"], "Dropped subject");

    let dashboard = body_json(get(&app, "/api/dashboard", cookie).await).await;
    assert_eq!(dashboard["pending_refunds"], 1);
    assert_eq!(dashboard["student_payments"], 1);

    let missing = post_json(
        &app,
        "/api/student-payment/9999/refund",
        cookie,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
