//! Integration tests for the audit interceptor and `/api/audit-log`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, signed_in, wait_for_audit_rows};
use sqlx::PgPool;

fn fee(name: &str, amount: f64) -> serde_json::Value {
    serde_json::json!({ "type": name, "amount": amount })
}

// ---------------------------------------------------------------------------
// Interceptor
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_successful_mutation_is_recorded(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let created = post_json(&app, "/api/tuition-fee", cookie, fee("Laboratory", 750.0)).await;
    assert_eq!(created.status(), StatusCode::OK);
    assert_eq!(wait_for_audit_rows(&pool, 1).await, 1);

    let rows = body_json(get(&app, "/api/audit-log", cookie).await).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user"], "ana");
    assert_eq!(rows[0]["action"], "POST");
    assert_eq!(rows[0]["path"], "/api/tuition-fee");
    assert_eq!(rows[0]["archived"], false);
    let details = rows[0]["details"].as_str().unwrap();
    assert!(details.starts_with("POST /api/tuition-fee payload="));
    assert!(details.contains("Laboratory"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sensitive_fields_are_redacted(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;

    post_json(
        &app,
        "/api/payment-method",
        Some(&cookie),
        serde_json::json!({ "name": "GCash", "api_token": "tok-123" }),
    )
    .await;
    assert_eq!(wait_for_audit_rows(&pool, 1).await, 1);

    let details: String = sqlx::query_scalar("SELECT details FROM audit_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(details.contains("GCash"));
    assert!(details.contains("[REDACTED]"));
    assert!(!details.contains("tok-123"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_audit_write_failure_does_not_fail_the_request(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;

    sqlx::query("ALTER TABLE audit_logs RENAME TO audit_logs_gone")
        .execute(&pool)
        .await
        .unwrap();

    let created = post_json(&app, "/api/tuition-fee", Some(&cookie), fee("Library", 300.0)).await;
    assert_eq!(created.status(), StatusCode::OK);
    assert_eq!(body_json(created).await["message"], "Tuition fee added");

    // Give the detached audit insert time to fail.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let fees: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tuition_fees WHERE fee_type = 'Library'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(fees, 1);
    let audited: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs_gone")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(audited, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_write_is_rejected_without_mutation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(&app, "/api/tuition-fee", None, fee("Misc", 10.0)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let fees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tuition_fees")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(fees, 0);
    let audited: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(audited, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_mutation_and_reads_are_not_recorded(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    // Validation failure, missing row, plain read, anonymous write.
    post_json(&app, "/api/tuition-fee", cookie, serde_json::json!({})).await;
    delete(&app, "/api/tuition-fee/404", cookie).await;
    get(&app, "/api/tuition-fee", cookie).await;
    post_json(&app, "/api/tuition-fee", None, fee("Misc", 10.0)).await;

    // A successful write afterwards is the only record.
    post_json(&app, "/api/tuition-fee", cookie, fee("Misc", 10.0)).await;
    assert_eq!(wait_for_audit_rows(&pool, 1).await, 1);
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let actions: Vec<String> = sqlx::query_scalar("SELECT action FROM audit_logs")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(actions, vec!["POST".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_records_path_with_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    let created = post_json(&app, "/api/tuition-fee", cookie, fee("Misc", 10.0)).await;
    let id = body_json(created).await["id"].as_i64().unwrap();
    delete(&app, &format!("/api/tuition-fee/{id}"), cookie).await;
    assert_eq!(wait_for_audit_rows(&pool, 2).await, 2);

    let rows = body_json(get(&app, "/api/audit-log?action=delete", cookie).await).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["details"], format!("DELETE /api/tuition-fee/{id}"));
}

// ---------------------------------------------------------------------------
// Audit-log endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_archive_hides_record_but_keeps_it(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let cookie = signed_in(&app, &pool, "ana", "staff").await;
    let cookie = Some(cookie.as_str());

    post_json(&app, "/api/tuition-fee", cookie, fee("Misc", 10.0)).await;
    assert_eq!(wait_for_audit_rows(&pool, 1).await, 1);
    let id: i64 = sqlx::query_scalar("SELECT id FROM audit_logs")
        .fetch_one(&pool)
        .await
        .unwrap();

    let archived = delete(&app, &format!("/api/audit-log/{id}"), cookie).await;
    assert_eq!(archived.status(), StatusCode::OK);
    assert_eq!(body_json(archived).await["message"], "Audit log archived");

    // The archive call is itself audited.
    assert_eq!(wait_for_audit_rows(&pool, 2).await, 2);

    let listed = body_json(get(&app, "/api/audit-log", cookie).await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["action"], "DELETE");

    let fetched = body_json(get(&app, &format!("/api/audit-log/{id}"), cookie).await).await;
    assert_eq!(fetched["archived"], true);

    let missing = delete(&app, "/api/audit-log/99999", cookie).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_include_archived_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let staff = signed_in(&app, &pool, "ana", "staff").await;
    let admin = signed_in(&app, &pool, "root", "admin").await;

    let forbidden = get(&app, "/api/audit-log?include_archived=true", Some(&staff)).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let allowed = get(&app, "/api/audit-log?include_archived=true", Some(&admin)).await;
    assert_eq!(allowed.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_user_text(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let ana = signed_in(&app, &pool, "ana", "staff").await;
    let ben = signed_in(&app, &pool, "ben", "staff").await;

    post_json(&app, "/api/tuition-fee", Some(&ana), fee("Misc", 10.0)).await;
    post_json(&app, "/api/payment-plan", Some(&ben), serde_json::json!({
        "name": "Quarterly",
        "amount": 100
    }))
    .await;
    assert_eq!(wait_for_audit_rows(&pool, 2).await, 2);

    let rows = body_json(get(&app, "/api/audit-log?filter=BEN", Some(&ana)).await).await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["path"], "/api/payment-plan");

    let bad_date = get(&app, "/api/audit-log?date=yesterday", Some(&ana)).await;
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_date).await["code"], "BAD_REQUEST");
}
