use axum::http::StatusCode;
use ecotrack_backend::{routes, state::AppState, types::BusinessOrganizationId};
use serde_json::{json, Value};
use sqlx::PgPool;

mod support;
use support::{call, create_test_token, json_request, seed_goal, seed_organization, test_config};

fn app(pool: PgPool) -> axum::Router {
    routes::app(AppState::new(pool, test_config()))
}

#[sqlx::test(migrations = "./migrations")]
async fn put_then_get_round_trip(pool: PgPool) {
    let org = seed_organization(&pool, "tenant-a", "Acme").await;
    let goal = seed_goal(&pool, org.id, "Reduce CO2").await;
    let app = app(pool);
    let token = create_test_token("tenant-a", &["team-member"]);
    let uri = format!("/api/sustainability-goals/{}", goal.id);

    let body = json!({
        "goal_name": "Reduce CO2 by half",
        "target_value": 50,
        "current_value": 20,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-06-01T12:00:00+02:00",
        "business_organization_id": org.id.to_string(),
    });
    let (status, updated) = call(&app, json_request("PUT", &uri, &token, Some(body))).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {updated}");
    assert_eq!(updated["goal_name"], "Reduce CO2 by half");
    assert_eq!(updated["target_value"], 50);
    assert_eq!(updated["updated_at"], "2024-06-01T10:00:00Z");

    let (status, fetched) = call(&app, json_request("GET", &uri, &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);
}

#[sqlx::test(migrations = "./migrations")]
async fn put_into_foreign_organization_is_forbidden(pool: PgPool) {
    let own = seed_organization(&pool, "tenant-a", "Acme").await;
    let foreign = seed_organization(&pool, "tenant-b", "Other").await;
    let goal = seed_goal(&pool, own.id, "Reduce CO2").await;
    let app = app(pool.clone());
    let token = create_test_token("tenant-a", &["team-member"]);

    let body = json!({
        "goal_name": "Reduce CO2",
        "target_value": 100,
        "current_value": 10,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "business_organization_id": foreign.id.to_string(),
    });
    let (status, _) = call(
        &app,
        json_request(
            "PUT",
            &format!("/api/sustainability-goals/{}", goal.id),
            &token,
            Some(body),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let parent: BusinessOrganizationId = sqlx::query_scalar(
        "SELECT business_organization_id FROM sustainability_goals WHERE id = $1",
    )
    .bind(goal.id)
    .fetch_one(&pool)
    .await
    .expect("fetch goal parent");
    assert_eq!(parent, own.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn get_with_non_matching_filter_returns_null(pool: PgPool) {
    let org = seed_organization(&pool, "tenant-a", "Acme").await;
    let goal = seed_goal(&pool, org.id, "Reduce CO2").await;
    let app = app(pool);
    let token = create_test_token("tenant-a", &["viewer"]);

    let (status, json) = call(
        &app,
        json_request(
            "GET",
            &format!("/api/sustainability-goals/{}?goal_name=Other", goal.id),
            &token,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
async fn other_tenant_is_forbidden_for_every_method(pool: PgPool) {
    let org = seed_organization(&pool, "tenant-a", "Acme").await;
    let goal = seed_goal(&pool, org.id, "Reduce CO2").await;
    let app = app(pool);
    let token = create_test_token("tenant-b", &["owner"]);
    let uri = format!("/api/sustainability-goals/{}", goal.id);

    for method in ["GET", "DELETE", "PATCH"] {
        let (status, _) = call(&app, json_request(method, &uri, &token, None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} should be forbidden");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_is_method_not_allowed_after_access_check(pool: PgPool) {
    let org = seed_organization(&pool, "tenant-a", "Acme").await;
    let goal = seed_goal(&pool, org.id, "Reduce CO2").await;
    let app = app(pool);
    let token = create_test_token("tenant-a", &["admin"]);

    let (status, json) = call(
        &app,
        json_request(
            "PATCH",
            &format!("/api/sustainability-goals/{}", goal.id),
            &token,
            Some(json!({ "current_value": 1 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({ "message": "Method PATCH not allowed" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_goal_and_later_access_is_denied(pool: PgPool) {
    let org = seed_organization(&pool, "tenant-a", "Acme").await;
    let goal = seed_goal(&pool, org.id, "Reduce CO2").await;
    let app = app(pool.clone());
    let uri = format!("/api/sustainability-goals/{}", goal.id);

    let member = create_test_token("tenant-a", &["team-member"]);
    let (status, _) = call(&app, json_request("DELETE", &uri, &member, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let owner = create_test_token("tenant-a", &["owner"]);
    let (status, deleted) = call(&app, json_request("DELETE", &uri, &owner, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], goal.id.to_string());

    let (status, _) = call(&app, json_request("GET", &uri, &owner, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn create_requires_parent_in_same_tenant(pool: PgPool) {
    let own = seed_organization(&pool, "tenant-a", "Acme").await;
    let foreign = seed_organization(&pool, "tenant-b", "Other").await;
    let app = app(pool);
    let token = create_test_token("tenant-a", &["admin"]);

    let body = |org: String| {
        json!({
            "goal_name": "Solar",
            "target_value": 10,
            "current_value": 0,
            "created_at": "2024-01-01",
            "updated_at": 1704067200000i64,
            "business_organization_id": org,
        })
    };

    let (status, _) = call(
        &app,
        json_request(
            "POST",
            "/api/sustainability-goals",
            &token,
            Some(body(foreign.id.to_string())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = call(
        &app,
        json_request(
            "POST",
            "/api/sustainability-goals",
            &token,
            Some(body(own.id.to_string())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {created}");
    assert_eq!(created["updated_at"], "2024-01-01T00:00:00Z");

    let (status, listed) = call(
        &app,
        json_request("GET", "/api/sustainability-goals?goal_name=Solar", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}
