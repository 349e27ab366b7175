use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use ecotrack_backend::docs;
use serde_json::Value;
use tower::ServiceExt;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn swagger_router() -> Router {
    let openapi = docs::ApiDoc::openapi();
    Router::new().merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", openapi))
}

#[test]
fn openapi_includes_resource_paths_and_bearer_scheme() {
    let json = serde_json::to_value(docs::ApiDoc::openapi()).expect("serialize openapi");

    let paths = json
        .get("paths")
        .and_then(|v| v.as_object())
        .expect("paths object");
    assert!(paths.contains_key("/api/business-organizations"));
    assert!(paths.contains_key("/api/sustainability-goals"));
    assert!(paths.contains_key("/api/sustainability-goals/{id}"));

    let bearer = json
        .pointer("/components/securitySchemes/BearerAuth")
        .expect("BearerAuth scheme");
    assert_eq!(bearer.get("type").and_then(Value::as_str), Some("http"));
    assert_eq!(bearer.get("scheme").and_then(Value::as_str), Some("bearer"));
}

#[tokio::test]
async fn swagger_ui_redirects_to_index() {
    let response = swagger_router()
        .oneshot(
            Request::builder()
                .uri("/api/docs")
                .body(Body::empty())
                .expect("build docs request"),
        )
        .await
        .expect("call swagger ui");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/api/docs/");
}

#[tokio::test]
async fn openapi_json_route_serves_document() {
    let response = swagger_router()
        .oneshot(
            Request::builder()
                .uri("/api-doc/openapi.json")
                .body(Body::empty())
                .expect("build openapi request"),
        )
        .await
        .expect("call openapi route");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json: Value = serde_json::from_slice(&body).expect("parse openapi json");
    assert_eq!(
        json.pointer("/info/title").and_then(Value::as_str),
        Some("ecotrack-backend")
    );
}
