use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{business_organizations, common::method_not_allowed, health, sustainability_goals},
    middleware,
    state::AppState,
};

/// Authenticated resource routes, without the shared layers.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/business-organizations",
            get(business_organizations::list_business_organizations)
                .post(business_organizations::create_business_organization)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/sustainability-goals",
            get(sustainability_goals::list_sustainability_goals)
                .post(sustainability_goals::create_sustainability_goal)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/sustainability-goals/{id}",
            get(sustainability_goals::get_sustainability_goal)
                .put(sustainability_goals::update_sustainability_goal)
                .delete(sustainability_goals::delete_sustainability_goal)
                .fallback(sustainability_goals::sustainability_goal_method_not_allowed),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth,
        ))
        .with_state(state)
}

/// The complete application: public routes, API routes, docs and shared layers.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allow_origins);

    Router::new()
        .route("/api/health", get(health::health))
        .merge(api_routes(state))
        .merge(SwaggerUi::new("/api/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::log_error_responses))
                .layer(cors),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(24 * 60 * 60))
}
