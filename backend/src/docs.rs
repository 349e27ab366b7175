#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::models::{
    business_organization::BusinessOrganization,
    sustainability_goal::{SustainabilityGoal, SustainabilityGoalPayload},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_doc,
        list_business_organizations_doc,
        create_business_organization_doc,
        list_sustainability_goals_doc,
        create_sustainability_goal_doc,
        get_sustainability_goal_doc,
        update_sustainability_goal_doc,
        delete_sustainability_goal_doc
    ),
    components(schemas(BusinessOrganization, SustainabilityGoal, SustainabilityGoalPayload)),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Organizations", description = "Business organizations and nested creation"),
        (name = "Goals", description = "Sustainability goals"),
        (name = "System", description = "Liveness")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, body = serde_json::Value)),
    tag = "System"
)]
fn health_doc() {}

#[utoipa::path(
    get,
    path = "/api/business-organizations",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum rows (1-1000)"),
        ("offset" = Option<i64>, Query, description = "Rows to skip"),
        ("order_by" = Option<String>, Query, description = "Column to sort by"),
        ("order" = Option<String>, Query, description = "asc or desc")
    ),
    responses((status = 200, body = [BusinessOrganization])),
    tag = "Organizations"
)]
fn list_business_organizations_doc() {}

#[utoipa::path(
    post,
    path = "/api/business-organizations",
    request_body(
        content = serde_json::Value,
        description = "Organization fields plus optional child arrays: carbon_footprint, \
                       employee_feedback, sustainability_goal, sustainability_initiative, \
                       waste_management"
    ),
    responses(
        (status = 200, body = BusinessOrganization),
        (status = 400, description = "Validation failed"),
        (status = 405, description = "Method not allowed")
    ),
    tag = "Organizations"
)]
fn create_business_organization_doc() {}

#[utoipa::path(
    get,
    path = "/api/sustainability-goals",
    responses((status = 200, body = [SustainabilityGoal])),
    tag = "Goals"
)]
fn list_sustainability_goals_doc() {}

#[utoipa::path(
    post,
    path = "/api/sustainability-goals",
    request_body = SustainabilityGoalPayload,
    responses(
        (status = 200, body = SustainabilityGoal),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Parent organization not accessible")
    ),
    tag = "Goals"
)]
fn create_sustainability_goal_doc() {}

#[utoipa::path(
    get,
    path = "/api/sustainability-goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, description = "The goal, or null when no goal matches", body = SustainabilityGoal),
        (status = 403, description = "Access denied")
    ),
    tag = "Goals"
)]
fn get_sustainability_goal_doc() {}

#[utoipa::path(
    put,
    path = "/api/sustainability-goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    request_body = SustainabilityGoalPayload,
    responses(
        (status = 200, body = SustainabilityGoal),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Access denied")
    ),
    tag = "Goals"
)]
fn update_sustainability_goal_doc() {}

#[utoipa::path(
    delete,
    path = "/api/sustainability-goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, body = SustainabilityGoal),
        (status = 403, description = "Access denied")
    ),
    tag = "Goals"
)]
fn delete_sustainability_goal_doc() {}
