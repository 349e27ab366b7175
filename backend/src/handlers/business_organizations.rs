use std::collections::HashMap;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppError,
    handlers::common::{ensure_permitted, from_validated},
    models::{
        actor::Actor,
        business_organization::{BusinessOrganization, CreateBusinessOrganization},
    },
    repositories::{business_organization::FILTER_COLUMNS, ListQuery},
    services::{
        access_policy::{Operation, Resource},
        nested_create::shape_nested_create,
    },
    state::AppState,
    validation::schemas::validate_business_organization,
};

pub async fn list_business_organizations(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<BusinessOrganization>>, AppError> {
    ensure_permitted(&state, &actor, Resource::BusinessOrganization, Operation::Read)?;
    let query = ListQuery::from_params(&params, FILTER_COLUMNS)?;

    let organizations = state
        .organizations
        .find_many(&state.pool, &actor.tenant_id, &query)
        .await?;
    Ok(Json(organizations))
}

pub async fn create_business_organization(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<Value>,
) -> Result<Json<BusinessOrganization>, AppError> {
    ensure_permitted(&state, &actor, Resource::BusinessOrganization, Operation::Create)?;

    let validated = validate_business_organization(&body)?;
    let payload: CreateBusinessOrganization = from_validated(shape_nested_create(validated))?;

    if let Some(tenant_id) = payload.tenant_id.as_deref() {
        if tenant_id != actor.tenant_id {
            return Err(AppError::Forbidden(
                "Cannot create an organization in another tenant".into(),
            ));
        }
    }

    let created = state
        .organizations
        .create(&state.pool, &actor.tenant_id, &payload)
        .await?;
    tracing::info!(
        organization_id = %created.id,
        user_id = %actor.user_id,
        "Business organization created"
    );
    Ok(Json(created))
}
