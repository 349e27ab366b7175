use std::collections::HashMap;

use axum::{
    extract::{Extension, FromRequestParts, Path, Query, State},
    http::{request::Parts, Method},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppError,
    handlers::common::{ensure_permitted, from_validated},
    models::{
        actor::Actor,
        sustainability_goal::{SustainabilityGoal, SustainabilityGoalPayload},
    },
    repositories::{sustainability_goal::FILTER_COLUMNS, ListQuery},
    services::access_policy::{Operation, Resource},
    state::AppState,
    types::SustainabilityGoalId,
    validation::schemas::SUSTAINABILITY_GOAL,
};

/// A goal id the caller has been cleared to act on with the request's method.
///
/// Extracting this runs the access check, so every item handler (including
/// the 405 fallback) is guarded before it does anything else.
#[derive(Debug, Clone)]
pub struct GoalAccess {
    pub id: SustainabilityGoalId,
    pub actor: Actor,
}

impl FromRequestParts<AppState> for GoalAccess {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let actor = parts
            .extensions
            .get::<Actor>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Missing sustainability goal id".into()))?;
        let id: SustainabilityGoalId = raw_id
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid sustainability goal id".into()))?;

        let operation = Operation::from(&parts.method);
        let allowed = state
            .access_policy
            .has_access(
                &state.pool,
                &actor,
                Resource::SustainabilityGoal,
                &raw_id,
                operation,
            )
            .await?;
        if !allowed {
            return Err(AppError::Forbidden(format!(
                "Not allowed to {} sustainability_goal {}",
                operation.as_str(),
                id
            )));
        }

        Ok(Self { id, actor })
    }
}

pub async fn get_sustainability_goal(
    State(state): State<AppState>,
    access: GoalAccess,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Option<SustainabilityGoal>>, AppError> {
    let query = ListQuery::from_params(&params, FILTER_COLUMNS)?;
    let goal = state.goals.find_first(&state.pool, access.id, &query).await?;
    Ok(Json(goal))
}

pub async fn update_sustainability_goal(
    State(state): State<AppState>,
    access: GoalAccess,
    Json(body): Json<Value>,
) -> Result<Json<SustainabilityGoal>, AppError> {
    let validated = SUSTAINABILITY_GOAL.validate(&body)?;
    let payload: SustainabilityGoalPayload = from_validated(validated)?;
    ensure_parent_access(&state, &access.actor, &payload).await?;

    let goal = state.goals.update(&state.pool, access.id, &payload).await?;
    tracing::info!(goal_id = %goal.id, user_id = %access.actor.user_id, "Sustainability goal updated");
    Ok(Json(goal))
}

pub async fn delete_sustainability_goal(
    State(state): State<AppState>,
    access: GoalAccess,
) -> Result<Json<SustainabilityGoal>, AppError> {
    let goal = state.goals.delete(&state.pool, access.id).await?;
    tracing::info!(goal_id = %goal.id, user_id = %access.actor.user_id, "Sustainability goal deleted");
    Ok(Json(goal))
}

/// 405 for the item route. Runs only after the access check has passed.
pub async fn sustainability_goal_method_not_allowed(_access: GoalAccess, method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}

pub async fn list_sustainability_goals(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SustainabilityGoal>>, AppError> {
    ensure_permitted(&state, &actor, Resource::SustainabilityGoal, Operation::Read)?;
    let query = ListQuery::from_params(&params, FILTER_COLUMNS)?;

    let goals = state
        .goals
        .find_many(&state.pool, &actor.tenant_id, &query)
        .await?;
    Ok(Json(goals))
}

pub async fn create_sustainability_goal(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<Value>,
) -> Result<Json<SustainabilityGoal>, AppError> {
    ensure_permitted(&state, &actor, Resource::SustainabilityGoal, Operation::Create)?;

    let validated = SUSTAINABILITY_GOAL.validate(&body)?;
    let payload: SustainabilityGoalPayload = from_validated(validated)?;

    ensure_parent_access(&state, &actor, &payload).await?;

    let goal = state.goals.create(&state.pool, &payload).await?;
    tracing::info!(goal_id = %goal.id, user_id = %actor.user_id, "Sustainability goal created");
    Ok(Json(goal))
}

/// A goal may only be attached to an organization the actor can update.
/// Checked on create and on every update, since the parent is part of the body.
async fn ensure_parent_access(
    state: &AppState,
    actor: &Actor,
    payload: &SustainabilityGoalPayload,
) -> Result<(), AppError> {
    let parent_id = payload.business_organization_id.to_string();
    let allowed = state
        .access_policy
        .has_access(
            &state.pool,
            actor,
            Resource::BusinessOrganization,
            &parent_id,
            Operation::Update,
        )
        .await?;
    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Not allowed to attach goals to business_organization {}",
            parent_id
        )))
    }
}
