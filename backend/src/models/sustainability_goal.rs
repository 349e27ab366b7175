use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{BusinessOrganizationId, SustainabilityGoalId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SustainabilityGoal {
    pub id: SustainabilityGoalId,
    pub goal_name: String,
    pub target_value: i32,
    pub current_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub business_organization_id: BusinessOrganizationId,
}

/// Full write payload for a goal. Used by both create and update, so every
/// column is always supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SustainabilityGoalPayload {
    pub goal_name: String,
    pub target_value: i32,
    pub current_value: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub business_organization_id: BusinessOrganizationId,
}

/// A goal created inside an organization's nested create. The parent id is
/// implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SustainabilityGoalInput {
    pub goal_name: String,
    pub target_value: i32,
    pub current_value: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
