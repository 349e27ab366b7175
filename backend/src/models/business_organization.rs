//! Business organizations and the payload of their nested create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{
    carbon_footprint::CarbonFootprintInput, employee_feedback::EmployeeFeedbackInput,
    sustainability_goal::SustainabilityGoalInput,
    sustainability_initiative::SustainabilityInitiativeInput,
    waste_management::WasteManagementInput,
};
use crate::types::BusinessOrganizationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BusinessOrganization {
    pub id: BusinessOrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Owning user, if any.
    pub user_id: Option<String>,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A "create these child records" instruction attached to a parent create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedCreate<T> {
    pub create: Vec<T>,
}

impl<T> NestedCreate<T> {
    pub fn items(&self) -> &[T] {
        &self.create
    }
}

/// Organization create payload after nested-collection shaping. A child
/// collection is either absent or carries at least one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBusinessOrganization {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_footprint: Option<NestedCreate<CarbonFootprintInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_feedback: Option<NestedCreate<EmployeeFeedbackInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_goal: Option<NestedCreate<SustainabilityGoalInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_initiative: Option<NestedCreate<SustainabilityInitiativeInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_management: Option<NestedCreate<WasteManagementInput>>,
}

impl CreateBusinessOrganization {
    /// Total number of child records the create will insert.
    pub fn child_count(&self) -> usize {
        self.carbon_footprint.as_ref().map_or(0, |c| c.items().len())
            + self.employee_feedback.as_ref().map_or(0, |c| c.items().len())
            + self.sustainability_goal.as_ref().map_or(0, |c| c.items().len())
            + self
                .sustainability_initiative
                .as_ref()
                .map_or(0, |c| c.items().len())
            + self.waste_management.as_ref().map_or(0, |c| c.items().len())
    }
}
