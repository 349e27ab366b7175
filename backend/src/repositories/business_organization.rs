//! Business organization repository.
//!
//! The create path inserts the organization and all of its nested children in
//! one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::business_organization::{BusinessOrganization, CreateBusinessOrganization};
use crate::models::{
    carbon_footprint::CarbonFootprintInput, employee_feedback::EmployeeFeedbackInput,
    sustainability_goal::SustainabilityGoalInput,
    sustainability_initiative::SustainabilityInitiativeInput,
    waste_management::WasteManagementInput,
};
use crate::repositories::list_query::ListQuery;
use crate::types::BusinessOrganizationId;

const TABLE_NAME: &str = "business_organizations";
const SELECT_COLUMNS: &str =
    "id, name, description, image, user_id, tenant_id, created_at, updated_at";

/// Columns clients may filter on.
pub const FILTER_COLUMNS: &[&str] = &["name", "description", "image", "user_id"];

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessOrganizationRepositoryTrait: Send + Sync {
    /// List organizations of one tenant.
    async fn find_many(
        &self,
        db: &PgPool,
        tenant_id: &str,
        query: &ListQuery,
    ) -> Result<Vec<BusinessOrganization>, AppError>;

    /// Create an organization together with its nested children.
    async fn create(
        &self,
        db: &PgPool,
        tenant_id: &str,
        payload: &CreateBusinessOrganization,
    ) -> Result<BusinessOrganization, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BusinessOrganizationRepository;

impl BusinessOrganizationRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BusinessOrganizationRepositoryTrait for BusinessOrganizationRepository {
    async fn find_many(
        &self,
        db: &PgPool,
        tenant_id: &str,
        query: &ListQuery,
    ) -> Result<Vec<BusinessOrganization>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            SELECT_COLUMNS, TABLE_NAME
        ));
        builder.push(" WHERE tenant_id = ").push_bind(tenant_id.to_string());
        let mut has_clause = true;
        query.push_filters(&mut builder, "", &mut has_clause);
        query.push_order_and_page(&mut builder, "", "created_at DESC");

        let rows = builder
            .build_query_as::<BusinessOrganization>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn create(
        &self,
        db: &PgPool,
        tenant_id: &str,
        payload: &CreateBusinessOrganization,
    ) -> Result<BusinessOrganization, AppError> {
        let now = Utc::now();
        let mut tx = db.begin().await?;

        let query = format!(
            "INSERT INTO {} (id, name, description, image, user_id, tenant_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let organization = sqlx::query_as::<_, BusinessOrganization>(&query)
            .bind(BusinessOrganizationId::new())
            .bind(&payload.name)
            .bind(&payload.description)
            .bind(&payload.image)
            .bind(&payload.user_id)
            .bind(tenant_id)
            .bind(payload.created_at.unwrap_or(now))
            .bind(payload.updated_at.unwrap_or(now))
            .fetch_one(&mut *tx)
            .await?;

        let parent = organization.id;
        if let Some(nested) = &payload.carbon_footprint {
            for item in nested.items() {
                insert_carbon_footprint(&mut tx, parent, item, now).await?;
            }
        }
        if let Some(nested) = &payload.employee_feedback {
            for item in nested.items() {
                insert_employee_feedback(&mut tx, parent, item, now).await?;
            }
        }
        if let Some(nested) = &payload.sustainability_goal {
            for item in nested.items() {
                insert_sustainability_goal(&mut tx, parent, item, now).await?;
            }
        }
        if let Some(nested) = &payload.sustainability_initiative {
            for item in nested.items() {
                insert_sustainability_initiative(&mut tx, parent, item, now).await?;
            }
        }
        if let Some(nested) = &payload.waste_management {
            for item in nested.items() {
                insert_waste_management(&mut tx, parent, item, now).await?;
            }
        }

        tx.commit().await?;
        tracing::debug!(
            organization_id = %organization.id,
            children = payload.child_count(),
            "Created business organization"
        );
        Ok(organization)
    }
}

async fn insert_carbon_footprint(
    tx: &mut Transaction<'_, Postgres>,
    parent: BusinessOrganizationId,
    item: &CarbonFootprintInput,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO carbon_footprints \
         (id, emission_source, emission_value, measurement_date, business_organization_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(&item.emission_source)
    .bind(item.emission_value)
    .bind(item.measurement_date)
    .bind(parent)
    .bind(item.created_at.unwrap_or(now))
    .bind(item.updated_at.unwrap_or(now))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_employee_feedback(
    tx: &mut Transaction<'_, Postgres>,
    parent: BusinessOrganizationId,
    item: &EmployeeFeedbackInput,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO employee_feedback \
         (id, feedback_text, rating, employee_name, business_organization_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(&item.feedback_text)
    .bind(item.rating)
    .bind(&item.employee_name)
    .bind(parent)
    .bind(item.created_at.unwrap_or(now))
    .bind(item.updated_at.unwrap_or(now))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_sustainability_goal(
    tx: &mut Transaction<'_, Postgres>,
    parent: BusinessOrganizationId,
    item: &SustainabilityGoalInput,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sustainability_goals \
         (id, goal_name, target_value, current_value, business_organization_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(&item.goal_name)
    .bind(item.target_value)
    .bind(item.current_value)
    .bind(parent)
    .bind(item.created_at.unwrap_or(now))
    .bind(item.updated_at.unwrap_or(now))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_sustainability_initiative(
    tx: &mut Transaction<'_, Postgres>,
    parent: BusinessOrganizationId,
    item: &SustainabilityInitiativeInput,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sustainability_initiatives \
         (id, initiative_name, description, start_date, end_date, business_organization_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(Uuid::new_v4())
    .bind(&item.initiative_name)
    .bind(&item.description)
    .bind(item.start_date)
    .bind(item.end_date)
    .bind(parent)
    .bind(item.created_at.unwrap_or(now))
    .bind(item.updated_at.unwrap_or(now))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_waste_management(
    tx: &mut Transaction<'_, Postgres>,
    parent: BusinessOrganizationId,
    item: &WasteManagementInput,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO waste_management \
         (id, waste_type, waste_amount, disposal_method, business_organization_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::new_v4())
    .bind(&item.waste_type)
    .bind(item.waste_amount)
    .bind(&item.disposal_method)
    .bind(parent)
    .bind(item.created_at.unwrap_or(now))
    .bind(item.updated_at.unwrap_or(now))
    .execute(&mut **tx)
    .await?;
    Ok(())
}
