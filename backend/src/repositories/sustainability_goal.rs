//! Sustainability goal repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::sustainability_goal::{SustainabilityGoal, SustainabilityGoalPayload};
use crate::repositories::common::push_clause;
use crate::repositories::list_query::ListQuery;
use crate::types::SustainabilityGoalId;

const TABLE_NAME: &str = "sustainability_goals";
const SELECT_COLUMNS: &str =
    "id, goal_name, target_value, current_value, created_at, updated_at, business_organization_id";

pub const FILTER_COLUMNS: &[&str] = &[
    "goal_name",
    "target_value",
    "current_value",
    "business_organization_id",
];

fn qualified_columns(alias: &str) -> String {
    SELECT_COLUMNS
        .split(", ")
        .map(|column| format!("{}.{}", alias, column))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SustainabilityGoalRepositoryTrait: Send + Sync {
    /// List goals whose organization belongs to `tenant_id`.
    async fn find_many(
        &self,
        db: &PgPool,
        tenant_id: &str,
        query: &ListQuery,
    ) -> Result<Vec<SustainabilityGoal>, AppError>;

    /// First goal with `id` that also matches the query filters.
    async fn find_first(
        &self,
        db: &PgPool,
        id: SustainabilityGoalId,
        query: &ListQuery,
    ) -> Result<Option<SustainabilityGoal>, AppError>;

    async fn create(
        &self,
        db: &PgPool,
        payload: &SustainabilityGoalPayload,
    ) -> Result<SustainabilityGoal, AppError>;

    async fn update(
        &self,
        db: &PgPool,
        id: SustainabilityGoalId,
        payload: &SustainabilityGoalPayload,
    ) -> Result<SustainabilityGoal, AppError>;

    /// Hard delete. Returns the removed row.
    async fn delete(
        &self,
        db: &PgPool,
        id: SustainabilityGoalId,
    ) -> Result<SustainabilityGoal, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SustainabilityGoalRepository;

impl SustainabilityGoalRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SustainabilityGoalRepositoryTrait for SustainabilityGoalRepository {
    async fn find_many(
        &self,
        db: &PgPool,
        tenant_id: &str,
        query: &ListQuery,
    ) -> Result<Vec<SustainabilityGoal>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} g JOIN business_organizations o ON o.id = g.business_organization_id",
            qualified_columns("g"),
            TABLE_NAME
        ));
        builder.push(" WHERE o.tenant_id = ").push_bind(tenant_id.to_string());
        let mut has_clause = true;
        query.push_filters(&mut builder, "g.", &mut has_clause);
        query.push_order_and_page(&mut builder, "g.", "created_at DESC");

        let rows = builder
            .build_query_as::<SustainabilityGoal>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    async fn find_first(
        &self,
        db: &PgPool,
        id: SustainabilityGoalId,
        query: &ListQuery,
    ) -> Result<Option<SustainabilityGoal>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {}",
            SELECT_COLUMNS, TABLE_NAME
        ));
        let mut has_clause = false;
        push_clause(&mut builder, &mut has_clause);
        builder.push("id = ").push_bind(id);
        query.push_filters(&mut builder, "", &mut has_clause);
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<SustainabilityGoal>()
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn create(
        &self,
        db: &PgPool,
        payload: &SustainabilityGoalPayload,
    ) -> Result<SustainabilityGoal, AppError> {
        let query = format!(
            "INSERT INTO {} (id, goal_name, target_value, current_value, created_at, updated_at, business_organization_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, SustainabilityGoal>(&query)
            .bind(SustainabilityGoalId::new())
            .bind(&payload.goal_name)
            .bind(payload.target_value)
            .bind(payload.current_value)
            .bind(payload.created_at)
            .bind(payload.updated_at)
            .bind(payload.business_organization_id)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        id: SustainabilityGoalId,
        payload: &SustainabilityGoalPayload,
    ) -> Result<SustainabilityGoal, AppError> {
        let query = format!(
            "UPDATE {} SET goal_name = $2, target_value = $3, current_value = $4, \
             created_at = $5, updated_at = $6, business_organization_id = $7 \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, SustainabilityGoal>(&query)
            .bind(id)
            .bind(&payload.goal_name)
            .bind(payload.target_value)
            .bind(payload.current_value)
            .bind(payload.created_at)
            .bind(payload.updated_at)
            .bind(payload.business_organization_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Sustainability goal not found".into()))?;
        Ok(row)
    }

    async fn delete(
        &self,
        db: &PgPool,
        id: SustainabilityGoalId,
    ) -> Result<SustainabilityGoal, AppError> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, SustainabilityGoal>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Sustainability goal not found".into()))?;
        Ok(row)
    }
}
