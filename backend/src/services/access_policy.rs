//! Role- and tenant-scoped authorization.
//!
//! Handlers never decide access themselves; they ask an [`AccessPolicy`]
//! before touching a record.

use async_trait::async_trait;
use axum::http::Method;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppError, models::actor::Actor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl From<&Method> for Operation {
    fn from(method: &Method) -> Self {
        match *method {
            Method::POST => Operation::Create,
            Method::PUT | Method::PATCH => Operation::Update,
            Method::DELETE => Operation::Delete,
            _ => Operation::Read,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    BusinessOrganization,
    SustainabilityGoal,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::BusinessOrganization => "business_organization",
            Resource::SustainabilityGoal => "sustainability_goal",
        }
    }
}

/// Operations each known role may perform. Unknown roles grant nothing.
pub fn role_allows(role: &str, operation: Operation) -> bool {
    match role.to_ascii_lowercase().as_str() {
        "owner" | "admin" => true,
        "team-member" => !matches!(operation, Operation::Delete),
        "viewer" => matches!(operation, Operation::Read),
        _ => false,
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// Whether the actor's roles permit `operation` on `resource` at all.
    fn can_perform(&self, actor: &Actor, resource: Resource, operation: Operation) -> bool;

    /// Whether the actor may perform `operation` on the record `id`.
    async fn has_access(
        &self,
        db: &PgPool,
        actor: &Actor,
        resource: Resource,
        id: &str,
        operation: Operation,
    ) -> Result<bool, AppError>;
}

/// Grants access when a role allows the operation and the record belongs to
/// the actor's tenant. Goals inherit the tenant of their organization.
#[derive(Debug, Default, Clone, Copy)]
pub struct TenantAccessPolicy;

impl TenantAccessPolicy {
    pub fn new() -> Self {
        Self
    }

    async fn record_tenant(
        &self,
        db: &PgPool,
        resource: Resource,
        id: Uuid,
    ) -> Result<Option<String>, AppError> {
        let query = match resource {
            Resource::BusinessOrganization => {
                "SELECT tenant_id FROM business_organizations WHERE id = $1"
            }
            Resource::SustainabilityGoal => {
                "SELECT o.tenant_id FROM sustainability_goals g \
                 JOIN business_organizations o ON o.id = g.business_organization_id \
                 WHERE g.id = $1"
            }
        };
        let tenant = sqlx::query_scalar::<_, String>(query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(tenant)
    }
}

#[async_trait]
impl AccessPolicy for TenantAccessPolicy {
    fn can_perform(&self, actor: &Actor, _resource: Resource, operation: Operation) -> bool {
        actor.roles.iter().any(|role| role_allows(role, operation))
    }

    async fn has_access(
        &self,
        db: &PgPool,
        actor: &Actor,
        resource: Resource,
        id: &str,
        operation: Operation,
    ) -> Result<bool, AppError> {
        if !self.can_perform(actor, resource, operation) {
            tracing::debug!(
                user_id = %actor.user_id,
                resource = resource.as_str(),
                operation = operation.as_str(),
                "Role set does not permit operation"
            );
            return Ok(false);
        }

        let Ok(record_id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let allowed = self
            .record_tenant(db, resource, record_id)
            .await?
            .is_some_and(|tenant| tenant == actor.tenant_id);
        if !allowed {
            tracing::debug!(
                user_id = %actor.user_id,
                tenant_id = %actor.tenant_id,
                resource = resource.as_str(),
                id,
                "Record is outside the actor's tenant or does not exist"
            );
        }
        Ok(allowed)
    }
}
