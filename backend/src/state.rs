use std::sync::Arc;

use crate::{
    config::Config,
    db::connection::DbPool,
    repositories::{
        BusinessOrganizationRepository, BusinessOrganizationRepositoryTrait,
        SustainabilityGoalRepository, SustainabilityGoalRepositoryTrait,
    },
    services::access_policy::{AccessPolicy, TenantAccessPolicy},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub organizations: Arc<dyn BusinessOrganizationRepositoryTrait>,
    pub goals: Arc<dyn SustainabilityGoalRepositoryTrait>,
    pub access_policy: Arc<dyn AccessPolicy>,
}

impl AppState {
    /// State wired to the PostgreSQL repositories and the tenant policy.
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            pool,
            config,
            organizations: Arc::new(BusinessOrganizationRepository::new()),
            goals: Arc::new(SustainabilityGoalRepository::new()),
            access_policy: Arc::new(TenantAccessPolicy::new()),
        }
    }

    pub fn with_organizations(
        mut self,
        organizations: Arc<dyn BusinessOrganizationRepositoryTrait>,
    ) -> Self {
        self.organizations = organizations;
        self
    }

    pub fn with_goals(mut self, goals: Arc<dyn SustainabilityGoalRepositoryTrait>) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_access_policy(mut self, access_policy: Arc<dyn AccessPolicy>) -> Self {
        self.access_policy = access_policy;
        self
    }
}
