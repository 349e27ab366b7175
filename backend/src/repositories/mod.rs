pub mod business_organization;
pub mod common;
pub mod list_query;
pub mod sustainability_goal;

pub use business_organization::{BusinessOrganizationRepository, BusinessOrganizationRepositoryTrait};
pub use common::*;
pub use list_query::{ListQuery, ListQueryError, SortDirection};
pub use sustainability_goal::{SustainabilityGoalRepository, SustainabilityGoalRepositoryTrait};
