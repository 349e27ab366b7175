//! Data models shared across database access and API handlers.

pub mod actor;
pub mod business_organization;
pub mod carbon_footprint;
pub mod employee_feedback;
pub mod sustainability_goal;
pub mod sustainability_initiative;
pub mod waste_management;
