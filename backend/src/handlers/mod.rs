pub mod business_organizations;
pub mod common;
pub mod health;
pub mod sustainability_goals;

#[cfg(test)]
pub(crate) mod test_support;
