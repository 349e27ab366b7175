pub mod access_policy;
pub mod nested_create;
