//! Shapes an organization create body into nested-create instructions.

use serde_json::{json, Map, Value};

/// Child collections that may be created together with an organization.
pub const NESTED_COLLECTIONS: [&str; 5] = [
    "carbon_footprint",
    "employee_feedback",
    "sustainability_goal",
    "sustainability_initiative",
    "waste_management",
];

/// Wraps every non-empty child array as `{ "create": [...] }` and drops the
/// key otherwise, so an absent or empty collection is never forwarded.
pub fn shape_nested_create(mut body: Map<String, Value>) -> Map<String, Value> {
    for field in NESTED_COLLECTIONS {
        match body.remove(field) {
            Some(Value::Array(items)) if !items.is_empty() => {
                body.insert(field.to_string(), json!({ "create": items }));
            }
            _ => {}
        }
    }
    body
}
