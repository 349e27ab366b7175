//! Rule tables for every resource accepted by the API.

use std::borrow::Cow;

use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use super::schema::{FieldKind, FieldRule, Schema};

pub const SUSTAINABILITY_GOAL: Schema = Schema::new(
    "sustainability_goal",
    &[
        FieldRule::required("goal_name", FieldKind::String),
        FieldRule::required("target_value", FieldKind::Integer),
        FieldRule::required("current_value", FieldKind::Integer),
        FieldRule::required("created_at", FieldKind::DateTime),
        FieldRule::required("updated_at", FieldKind::DateTime),
        FieldRule::required("business_organization_id", FieldKind::String).nullable(),
    ],
);

pub const BUSINESS_ORGANIZATION: Schema = Schema::new(
    "business_organization",
    &[
        FieldRule::required("name", FieldKind::String),
        FieldRule::optional("description", FieldKind::String).nullable(),
        FieldRule::optional("image", FieldKind::String).nullable(),
        FieldRule::optional("user_id", FieldKind::String).nullable(),
        FieldRule::optional("tenant_id", FieldKind::String),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("updated_at", FieldKind::DateTime),
        FieldRule::optional("carbon_footprint", FieldKind::Array),
        FieldRule::optional("employee_feedback", FieldKind::Array),
        FieldRule::optional("sustainability_goal", FieldKind::Array),
        FieldRule::optional("sustainability_initiative", FieldKind::Array),
        FieldRule::optional("waste_management", FieldKind::Array),
    ],
);

pub const NESTED_CARBON_FOOTPRINT: Schema = Schema::new(
    "carbon_footprint",
    &[
        FieldRule::required("emission_source", FieldKind::String),
        FieldRule::required("emission_value", FieldKind::Integer),
        FieldRule::required("measurement_date", FieldKind::DateTime),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("updated_at", FieldKind::DateTime),
    ],
);

pub const NESTED_EMPLOYEE_FEEDBACK: Schema = Schema::new(
    "employee_feedback",
    &[
        FieldRule::required("feedback_text", FieldKind::String),
        FieldRule::required("rating", FieldKind::Integer),
        FieldRule::optional("employee_name", FieldKind::String).nullable(),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("updated_at", FieldKind::DateTime),
    ],
);

pub const NESTED_SUSTAINABILITY_GOAL: Schema = Schema::new(
    "sustainability_goal",
    &[
        FieldRule::required("goal_name", FieldKind::String),
        FieldRule::required("target_value", FieldKind::Integer),
        FieldRule::required("current_value", FieldKind::Integer),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("updated_at", FieldKind::DateTime),
    ],
);

pub const NESTED_SUSTAINABILITY_INITIATIVE: Schema = Schema::new(
    "sustainability_initiative",
    &[
        FieldRule::required("initiative_name", FieldKind::String),
        FieldRule::optional("description", FieldKind::String).nullable(),
        FieldRule::required("start_date", FieldKind::DateTime),
        FieldRule::optional("end_date", FieldKind::DateTime).nullable(),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("updated_at", FieldKind::DateTime),
    ],
);

pub const NESTED_WASTE_MANAGEMENT: Schema = Schema::new(
    "waste_management",
    &[
        FieldRule::required("waste_type", FieldKind::String),
        FieldRule::required("waste_amount", FieldKind::Integer),
        FieldRule::required("disposal_method", FieldKind::String),
        FieldRule::optional("created_at", FieldKind::DateTime),
        FieldRule::optional("updated_at", FieldKind::DateTime),
    ],
);

/// Child collections of an organization with the schema each item must match.
pub const ORGANIZATION_CHILDREN: [(&str, Schema); 5] = [
    ("carbon_footprint", NESTED_CARBON_FOOTPRINT),
    ("employee_feedback", NESTED_EMPLOYEE_FEEDBACK),
    ("sustainability_goal", NESTED_SUSTAINABILITY_GOAL),
    ("sustainability_initiative", NESTED_SUSTAINABILITY_INITIATIVE),
    ("waste_management", NESTED_WASTE_MANAGEMENT),
];

/// Validates an organization body, including every item of its child
/// collections. Item failures are reported under the collection name.
pub fn validate_business_organization(body: &Value) -> Result<Map<String, Value>, ValidationErrors> {
    let mut output = BUSINESS_ORGANIZATION.validate(body)?;
    let mut errors = ValidationErrors::new();

    for (field, schema) in ORGANIZATION_CHILDREN {
        let Some(Value::Array(items)) = output.get_mut(field) else {
            continue;
        };
        for (index, item) in items.iter_mut().enumerate() {
            match schema.validate(item) {
                Ok(cast) => *item = Value::Object(cast),
                Err(item_errors) => {
                    for (item_field, field_errors) in item_errors.field_errors() {
                        for error in field_errors {
                            let mut nested = ValidationError::new("invalid_item");
                            nested.message = Some(Cow::Owned(format!(
                                "[{}].{}: {}",
                                index, item_field, error.code
                            )));
                            errors.add(field, nested);
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}
