use std::borrow::Cow;

use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use super::rules::{
    cast_array, cast_datetime, cast_integer, cast_string, CODE_NOT_NULLABLE, CODE_REQUIRED,
};

/// Field name used when the body itself is not a JSON object.
pub const BODY_FIELD: &str = "body";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    DateTime,
    Array,
}

impl FieldKind {
    fn cast(self, value: &Value) -> Result<Value, ValidationError> {
        match self {
            FieldKind::String => cast_string(value),
            FieldKind::Integer => cast_integer(value),
            FieldKind::DateTime => cast_datetime(value),
            FieldKind::Array => cast_array(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
        }
    }

    /// Accepts `null` as a value. A required field still rejects it.
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// A named rule table evaluated by [`Schema::validate`].
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
}

impl Schema {
    pub const fn new(name: &'static str, rules: &'static [FieldRule]) -> Self {
        Self { name, rules }
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.name == field)
    }

    /// Checks `body` against every rule and returns the cast object.
    ///
    /// Fields without a rule pass through untouched. All failing fields are
    /// reported together.
    pub fn validate(&self, body: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(object) = body.as_object() else {
            let mut error = ValidationError::new("expected_object");
            error.message = Some(Cow::Owned(format!("{} payload must be an object", self.name)));
            errors.add(BODY_FIELD, error);
            return Err(errors);
        };

        let mut output = object.clone();
        for rule in self.rules {
            match object.get(rule.name) {
                None => {
                    if rule.required {
                        errors.add(rule.name, ValidationError::new(CODE_REQUIRED));
                    }
                }
                Some(Value::Null) => {
                    if rule.required {
                        errors.add(rule.name, ValidationError::new(CODE_REQUIRED));
                    } else if !rule.nullable {
                        errors.add(rule.name, ValidationError::new(CODE_NOT_NULLABLE));
                    }
                }
                Some(value) => match rule.kind.cast(value) {
                    Ok(Value::String(s)) if rule.required && s.is_empty() => {
                        errors.add(rule.name, ValidationError::new(CODE_REQUIRED));
                    }
                    Ok(cast) => {
                        output.insert(rule.name.to_string(), cast);
                    }
                    Err(error) => errors.add(rule.name, error),
                },
            }
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(errors)
        }
    }
}
