use axum::http::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    models::actor::Actor,
    services::access_policy::{Operation, Resource},
    state::AppState,
};

/// Fallback for any method a resource route does not serve.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}

pub fn ensure_permitted(
    state: &AppState,
    actor: &Actor,
    resource: Resource,
    operation: Operation,
) -> Result<(), AppError> {
    if state.access_policy.can_perform(actor, resource, operation) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Not allowed to {} {}",
            operation.as_str(),
            resource.as_str()
        )))
    }
}

/// Turns a validated body into its typed payload. Failures here are values
/// the schema accepted but the column type cannot hold.
pub fn from_validated<T: DeserializeOwned>(body: Map<String, Value>) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(body))
        .map_err(|err| AppError::BadRequest(format!("Invalid payload: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn method_not_allowed_keeps_the_method() {
        let error = method_not_allowed(Method::PATCH).await;
        assert!(matches!(error, AppError::MethodNotAllowed(ref m) if m == Method::PATCH));
    }

    #[test]
    fn from_validated_maps_type_errors_to_bad_request() {
        #[derive(Debug, serde::Deserialize)]
        struct Small {
            #[allow(dead_code)]
            value: i32,
        }
        let mut body = Map::new();
        body.insert("value".into(), json!(i64::MAX));
        let result = from_validated::<Small>(body);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
