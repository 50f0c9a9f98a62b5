use anyhow::anyhow;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use scpl_core::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationErrors};

pub const INVALID_INPUT: &str = "Invalid input";
pub const INVALID_QUERY: &str = "Invalid query";

/// Renders validation failures as `{field: [messages]}`.
pub fn field_errors(errors: &ValidationErrors) -> Value {
    let fields: Map<String, Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    Value::Object(fields)
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        let mut fields = Map::new();
        fields.insert(field.to_string(), json!([format!("{field} is required")]));
        return AppError::validation(INVALID_INPUT, Value::Object(fields));
    }

    tracing::debug!(reason = %error_msg, "Rejected request body");
    AppError::bad_request(anyhow!(INVALID_INPUT))
}

/// JSON body extractor that runs `validator` rules. Any failure is a 400
/// `Invalid input` with per-field `errors`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(INVALID_INPUT, field_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// Query string extractor that runs `validator` rules. Failures are a 400
/// `Invalid query`.
#[derive(Debug, Clone, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                tracing::debug!(error = %rejection.body_text(), "Query rejected");
                AppError::bad_request(anyhow!(INVALID_QUERY))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::validation(INVALID_QUERY, field_errors(&errors)))?;

        Ok(ValidatedQuery(value))
    }
}
