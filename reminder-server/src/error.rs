use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::routes::AVAILABLE_ENDPOINTS;

pub const EXAMPLE_USAGE: &str = "/api/reminder?temperature=25&humidity=60&windSpeed=10";

/// Where a request parameter was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Query,
    Body,
}

/// Every failure a handler can return; mapped to a status and JSON body in
/// [`IntoResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", missing_message(field, *origin))]
    MissingRequiredField {
        field: &'static str,
        origin: ParamSource,
    },

    #[error("Invalid {field} value")]
    InvalidNumericValue { field: &'static str },

    #[error("Endpoint not found")]
    NotFound,

    #[error("Something went wrong!")]
    Internal(String),
}

fn missing_message(field: &str, origin: ParamSource) -> String {
    let mut chars = field.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    match origin {
        ParamSource::Query => format!("{name} parameter is required"),
        ParamSource::Body => format!("{name} is required in request body"),
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingRequiredField { .. } | ApiError::InvalidNumericValue { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        let body = match self {
            ApiError::MissingRequiredField {
                origin: ParamSource::Query,
                ..
            } => json!({ "error": error, "example": EXAMPLE_USAGE }),
            ApiError::MissingRequiredField { .. } | ApiError::InvalidNumericValue { .. } => {
                json!({ "error": error })
            }
            ApiError::NotFound => json!({
                "error": error,
                "availableEndpoints": AVAILABLE_ENDPOINTS,
            }),
            ApiError::Internal(message) => {
                tracing::error!(%message, "request failed");
                json!({ "error": error, "message": message })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Turns a handler panic into a 500 response.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    ApiError::Internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_messages_depend_on_source() {
        let query = ApiError::MissingRequiredField {
            field: "temperature",
            origin: ParamSource::Query,
        };
        let body = ApiError::MissingRequiredField {
            field: "temperature",
            origin: ParamSource::Body,
        };

        assert_eq!(query.to_string(), "Temperature parameter is required");
        assert_eq!(body.to_string(), "Temperature is required in request body");
    }

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError::InvalidNumericValue { field: "temperature" }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_value_message_names_field() {
        let err = ApiError::InvalidNumericValue { field: "temperature" };
        assert_eq!(err.to_string(), "Invalid temperature value");
    }

    #[test]
    fn panic_payloads_become_internal_errors() {
        let response = handle_panic(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("kaboom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
