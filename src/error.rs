//! Application error taxonomy and its HTTP representation.
//!
//! Every fallible operation in the service layer returns [`AppError`]. The variant
//! decides the status code; the body always carries a human-readable `message`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::entities::{DeliveryStatus, UnknownStatus};
use crate::utils::db_error::{is_foreign_key_violation, is_unique_violation};

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed, missing or out-of-range input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Referenced entity is absent (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Duplicate unique key (409).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Deletion blocked by dependent records (400).
    #[error("{message}")]
    Integrity {
        message: String,
        dependents: Option<i64>,
    },

    /// Unexpected store failure (500). `cause` is the raw underlying message.
    #[error("{message}")]
    Internal {
        message: String,
        cause: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn integrity(message: impl Into<String>, dependents: Option<i64>) -> Self {
        Self::Integrity {
            message: message.into(),
            dependents,
        }
    }

    pub fn internal(message: impl Into<String>, cause: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            cause,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::Integrity { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code included in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Integrity { .. } => "integrity_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into the serialisable response body.
    pub fn to_body(&self) -> ErrorBody {
        let code = self.code();
        match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => ErrorBody {
                message: message.clone(),
                code,
                error_message: None,
                details: details.clone(),
            },
            AppError::Integrity {
                message,
                dependents,
            } => ErrorBody {
                message: message.clone(),
                code,
                error_message: None,
                details: match dependents {
                    Some(count) => json!({ "dependents": count }),
                    None => Value::Null,
                },
            },
            AppError::Internal { message, cause } => ErrorBody {
                message: message.clone(),
                code,
                error_message: cause.clone(),
                details: Value::Null,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, cause } = &self {
            tracing::error!(cause = ?cause, "{message}");
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint().map(str::to_owned));
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            );
        }

        if is_foreign_key_violation(&e) {
            return AppError::not_found("Referenced record does not exist", Value::Null);
        }

        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::not_found("Record not found", Value::Null);
        }

        AppError::internal("Database error", Some(e.to_string()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::bad_request("The submitted data is invalid", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<UnknownStatus> for AppError {
    fn from(e: UnknownStatus) -> Self {
        let allowed: Vec<&str> = DeliveryStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::bad_request(
            "Invalid delivery status",
            json!({ "status": e.0, "allowed": allowed }),
        )
    }
}
