//! Request extractors that report failures as [`AppError`].

use axum::extract::FromRequest;
use serde_json::json;

use crate::error::AppError;

/// JSON body extractor whose rejections become `400` validation errors.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Parses a path segment as a positive record id.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if `raw` is not an integer greater than zero.
pub fn parse_id(raw: &str, field: &'static str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(
            format!("{field} must be a positive integer"),
            json!({ field: raw }),
        )),
    }
}
