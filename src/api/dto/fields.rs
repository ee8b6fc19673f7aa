//! Presence checks shared by the create and patch request bodies.
//!
//! Create bodies deserialize every field as `Option<T>` so that all missing
//! fields are reported together. Patch bodies use `Option<Option<T>>`
//! (`serde_with::rust::double_option`): an absent key keeps the stored value,
//! an explicit `null` is rejected.

use serde_json::json;

use crate::error::AppError;

/// Collects fields absent from a create body.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    /// Returns the value, or records `field` as missing and returns a placeholder.
    pub fn take<T: Default>(&mut self, value: Option<T>, field: &'static str) -> T {
        match value {
            Some(v) => v,
            None => {
                self.missing.push(field);
                T::default()
            }
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(AppError::bad_request(
            "Required fields are missing",
            json!({ "missing": self.missing }),
        ))
    }
}

/// Collects fields sent as `null` in a patch body.
#[derive(Debug, Default)]
pub struct PatchFields {
    nulls: Vec<&'static str>,
}

impl PatchFields {
    /// Flattens a double option, recording `field` when it was an explicit `null`.
    pub fn take<T>(&mut self, value: Option<Option<T>>, field: &'static str) -> Option<T> {
        match value {
            Some(Some(v)) => Some(v),
            Some(None) => {
                self.nulls.push(field);
                None
            }
            None => None,
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.nulls.is_empty() {
            return Ok(());
        }
        Err(AppError::bad_request(
            "field cannot be null",
            json!({ "fields": self.nulls }),
        ))
    }
}

/// Strips surrounding whitespace, reusing the allocation when there is none.
pub fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}
