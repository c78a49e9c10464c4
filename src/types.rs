//! Shared types for the content backend
//!
//! Error taxonomy, record identifiers and the wall clock used for timestamps.

use bson::oid::ObjectId;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias used throughout the crate
pub type Result<T, E = CmsError> = std::result::Result<T, E>;

/// Errors surfaced by the store, service and HTTP layers
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// Storage backend failure (connection, command, decode)
    #[error("database error: {0}")]
    Database(String),

    /// A unique index rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    /// A mutation targeted a record that does not exist, or an unknown route
    #[error("not found: {0}")]
    NotFound(String),

    /// Argument record did not match the function's shape
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Form submission attempted while the form is loading or submitting
    #[error("form busy: {0}")]
    FormBusy(&'static str),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CmsError {
    /// HTTP status used when this error reaches a client
    pub fn status_code(&self) -> StatusCode {
        match self {
            CmsError::Conflict(_) | CmsError::FormBusy(_) => StatusCode::CONFLICT,
            CmsError::NotFound(_) => StatusCode::NOT_FOUND,
            CmsError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CmsError::Database(_)
            | CmsError::Serialization(_)
            | CmsError::Io(_)
            | CmsError::Config(_)
            | CmsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code for JSON error bodies
    pub fn code(&self) -> &'static str {
        match self {
            CmsError::Database(_) => "DATABASE_ERROR",
            CmsError::Conflict(_) => "CONFLICT",
            CmsError::NotFound(_) => "NOT_FOUND",
            CmsError::BadRequest(_) => "BAD_REQUEST",
            CmsError::FormBusy(_) => "FORM_BUSY",
            CmsError::Serialization(_) => "SERIALIZATION_ERROR",
            CmsError::Io(_) => "IO_ERROR",
            CmsError::Config(_) => "CONFIG_ERROR",
            CmsError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<bson::ser::Error> for CmsError {
    fn from(e: bson::ser::Error) -> Self {
        CmsError::Serialization(e.to_string())
    }
}

impl From<bson::de::Error> for CmsError {
    fn from(e: bson::de::Error) -> Self {
        CmsError::Database(format!("failed to decode document: {}", e))
    }
}

impl From<serde_json::Error> for CmsError {
    fn from(e: serde_json::Error) -> Self {
        CmsError::Serialization(e.to_string())
    }
}

/// Storage-assigned primary key of a record
///
/// Stored as the hex form of a freshly generated ObjectId, so identifiers
/// sort in creation order in both backends.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Generate a new identifier
    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_sort_in_creation_order() {
        let first = DocId::generate();
        let second = DocId::generate();
        assert!(first < second);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CmsError::Conflict("slug".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(CmsError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(CmsError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CmsError::Database("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_doc_id_serializes_as_plain_string() {
        let id = DocId::from("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
