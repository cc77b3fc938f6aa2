//! Exception kinds and the wire-level error body.
//!
//! Every failed backend call answers with:
//!
//! ```json
//! { "exceptions": [ { "kind": "not-found", "message": "..." } ] }
//! ```
//!
//! A validation failure additionally names the offending fields.

use serde::{Deserialize, Serialize};

/// Error kinds surfaced by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExceptionKind {
    /// Caller supplied the wrong type (e.g. a non-numeric record id).
    BadArgument,
    /// A domain rule was violated; `fields` lists the offenders.
    ValidationError,
    /// A referenced record id is absent.
    NotFound,
    /// A field name is not present on the entity.
    UnknownField,
    /// The underlying store write failed.
    PersistenceFailure,
    /// The invoice artifact could not be produced.
    RendererFailure,
    /// The invoice mail could not be sent (non-fatal; reported only).
    MailerFailure,
    /// Anything else.
    Internal,
}

/// One exception entry on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiException {
    pub kind: ExceptionKind,
    pub message: String,
    /// Offending field names, present for validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// The JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionsBody {
    pub exceptions: Vec<ApiException>,
}

impl ExceptionsBody {
    pub fn single(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            exceptions: vec![ApiException {
                kind,
                message: message.into(),
                fields: Vec::new(),
            }],
        }
    }

    pub fn validation(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            exceptions: vec![ApiException {
                kind: ExceptionKind::ValidationError,
                message: message.into(),
                fields,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_serialize_kebab_case() {
        let body = ExceptionsBody::single(ExceptionKind::BadArgument, "bad id");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["exceptions"][0]["kind"], "bad-argument");
        assert!(json["exceptions"][0].get("fields").is_none());
    }

    #[test]
    fn validation_carries_fields() {
        let body = ExceptionsBody::validation("required", vec!["first_name".into()]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["exceptions"][0]["kind"], "validation-error");
        assert_eq!(json["exceptions"][0]["fields"][0], "first_name");
    }
}
