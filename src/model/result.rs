//! Top-level conversion result.

use super::Document;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Terminal state of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// A single error entry in the `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error_message: String,
}

/// The value printed on standard output.
///
/// `document` is present iff `status` is [`Status::Success`]; `errors` is
/// empty on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub document: Option<Document>,

    #[serde(default)]
    pub errors: Vec<ErrorRecord>,
}

impl ConversionResult {
    /// A successful result carrying `document`.
    pub fn success(document: Document) -> Self {
        Self {
            status: Status::Success,
            document: Some(document),
            errors: Vec::new(),
        }
    }

    /// A failed result with a single error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            document: None,
            errors: vec![ErrorRecord {
                error_message: message.into(),
            }],
        }
    }

    /// A failed result describing `err`.
    pub fn from_error(err: &Error) -> Self {
        Self::failure(err.to_string())
    }

    /// Whether the conversion succeeded.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Process exit code for this result.
    pub fn exit_code(&self) -> u8 {
        match self.status {
            Status::Success => 0,
            Status::Error => 1,
        }
    }
}
