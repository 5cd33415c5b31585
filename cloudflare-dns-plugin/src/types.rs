//! Host-facing request and result types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Error codes ============

/// Error codes surfaced to the host. The host decides retry eligibility from
/// these; the plugin itself never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationErrorCode {
    InvalidRequest,
    InvalidCredentials,
    AccessDenied,
    NotFound,
    Throttling,
    ServiceInternalError,
    InternalFailure,
}

impl OperationErrorCode {
    /// Code for an HTTP status returned by the provider.
    #[must_use]
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 => Self::InvalidCredentials,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            429 => Self::Throttling,
            500..=599 => Self::ServiceInternalError,
            _ => Self::InternalFailure,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "InvalidRequest",
            Self::InvalidCredentials => "InvalidCredentials",
            Self::AccessDenied => "AccessDenied",
            Self::NotFound => "NotFound",
            Self::Throttling => "Throttling",
            Self::ServiceInternalError => "ServiceInternalError",
            Self::InternalFailure => "InternalFailure",
        }
    }
}

impl fmt::Display for OperationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Requests ============

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub target_config: Value,
    pub properties: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadRequest {
    pub target_config: Value,
    pub native_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    pub target_config: Value,
    pub native_id: String,
    pub desired_properties: Value,
    /// Last known state; used to refuse in-place changes of create-only fields.
    #[serde(default)]
    pub prior_properties: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    pub target_config: Value,
    pub native_id: String,
}

/// Progress check for an earlier mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub native_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListRequest {
    pub target_config: Value,
    /// 1-based page index from a previous [`ListResult`].
    #[serde(default)]
    pub page_token: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

// ============ Results ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    Create,
    Update,
    Delete,
    CheckStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationStatus {
    Success,
    Failure,
}

/// Outcome of a mutating operation (and of status checks).
///
/// A failure never carries a `native_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressResult {
    pub operation: Operation,
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_properties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<OperationErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressResult {
    pub fn success(operation: Operation) -> Self {
        Self {
            operation,
            status: OperationStatus::Success,
            native_id: None,
            resource_properties: None,
            error_code: None,
            message: None,
        }
    }

    pub fn failure(
        operation: Operation,
        error_code: OperationErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            status: OperationStatus::Failure,
            native_id: None,
            resource_properties: None,
            error_code: Some(error_code),
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn with_resource(mut self, native_id: impl Into<String>, properties: Value) -> Self {
        self.native_id = Some(native_id.into());
        self.resource_properties = Some(properties);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadResult {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<OperationErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One page of discovered record identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResult {
    pub native_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<OperationErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListResult {
    pub fn failure(error_code: OperationErrorCode, message: impl Into<String>) -> Self {
        Self {
            native_ids: Vec::new(),
            next_page_token: None,
            error_code: Some(error_code),
            message: Some(message.into()),
        }
    }
}
