//! Application error taxonomy and its HTTP mapping.
//!
//! Every failure the engine reports reduces to one [`ErrorKind`]. Storage and
//! lookup errors keep their operation name and object id in `details` for the
//! logs; [`AppError::Internal`] never leaks those details to clients.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Client-facing error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Classification of an [`AppError`], independent of its message and details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidContent,
    Unauthenticated,
    PermissionDenied,
    NotFound,
    AdNotExists,
    AlreadyExists,
    AlreadyAdded,
    NoAds,
    Internal,
}

impl ErrorKind {
    /// External status for this kind. Total over all kinds.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidContent => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::NotFound | ErrorKind::AdNotExists => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists | ErrorKind::AlreadyAdded => StatusCode::CONFLICT,
            ErrorKind::NoAds => StatusCode::NO_CONTENT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code used in response bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidContent => "invalid_content",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AdNotExists => "ad_not_exists",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::AlreadyAdded => "already_added",
            ErrorKind::NoAds => "no_ads",
            ErrorKind::Internal => "internal_error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidContent { message: String, details: Value },
    #[error("{message}")]
    Unauthenticated { message: String, details: Value },
    #[error("{message}")]
    PermissionDenied { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    AdNotExists { message: String, details: Value },
    #[error("{message}")]
    AlreadyExists { message: String, details: Value },
    #[error("{message}")]
    AlreadyAdded { message: String, details: Value },
    /// A resolved link currently has no published ads. Benign.
    #[error("{message}")]
    NoAds { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_content(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidContent {
            message: message.into(),
            details,
        }
    }
    pub fn unauthenticated(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthenticated {
            message: message.into(),
            details,
        }
    }
    pub fn permission_denied(message: impl Into<String>, details: Value) -> Self {
        Self::PermissionDenied {
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
    pub fn ad_not_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AdNotExists {
            message: message.into(),
            details,
        }
    }
    pub fn already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            details,
        }
    }
    pub fn already_added(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyAdded {
            message: message.into(),
            details,
        }
    }
    pub fn no_ads(message: impl Into<String>, details: Value) -> Self {
        Self::NoAds {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidContent { .. } => ErrorKind::InvalidContent,
            AppError::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            AppError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::AdNotExists { .. } => ErrorKind::AdNotExists,
            AppError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            AppError::AlreadyAdded { .. } => ErrorKind::AlreadyAdded,
            AppError::NoAds { .. } => ErrorKind::NoAds,
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for `self.kind() == kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::InvalidContent { details, .. }
            | AppError::Unauthenticated { details, .. }
            | AppError::PermissionDenied { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::AdNotExists { details, .. }
            | AppError::AlreadyExists { details, .. }
            | AppError::AlreadyAdded { details, .. }
            | AppError::NoAds { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Converts into the payload sent to clients.
    ///
    /// Internal errors are reduced to a generic message with empty details.
    pub fn to_error_info(&self) -> ErrorInfo {
        let kind = self.kind();
        if kind == ErrorKind::Internal {
            return ErrorInfo {
                code: kind.code(),
                message: "Internal server error".to_string(),
                details: json!({}),
            };
        }

        ErrorInfo {
            code: kind.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::invalid_content(
            "Invalid content",
            json!({ "fields": fields, "reason": errors.to_string() }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        let reason = match rejection {
            JsonRejection::JsonSyntaxError(_) => "Body is not valid JSON",
            JsonRejection::JsonDataError(_) => "Body does not match the expected shape",
            JsonRejection::MissingJsonContentType(_) => "Expected Content-Type: application/json",
            _ => "Failed to read request body",
        };
        AppError::invalid_content("Invalid request body", json!({ "reason": reason }))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameters");
        AppError::invalid_content(
            "Invalid path parameter",
            json!({ "reason": "Path parameter has an invalid format" }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        if kind == ErrorKind::Internal {
            tracing::error!(error = %self, details = %self.details(), "Request failed");
        }

        if kind == ErrorKind::NoAds {
            return kind.status().into_response();
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (kind.status(), Json(body)).into_response()
    }
}
