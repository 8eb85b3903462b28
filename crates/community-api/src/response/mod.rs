//! Response envelope and error handling for API endpoints
//!
//! Success: `{"status": true, "content": {"data": ..., "meta"?: ...}}`
//! Failure: `{"status": false, "errors": [{"param"?, "message", "code"}]}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use community_common::AppError;
use community_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    App(#[from] AppError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Resource not found.")]
    RouteNotFound,
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let raw = match self {
            Self::Service(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) => 400,
            Self::RouteNotFound => 404,
        };
        StatusCode::from_u16(raw).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidPath(_) | Self::InvalidQuery(_) => {
                "INVALID_INPUT"
            }
            Self::RouteNotFound => "RESOURCE_NOT_FOUND",
        }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// One entry per offending field for validation failures, a single
    /// entry otherwise
    fn details(&self) -> Vec<ErrorDetail> {
        let code = self.error_code();
        match self {
            Self::Validation(errors) => {
                let mut details: Vec<ErrorDetail> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| ErrorDetail {
                            param: Some(field.to_string()),
                            message: e
                                .message
                                .as_ref()
                                .map_or_else(|| e.code.to_string(), ToString::to_string),
                            code,
                        })
                    })
                    .collect();
                details.sort_by(|a, b| a.param.cmp(&b.param));
                details
            }
            Self::Service(e) => vec![ErrorDetail {
                param: e.param().map(str::to_string),
                message: public_message(self, e.status_code()),
                code,
            }],
            Self::App(AppError::Domain(e)) => vec![ErrorDetail {
                param: e.param().map(str::to_string),
                message: public_message(self, self.status_code().as_u16()),
                code,
            }],
            _ => vec![ErrorDetail {
                param: None,
                message: public_message(self, self.status_code().as_u16()),
                code,
            }],
        }
    }
}

/// Server-side failures never leak their internals
fn public_message(err: &ApiError, status: u16) -> String {
    if status >= 500 {
        "Something went wrong.".to_string()
    } else {
        err.to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub message: String,
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: bool,
    pub errors: Vec<ErrorDetail>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let body = ErrorBody {
            status: false,
            errors: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct Content<T, M> {
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<M>,
}

#[derive(Debug, Serialize)]
struct Envelope<T, M> {
    status: bool,
    content: Content<T, M>,
}

/// Successful JSON response wrapped in the envelope
#[derive(Debug)]
pub struct ApiJson<T, M = ()> {
    data: T,
    meta: Option<M>,
}

impl<T> ApiJson<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }
}

impl<T, M> ApiJson<T, M> {
    pub fn with_meta(data: T, meta: M) -> Self {
        Self {
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize, M: Serialize> IntoResponse for ApiJson<T, M> {
    fn into_response(self) -> Response {
        Json(Envelope {
            status: true,
            content: Content {
                data: self.data,
                meta: self.meta,
            },
        })
        .into_response()
    }
}
