use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type/code
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Whether retrying the same request may succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Main API error enum
///
/// Mirrors the subsystem error taxonomy: retention expiry is deliberately
/// absent — an expired transcript is a data-absence signal in a successful
/// response, never an error.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource_type}")]
    NotFound { resource_type: String },

    #[error("Invalid reference: {message}")]
    InvalidReference { message: String },

    #[error("Resource conflict: {message}")]
    Conflict { message: String },

    #[error("Chart generation failed: {message}")]
    ExternalGeneration { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// Create an invalid reference error (entity not visible to the hospital)
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ExternalGeneration { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::InvalidReference { .. } => "invalid_reference",
            ApiError::Conflict { .. } => "conflict",
            ApiError::ExternalGeneration { .. } => "external_generation_failure",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    fn retryable(&self) -> Option<bool> {
        match self {
            ApiError::ExternalGeneration { .. } => Some(true),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            status_code = %status_code.as_u16(),
            error = %self,
            "API error occurred"
        );

        let error_response = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now(),
            retryable: self.retryable(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<template_catalog::CatalogError> for ApiError {
    fn from(error: template_catalog::CatalogError) -> Self {
        match error {
            template_catalog::CatalogError::NotFound(_) => ApiError::not_found("template"),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl From<retention_engine::RetentionError> for ApiError {
    fn from(error: retention_engine::RetentionError) -> Self {
        match error {
            retention_engine::RetentionError::WindowTooLarge(_) => {
                ApiError::validation(error.to_string())
            }
            retention_engine::RetentionError::Scrub(message) => ApiError::internal(message),
        }
    }
}

impl From<chart_generation_service::GenerationError> for ApiError {
    fn from(error: chart_generation_service::GenerationError) -> Self {
        ApiError::ExternalGeneration {
            message: error.to_string(),
        }
    }
}

/// Convert anyhow errors to API errors
impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal {
            message: error.to_string(),
        }
    }
}

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
