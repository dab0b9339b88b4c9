use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    domain::{
        errors::{ImageError, ImageErrorKind},
        models::StoredImage,
    },
    ports::services::StoreProbe,
};

/// DTO for JSON error responses
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// Body of the 404 answer for a missing student
#[derive(Debug, Clone, Serialize)]
pub struct MessageDto {
    pub message: String,
}

/// Photos stored for one student
#[derive(Debug, Clone, Serialize)]
pub struct PhotoListDto {
    pub id: i64,
    pub count: usize,
    pub photos: Vec<StoredImage>,
}

/// Outcome of the object store connectivity check
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProbeResponseDto {
    #[serde(rename_all = "camelCase")]
    Connected {
        success: bool,
        message: String,
        bucket: String,
        region: String,
        objects_count: usize,
    },
    Failed {
        error: String,
        details: Option<ProbeFailureDto>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeFailureDto {
    pub code: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl From<&ImageError> for StatusCode {
    fn from(error: &ImageError) -> Self {
        match error.kind {
            ImageErrorKind::Configuration => StatusCode::SERVICE_UNAVAILABLE,
            ImageErrorKind::NotFound => StatusCode::NOT_FOUND,
            ImageErrorKind::Store => StatusCode::BAD_GATEWAY,
        }
    }
}

impl ErrorResponseDto {
    pub fn from_image_error(error: &ImageError) -> Self {
        ErrorResponseDto {
            error: "ImageError".to_string(),
            message: error.to_string(),
            details: serde_json::to_value(error).ok(),
            timestamp: Utc::now(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        ErrorResponseDto {
            error: "NotFound".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        ErrorResponseDto {
            error: "InternalServerError".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ProbeResponseDto {
    pub fn from_result(result: Result<StoreProbe, ImageError>) -> Self {
        match result {
            Ok(probe) => ProbeResponseDto::Connected {
                success: true,
                message: "S3 connection successful".to_string(),
                bucket: probe.bucket,
                region: probe.region,
                objects_count: probe.objects_count,
            },
            Err(e) if e.is_configuration() => ProbeResponseDto::Failed {
                error: e.message,
                details: None,
            },
            Err(e) => ProbeResponseDto::Failed {
                error: "S3 connection failed".to_string(),
                details: Some(ProbeFailureDto {
                    code: e.code,
                    message: e.message,
                    status_code: e.status_code,
                }),
            },
        }
    }
}
