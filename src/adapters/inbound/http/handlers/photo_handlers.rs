use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    adapters::inbound::http::{
        dto::{ErrorResponseDto, PhotoListDto, ProbeResponseDto},
        router::AppState,
    },
    domain::{keys::SUPPLIER_COLLECTION, value_objects::ObjectKey},
    ports::services::SupplierError,
};

type JsonError = (StatusCode, Json<ErrorResponseDto>);

fn supplier_error(error: SupplierError) -> JsonError {
    match error {
        SupplierError::NotFound { id } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponseDto::not_found(&format!(
                "Not found Student with id {}.",
                id
            ))),
        ),
        SupplierError::Image(e) => (
            StatusCode::from(&e),
            Json(ErrorResponseDto::from_image_error(&e)),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponseDto::internal_error(&other.to_string())),
        ),
    }
}

/// Handle listing a student's stored photos
pub async fn list_photos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PhotoListDto>, JsonError> {
    let photos = state
        .supplier_service
        .photos(id)
        .await
        .map_err(supplier_error)?;

    Ok(Json(PhotoListDto {
        id,
        count: photos.len(),
        photos,
    }))
}

/// Handle photo retrieval
pub async fn get_photo(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, JsonError> {
    let key = ObjectKey::new(key).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::bad_request(&format!("Invalid object key: {}", e))),
        )
    })?;

    // Only photos are served from this route
    if !key.has_prefix(&format!("{}/", SUPPLIER_COLLECTION)) {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponseDto::not_found(&format!("Object not found: {}", key))),
        ));
    }

    let image = state
        .supplier_service
        .photo(&key)
        .await
        .map_err(supplier_error)?;

    let content_type = image
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let last_modified = image
        .last_modified
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::LAST_MODIFIED, last_modified),
        ],
        image.data,
    )
        .into_response())
}

/// Handle the object store connectivity check
pub async fn test_s3(State(state): State<AppState>) -> Json<ProbeResponseDto> {
    Json(ProbeResponseDto::from_result(state.image_service.probe().await))
}
