use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handlers::{
        add_form, create_supplier, edit_form, get_photo, home, list_photos, list_students,
        not_found, remove_supplier, test_s3, update_supplier,
    },
    views::Views,
};
use crate::{
    domain::models::MAX_PHOTO_BYTES,
    ports::services::{ImageService, SupplierService},
};

/// Request bodies may carry one photo plus the text fields
pub const MAX_BODY_BYTES: usize = MAX_PHOTO_BYTES + 1024 * 1024;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub supplier_service: Arc<dyn SupplierService>,
    pub image_service: Arc<dyn ImageService>,
    pub views: Views,
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(home))
        .route("/students", get(list_students))
        .route("/students/", get(list_students))
        .route("/supplier-add", get(add_form).post(create_supplier))
        .route("/supplier-update/{id}", get(edit_form))
        .route("/supplier-update", post(update_supplier))
        .route("/supplier-remove/{id}", post(remove_supplier))
        // Photos
        .route("/students/{id}/photos", get(list_photos))
        .route("/photos/{*key}", get(get_photo))
        .route("/test-s3", get(test_s3))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
