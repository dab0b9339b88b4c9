use axum::{
    extract::{multipart::Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use bytes::Bytes;
use minijinja::context;
use tracing::{error, warn};

use crate::{
    adapters::inbound::http::{dto::MessageDto, router::AppState},
    domain::models::{FieldError, ImageUpload, SupplierForm},
    ports::services::SupplierError,
};

const ADD_PAGE: &str = "supplier-add.html";
const UPDATE_PAGE: &str = "supplier-update.html";

/// Fields and optional file read from a multipart supplier form
struct Submission {
    form: SupplierForm,
    photo: Option<(Bytes, String)>,
}

impl Submission {
    async fn read(mut multipart: Multipart) -> Result<Self, (StatusCode, String)> {
        let mut form = SupplierForm::default();
        let mut photo = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| (e.status(), e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "photo" {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| (e.status(), e.body_text()))?;
                photo = Some((data, content_type));
                continue;
            }

            let value = field.text().await.map_err(|e| (e.status(), e.body_text()))?;
            match name.as_str() {
                "id" => form.id = value,
                "name" => form.name = value,
                "address" => form.address = value,
                "city" => form.city = value,
                "state" => form.state = value,
                "email" => form.email = value,
                "phone" => form.phone = value,
                "photo_url" => form.photo_url = value,
                _ => {}
            }
        }

        Ok(Self { form, photo })
    }

    /// Validate the file part; `None` when no file was chosen
    fn upload(&self) -> Result<Option<ImageUpload>, FieldError> {
        match &self.photo {
            Some((data, content_type)) => ImageUpload::from_part(data.clone(), content_type)
                .map_err(|e| FieldError::new("photo", e.to_string())),
            None => Ok(None),
        }
    }
}

fn form_page(state: &AppState, page: &str, form: SupplierForm, errors: Vec<FieldError>) -> Response {
    state.views.page(
        StatusCode::UNPROCESSABLE_ENTITY,
        page,
        context! { supplier => form, errors => errors },
    )
}

fn upload_failed(state: &AppState, error: &crate::domain::errors::ImageError) -> Response {
    let details = serde_json::to_string(error).unwrap_or_else(|_| error.to_string());
    error!(error = %error, "image upload failed");
    state
        .views
        .error_page(format!("Image upload failed. Details: {}", details))
}

fn not_found_json(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(MessageDto::new(message))).into_response()
}

/// Home page
pub async fn home(State(state): State<AppState>) -> Response {
    state.views.page(StatusCode::OK, "home.html", context! {})
}

/// List all students
pub async fn list_students(State(state): State<AppState>) -> Response {
    match state.supplier_service.find_all().await {
        Ok(students) => state.views.page(
            StatusCode::OK,
            "supplier-list-all.html",
            context! { students => students },
        ),
        Err(e) => {
            error!(error = %e, "failed to list students");
            state
                .views
                .error_page("There was a problem retrieving the list of students")
        }
    }
}

/// Empty create form
pub async fn add_form(State(state): State<AppState>) -> Response {
    state.views.page(
        StatusCode::OK,
        ADD_PAGE,
        context! { supplier => SupplierForm::default() },
    )
}

/// Handle the create form POST
pub async fn create_supplier(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match Submission::read(multipart).await {
        Ok(submission) => submission,
        Err((status, message)) => return (status, message).into_response(),
    };
    let photo = match submission.upload() {
        Ok(photo) => photo,
        Err(e) => return form_page(&state, ADD_PAGE, submission.form.trimmed(), vec![e]),
    };

    match state.supplier_service.create(submission.form, photo).await {
        Ok(_) => Redirect::to("/students").into_response(),
        Err(SupplierError::Validation { form, errors }) => form_page(&state, ADD_PAGE, form, errors),
        Err(SupplierError::Image(e)) => upload_failed(&state, &e),
        Err(e) => {
            error!(error = %e, "failed to create student");
            state.views.error_page("Error occurred while creating the Student.")
        }
    }
}

/// Edit form for an existing student
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.supplier_service.find_one(id).await {
        Ok(supplier) => state.views.page(
            StatusCode::OK,
            UPDATE_PAGE,
            context! { supplier => SupplierForm::from_supplier(&supplier) },
        ),
        Err(SupplierError::NotFound { .. }) => {
            not_found_json(format!("Not found Student with id {}.", id))
        }
        Err(e) => {
            error!(id, error = %e, "failed to load student");
            state
                .views
                .error_page(format!("Error retrieving student with id {}", id))
        }
    }
}

/// Handle the update form POST; the id travels in the form
pub async fn update_supplier(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match Submission::read(multipart).await {
        Ok(submission) => submission,
        Err((status, message)) => return (status, message).into_response(),
    };

    let raw_id = submission.form.id.trim().to_string();
    let Ok(id) = raw_id.parse::<i64>() else {
        warn!(id = %raw_id, "update submitted without a valid id");
        return not_found_json(format!("Student with id {} Not found.", raw_id));
    };

    let photo = match submission.upload() {
        Ok(photo) => photo,
        Err(e) => return form_page(&state, UPDATE_PAGE, submission.form.trimmed(), vec![e]),
    };

    match state.supplier_service.update(id, submission.form, photo).await {
        Ok(_) => Redirect::to("/students").into_response(),
        Err(SupplierError::Validation { form, errors }) => {
            form_page(&state, UPDATE_PAGE, form, errors)
        }
        Err(SupplierError::NotFound { .. }) => {
            not_found_json(format!("Student with id {} Not found.", id))
        }
        Err(SupplierError::Image(e)) => upload_failed(&state, &e),
        Err(e) => {
            error!(id, error = %e, "failed to update student");
            state
                .views
                .error_page(format!("Error updating Student with id {}", id))
        }
    }
}

/// Delete a student and its photo
pub async fn remove_supplier(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.supplier_service.remove(id).await {
        Ok(()) => Redirect::to("/students").into_response(),
        Err(SupplierError::NotFound { .. }) => {
            not_found_json(format!("Not found Student with id {}.", id))
        }
        Err(e) => {
            error!(id, error = %e, "failed to remove student");
            state
                .views
                .error_page(format!("Could not delete Student with id {}", id))
        }
    }
}

/// Fallback for unknown routes
pub async fn not_found(State(state): State<AppState>) -> Response {
    state.views.not_found_page()
}
