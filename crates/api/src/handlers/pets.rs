//! Handlers for pet reports.
//!
//! The response shapes are fixed by the browser client: the list is a bare
//! `{ id: report }` object and single reports are returned unwrapped.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use pawmap_core::directory::PetDirectory;
use pawmap_core::error::CoreError;
use pawmap_core::pet::{NewPetFields, PetReport};
use pawmap_core::types::LatLng;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const NO_IMAGE_MESSAGE: &str = "No image file provided";

fn pet_not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Pet", id })
}

/// GET /api/pets
pub async fn list_pets(State(state): State<AppState>) -> AppResult<Json<PetDirectory>> {
    Ok(Json(state.store.list().await))
}

/// Fields collected from the create form before validation.
#[derive(Default)]
struct CreateForm {
    name: Option<String>,
    contact: Option<String>,
    description: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    submission_time: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl CreateForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();
            if name == "pet_image" {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                form.image = Some((filename, data.to_vec()));
                continue;
            }

            let slot = match name.as_str() {
                "pet_name" => &mut form.name,
                "contact" => &mut form.contact,
                "description" => &mut form.description,
                "latitude" => &mut form.latitude,
                "longitude" => &mut form.longitude,
                "submissionTime" => &mut form.submission_time,
                _ => continue, // ignore unknown fields
            };
            let text = field.text().await.map_err(multipart_error)?;
            *slot = Some(text);
        }

        Ok(form)
    }

    fn into_parts(self) -> AppResult<(NewPetFields, String, Vec<u8>)> {
        let (file_name, bytes) = self
            .image
            .filter(|(file_name, _)| !file_name.is_empty())
            .ok_or_else(|| AppError::BadRequest(NO_IMAGE_MESSAGE.into()))?;

        let fields = NewPetFields {
            name: required(self.name, "pet_name")?,
            contact: required(self.contact, "contact")?,
            description: required(self.description, "description")?,
            location: LatLng::new(
                parse_number(self.latitude, "latitude")?,
                parse_number(self.longitude, "longitude")?,
            ),
            submission_time: parse_number(self.submission_time, "submissionTime")?,
        };
        fields.validate()?;

        Ok((fields, file_name, bytes))
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("Missing required '{field}' field")))
}

fn parse_number<T: std::str::FromStr>(value: Option<String>, field: &str) -> AppResult<T> {
    let raw = required(value, field)?;
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid '{field}' value '{raw}'")))
}

/// POST /api/pets
///
/// Multipart create. The id is derived from the client's submission
/// timestamp and the image is stored next to the other uploads.
pub async fn create_pet(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PetReport>)> {
    let (fields, file_name, bytes) = CreateForm::read(multipart).await?.into_parts()?;

    let image_url = state
        .uploads
        .save(fields.submission_time, &file_name, &bytes)
        .await?;

    let report = state.store.insert(fields.into_report(image_url)).await?;

    tracing::info!(pet_id = %report.id, name = %report.name, "Pet report created");

    Ok((StatusCode::CREATED, Json(report)))
}

/// POST /api/pets/{id}/status
///
/// Flip a report between lost and found.
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PetReport>> {
    let report = state
        .store
        .toggle_status(&id)
        .await?
        .ok_or_else(|| pet_not_found(id))?;

    tracing::info!(pet_id = %report.id, status = report.status.as_str(), "Pet status toggled");

    Ok(Json(report))
}

/// DELETE /api/pets/{id}
///
/// Removes the report and its image. A failure to delete the image is
/// logged and does not fail the request.
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let report = state
        .store
        .remove(&id)
        .await?
        .ok_or_else(|| pet_not_found(id))?;

    if let Err(e) = state.uploads.remove_by_url(&report.image_url).await {
        tracing::warn!(pet_id = %report.id, error = %e, "Error deleting image file");
    }

    tracing::info!(pet_id = %report.id, "Pet report deleted");

    Ok(Json(json!({ "success": true })))
}
