//! REST client for the pet report endpoints.
//!
//! [`PetApi`] is the seam the controller depends on; [`HttpPetApi`] is the
//! [`reqwest`] implementation used in the browser and against a live server.

use async_trait::async_trait;
use indexmap::IndexMap;
use pawmap_core::locations::CentralLocation;
use pawmap_core::pet::PetReport;
use pawmap_core::types::PetId;
use reqwest::multipart::{Form, Part};

use crate::submission::PetSubmission;

/// Errors from the pet API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Pet API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Backend operations the controller needs.
///
/// Futures are not required to be `Send`: the controller runs on a single
/// event-handling thread, and in the browser the HTTP futures are `!Send`.
#[async_trait(?Send)]
pub trait PetApi {
    /// `GET /api/pets`
    async fn list_pets(&self) -> Result<IndexMap<PetId, PetReport>, ApiError>;

    /// `POST /api/pets` (multipart)
    async fn create_pet(&self, submission: &PetSubmission) -> Result<PetReport, ApiError>;

    /// `POST /api/pets/{id}/status`
    async fn toggle_status(&self, id: &PetId) -> Result<PetReport, ApiError>;

    /// `DELETE /api/pets/{id}`
    async fn delete_pet(&self, id: &PetId) -> Result<(), ApiError>;

    /// `GET /api/locations`
    async fn list_locations(&self) -> Result<Vec<CentralLocation>, ApiError>;
}

/// HTTP client for one backend.
#[derive(Debug, Clone)]
pub struct HttpPetApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPetApi {
    /// * `base_url` - e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn pets_url(&self) -> String {
        format!("{}/api/pets", self.base_url)
    }

    fn pet_url(&self, id: &PetId) -> String {
        format!("{}/api/pets/{}", self.base_url, id)
    }

    fn locations_url(&self) -> String {
        format!("{}/api/locations", self.base_url)
    }

    fn multipart_form(submission: &PetSubmission) -> Result<Form, ApiError> {
        let fields = &submission.fields;
        let image = &submission.image;

        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }

        Ok(Form::new()
            .text("pet_name", fields.name.clone())
            .text("contact", fields.contact.clone())
            .text("description", fields.description.clone())
            .text("latitude", fields.location.lat.to_string())
            .text("longitude", fields.location.lng.to_string())
            .text("submissionTime", fields.submission_time.to_string())
            .part("pet_image", part))
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an [`ApiError::Status`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl PetApi for HttpPetApi {
    async fn list_pets(&self) -> Result<IndexMap<PetId, PetReport>, ApiError> {
        let response = self.client.get(self.pets_url()).send().await?;
        Self::parse_response(response).await
    }

    async fn create_pet(&self, submission: &PetSubmission) -> Result<PetReport, ApiError> {
        let form = Self::multipart_form(submission)?;
        let response = self
            .client
            .post(self.pets_url())
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn toggle_status(&self, id: &PetId) -> Result<PetReport, ApiError> {
        let response = self
            .client
            .post(format!("{}/status", self.pet_url(id)))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_pet(&self, id: &PetId) -> Result<(), ApiError> {
        let response = self.client.delete(self.pet_url(id)).send().await?;
        Self::check_status(response).await
    }

    async fn list_locations(&self) -> Result<Vec<CentralLocation>, ApiError> {
        let response = self.client.get(self.locations_url()).send().await?;
        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_base() {
        let api = HttpPetApi::new("http://pets.test/");
        assert_eq!(api.pets_url(), "http://pets.test/api/pets");
        assert_eq!(api.pet_url(&PetId::from("pet_1")), "http://pets.test/api/pets/pet_1");
        assert_eq!(api.locations_url(), "http://pets.test/api/locations");
    }

    #[test]
    fn status_error_exposes_code() {
        let err = ApiError::Status {
            status: 404,
            body: "{}".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }
}
