//! Pet report records and the fields of a new submission.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{LatLng, PetId};

/// Prefix of every server-assigned pet id.
pub const PET_ID_PREFIX: &str = "pet_";

/// Whether a reported pet is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PetStatus {
    /// Still missing. Stored as `not-found`; `lost` is accepted on input.
    #[default]
    #[serde(rename = "not-found", alias = "lost")]
    Lost,
    #[serde(rename = "found")]
    Found,
}

impl PetStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Lost => Self::Found,
            Self::Found => Self::Lost,
        }
    }

    pub fn is_found(self) -> bool {
        self == Self::Found
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "not-found",
            Self::Found => "found",
        }
    }
}

/// A single lost/found pet record as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetReport {
    pub id: PetId,
    pub name: String,
    pub contact: String,
    pub description: String,
    pub image_url: String,
    pub latlng: LatLng,
    pub status: PetStatus,
    /// Milliseconds since the Unix epoch, stamped by the submitting client.
    pub submission_time: i64,
}

impl PetReport {
    pub fn is_found(&self) -> bool {
        self.status.is_found()
    }
}

/// Text and coordinate fields of a new report, before the server assigns an
/// id and stores the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPetFields {
    pub name: String,
    pub contact: String,
    pub description: String,
    pub location: LatLng,
    pub submission_time: i64,
}

impl NewPetFields {
    /// The id the backend derives from the submission timestamp.
    pub fn derived_id(&self) -> PetId {
        PetId::new(format!("{PET_ID_PREFIX}{}", self.submission_time))
    }

    /// Check the fields are usable for a report.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Pet name must not be empty".into()));
        }
        if self.contact.trim().is_empty() {
            return Err(CoreError::Validation("Contact must not be empty".into()));
        }
        validate_location(self.location)?;
        if self.submission_time < 0 {
            return Err(CoreError::Validation(format!(
                "Invalid submission time {}",
                self.submission_time
            )));
        }
        Ok(())
    }

    /// Turn the fields into a stored report.
    pub fn into_report(self, image_url: String) -> PetReport {
        PetReport {
            id: self.derived_id(),
            name: self.name,
            contact: self.contact,
            description: self.description,
            image_url,
            latlng: self.location,
            status: PetStatus::Lost,
            submission_time: self.submission_time,
        }
    }
}

/// Validate that a coordinate is finite and inside WGS84 ranges.
pub fn validate_location(p: LatLng) -> Result<(), CoreError> {
    if !p.lat.is_finite() || !(-90.0..=90.0).contains(&p.lat) {
        return Err(CoreError::Validation(format!(
            "Latitude {} out of range [-90, 90]",
            p.lat
        )));
    }
    if !p.lng.is_finite() || !(-180.0..=180.0).contains(&p.lng) {
        return Err(CoreError::Validation(format!(
            "Longitude {} out of range [-180, 180]",
            p.lng
        )));
    }
    Ok(())
}
