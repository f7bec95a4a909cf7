//! What the new-report form hands to the controller.

use pawmap_core::pet::NewPetFields;
use pawmap_core::types::LatLng;

/// An image file picked in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// The values of the new-report form at submit time.
#[derive(Debug, Clone, PartialEq)]
pub struct PetForm {
    pub name: String,
    pub contact: String,
    pub description: String,
    /// Filled from the hidden coordinate inputs set by the map click.
    pub location: LatLng,
    pub image: ImageUpload,
}

impl PetForm {
    /// Stamp the form with the client-side submission time (epoch millis).
    pub fn into_submission(self, submission_time: i64) -> PetSubmission {
        PetSubmission {
            fields: NewPetFields {
                name: self.name,
                contact: self.contact,
                description: self.description,
                location: self.location,
                submission_time,
            },
            image: self.image,
        }
    }
}

/// A complete create request: form fields, timestamp and image.
#[derive(Debug, Clone, PartialEq)]
pub struct PetSubmission {
    pub fields: NewPetFields,
    pub image: ImageUpload,
}
