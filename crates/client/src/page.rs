//! The page elements the controller drives.

use pawmap_core::mode::MapCursor;
use pawmap_core::types::LatLng;

/// DOM operations used by the controller.
///
/// The browser implementation maps these onto `#pet-details-list`,
/// `#pet-lat`/`#pet-lng`, `#lost-pet-form-container`, `#lost-pet-form` and
/// the `#map` element's cursor.
pub trait PageSurface {
    /// Replace the side panel content.
    fn set_list_html(&mut self, html: &str);

    /// Write a clicked coordinate into the form's hidden fields.
    fn set_form_location(&mut self, at: LatLng);

    fn show_form(&mut self);

    fn hide_form(&mut self);

    /// Clear every form input.
    fn reset_form(&mut self);

    fn set_map_cursor(&mut self, cursor: MapCursor);

    /// Blocking notice to the user.
    fn alert(&mut self, message: &str);

    /// Blocking yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}
