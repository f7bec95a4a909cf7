//! Side-panel HTML for the pet directory.
//!
//! The list is rebuilt from scratch on every change. Buttons carry the pet id
//! in `data-pet-id` and one of two classes; [`ListAction::from_button`]
//! reverses that mapping when a click bubbles up to the panel.

use std::borrow::Cow;
use std::fmt::Write;

use crate::directory::PetDirectory;
use crate::pet::PetReport;
use crate::types::{whole_days_since, PetId, Timestamp};

pub const EMPTY_LIST_MESSAGE: &str =
    "Everyone's fluffy friends are currently safe and sound at home.";

pub const STATUS_BUTTON_CLASS: &str = "status-btn";
pub const DELETE_BUTTON_CLASS: &str = "delete-btn";
pub const PET_ID_ATTRIBUTE: &str = "data-pet-id";

/// A click on one of the list's card buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    ToggleStatus(PetId),
    Delete(PetId),
}

impl ListAction {
    /// Decode a clicked element from its class list and `data-pet-id`.
    /// Elements without a pet id or without a known class are ignored.
    pub fn from_button(class_list: &str, pet_id: Option<&str>) -> Option<Self> {
        let pet_id = pet_id.filter(|id| !id.is_empty())?;
        let mut classes = class_list.split_whitespace();
        if classes.clone().any(|c| c == STATUS_BUTTON_CLASS) {
            Some(Self::ToggleStatus(PetId::from(pet_id)))
        } else if classes.any(|c| c == DELETE_BUTTON_CLASS) {
            Some(Self::Delete(PetId::from(pet_id)))
        } else {
            None
        }
    }

    pub fn pet_id(&self) -> &PetId {
        match self {
            Self::ToggleStatus(id) | Self::Delete(id) => id,
        }
    }
}

/// Escape text for safe use in element content and quoted attributes.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// "today" or "N day(s) ago".
pub fn posted_age(submission_time: i64, now: Timestamp) -> String {
    match whole_days_since(submission_time, now) {
        0 => "today".to_string(),
        days => format!("{days} day(s) ago"),
    }
}

/// Render the whole side panel.
pub fn render_pet_list(directory: &PetDirectory, now: Timestamp) -> String {
    if directory.is_empty() {
        return format!("<p>{}</p>", escape_html(EMPTY_LIST_MESSAGE));
    }

    let mut html = String::new();
    for report in directory.display_order() {
        render_card(&mut html, report, now);
    }
    html
}

fn render_card(out: &mut String, pet: &PetReport, now: Timestamp) {
    let id = escape_html(pet.id.as_str());
    let name = escape_html(&pet.name);
    let found = pet.is_found();

    let (card_class, status_class, status_label) = if found {
        ("pet-card found", "status-found", "Mark as Not Found")
    } else {
        ("pet-card", "status-not-found", "Mark as Found")
    };

    let delete_button = if found {
        format!(
            r#"<button class="{DELETE_BUTTON_CLASS}" {PET_ID_ATTRIBUTE}="{id}">Delete Report</button>"#
        )
    } else {
        String::new()
    };

    // Writing to a String cannot fail.
    let _ = write!(
        out,
        r#"<div class="{card_class}" id="{id}">
    <img src="{image}" alt="Photo of {name}">
    <div class="pet-info">
        <h3>{name}</h3>
        <p><strong>Contact:</strong> {contact}</p>
        <p><strong>Description:</strong> {description}</p>
        <div class="pet-meta">
            <span>Posted {age}</span>
            <div>
                <button class="{STATUS_BUTTON_CLASS} {status_class}" {PET_ID_ATTRIBUTE}="{id}">{status_label}</button>
                {delete_button}
            </div>
        </div>
    </div>
</div>
"#,
        image = escape_html(&pet.image_url),
        contact = escape_html(&pet.contact),
        description = escape_html(&pet.description),
        age = posted_age(pet.submission_time, now),
    );
}
