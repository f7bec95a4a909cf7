//! Interaction mode: what the next map click means.
//!
//! The mode is a two-state machine. `Idle` map clicks open the new-report
//! form at the clicked coordinate; a popup action switches to `Placing`, and
//! the next map click drops a sighting pin and returns to `Idle`.

use crate::icons::MarkerColor;
use crate::types::PetId;

/// Colors a sighting pin can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SightingColor {
    /// The pet was seen here.
    Green,
    /// This area has been searched.
    Yellow,
}

impl SightingColor {
    pub fn marker_color(self) -> MarkerColor {
        match self {
            Self::Green => MarkerColor::Green,
            Self::Yellow => MarkerColor::Yellow,
        }
    }

    /// Button label shown in the pet marker popup.
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Green => "Report Sighting (Green)",
            Self::Yellow => "Mark Searched Area (Yellow)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// Cursor affordance on the map element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapCursor {
    #[default]
    Default,
    Crosshair,
}

impl MapCursor {
    /// Value for the element's `style.cursor`.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Crosshair => "crosshair",
        }
    }
}

/// An action button inside a pet marker popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupAction {
    pub pet_id: PetId,
    pub color: SightingColor,
}

impl PopupAction {
    pub fn label(&self) -> &'static str {
        self.color.action_label()
    }

    /// Decode a popup button from its pet id and color attributes.
    pub fn from_attributes(pet_id: Option<&str>, color: Option<&str>) -> Option<Self> {
        let pet_id = pet_id.filter(|id| !id.is_empty())?;
        Some(Self {
            pet_id: PetId::from(pet_id),
            color: SightingColor::from_name(color?)?,
        })
    }
}

/// What a map click should do, decided by the mode at click time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickIntent {
    /// Open the new-report form at the clicked coordinate.
    NewReport,
    /// Drop a sighting pin of `color` for `pet_id`.
    PlaceSighting { color: SightingColor, pet_id: PetId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Placing { color: SightingColor, pet_id: PetId },
}

impl InteractionMode {
    /// Switch to pin placement for the action's pet.
    pub fn enter(&mut self, action: &PopupAction) {
        *self = Self::Placing {
            color: action.color,
            pet_id: action.pet_id.clone(),
        };
    }

    /// Consume a map click. Placement is one-shot, so the mode is always
    /// `Idle` afterwards.
    pub fn on_map_click(&mut self) -> ClickIntent {
        match std::mem::take(self) {
            Self::Idle => ClickIntent::NewReport,
            Self::Placing { color, pet_id } => ClickIntent::PlaceSighting { color, pet_id },
        }
    }

    pub fn is_placing(&self) -> bool {
        matches!(self, Self::Placing { .. })
    }

    pub fn cursor(&self) -> MapCursor {
        match self {
            Self::Idle => MapCursor::Default,
            Self::Placing { .. } => MapCursor::Crosshair,
        }
    }
}
