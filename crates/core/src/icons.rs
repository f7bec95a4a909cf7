//! Marker icon descriptors.
//!
//! All four marker colors share one template (shadow, sizes, anchors) and
//! differ only in the image URL. Descriptors are built once and handed out
//! by reference.

use serde::Serialize;

/// Default prefix of the colored marker images; the color and `.png` are
/// appended.
pub const DEFAULT_ICON_URL_PREFIX: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-";

pub const DEFAULT_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl MarkerColor {
    pub const ALL: [MarkerColor; 4] = [Self::Blue, Self::Red, Self::Green, Self::Yellow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Blue => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
        }
    }
}

/// Where the icon images live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTemplate {
    pub icon_url_prefix: String,
    pub shadow_url: String,
}

impl Default for IconTemplate {
    fn default() -> Self {
        Self {
            icon_url_prefix: DEFAULT_ICON_URL_PREFIX.to_string(),
            shadow_url: DEFAULT_SHADOW_URL.to_string(),
        }
    }
}

/// Icon options in the shape the map library's icon constructor expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    pub icon_url: String,
    pub shadow_url: String,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_size: [u32; 2],
}

impl IconDescriptor {
    fn from_template(template: &IconTemplate, color: MarkerColor) -> Self {
        Self {
            icon_url: format!("{}{}.png", template.icon_url_prefix, color.as_str()),
            shadow_url: template.shadow_url.clone(),
            icon_size: [25, 41],
            icon_anchor: [12, 41],
            popup_anchor: [1, -34],
            shadow_size: [41, 41],
        }
    }
}

/// Cache of the four marker icons.
#[derive(Debug, Clone)]
pub struct IconFactory {
    icons: [IconDescriptor; 4],
}

impl IconFactory {
    pub fn new(template: &IconTemplate) -> Self {
        Self {
            icons: MarkerColor::ALL.map(|color| IconDescriptor::from_template(template, color)),
        }
    }

    pub fn icon(&self, color: MarkerColor) -> &IconDescriptor {
        &self.icons[color.index()]
    }
}

impl Default for IconFactory {
    fn default() -> Self {
        Self::new(&IconTemplate::default())
    }
}
