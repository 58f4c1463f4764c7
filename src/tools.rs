use crate::sticker::StickerId;
use egui::Color32;

/// Default marker width, matching the original canvas setup.
pub const DEFAULT_MARKER_WIDTH: f32 = 4.0;

/// The page's purple, #5a3e9d.
pub const DEFAULT_MARKER_COLOR: Color32 = Color32::from_rgb(0x5a, 0x3e, 0x9d);

/// The active tool. Exactly one is active at a time; selecting a marker
/// drops any sticker selection and vice versa, which the enum makes
/// structural rather than a pair of nullable fields.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Tool {
    Marker { width: f32, color: Color32 },
    Sticker(StickerId),
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Marker {
            width: DEFAULT_MARKER_WIDTH,
            color: DEFAULT_MARKER_COLOR,
        }
    }
}

impl Tool {
    pub fn marker(width: f32, color: Color32) -> Self {
        debug_assert!(width > 0.0);
        Tool::Marker { width, color }
    }

    pub fn sticker(id: StickerId) -> Self {
        Tool::Sticker(id)
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Tool::Marker { .. })
    }
}
