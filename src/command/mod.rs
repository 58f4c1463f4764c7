mod history;

pub use history::CommandHistory;

use crate::sticker::PlacedSticker;
use crate::stroke::StrokeRef;
use crate::surface::CanvasSurface;

/// A committed drawing action, replayable onto any surface.
///
/// Previews are deliberately not commands: they never enter the display list
/// or the redo stack, so they live as a separate type on the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke(StrokeRef),
    Sticker(PlacedSticker),
}

impl DrawCommand {
    /// Render this command onto the surface.
    pub fn render(&self, surface: &mut dyn CanvasSurface) {
        match self {
            DrawCommand::Stroke(stroke) => {
                surface.stroke_path(stroke.points(), stroke.width(), stroke.color());
            }
            DrawCommand::Sticker(sticker) => {
                surface.sticker(sticker.id(), sticker.pos());
            }
        }
    }
}
