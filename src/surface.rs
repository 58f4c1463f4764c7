use crate::sticker::StickerId;
use egui::{Color32, Pos2};

/// The drawing surface the engine renders onto.
///
/// The display list, history and state machine only ever talk to this trait;
/// the egui painter and the raster export target are two implementations of
/// the same contract.
pub trait CanvasSurface {
    /// Wipe the surface before a full replay.
    fn clear(&mut self);

    /// Draw a committed or in-progress freehand stroke as a connected
    /// polyline. Implementations draw nothing for fewer than 2 points; a
    /// single recorded point is invisible.
    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Draw a sticker centered at `pos`.
    fn sticker(&mut self, id: &StickerId, pos: Pos2);

    /// Ghost circle showing the marker size/color at the cursor.
    fn preview_circle(&mut self, pos: Pos2, width: f32, color: Color32);

    /// Ghost sticker at the cursor.
    fn preview_sticker(&mut self, id: &StickerId, pos: Pos2);
}
