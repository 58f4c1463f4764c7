use crate::editor::{Preview, Scene};
use crate::sticker::{StickerArt, StickerCatalog, StickerId};
use crate::surface::CanvasSurface;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, TextureHandle, pos2, vec2};
use std::collections::HashMap;

/// Rendered size of a sticker, in canvas points.
pub const STICKER_SIZE: f32 = 32.0;

const PREVIEW_ALPHA: f32 = 0.5;

/// Full redraw from scratch: clear, then replay the display list, then the
/// gesture in progress, then the preview (idle only). No diffing.
pub fn render(scene: &Scene<'_>, surface: &mut dyn CanvasSurface) {
    surface.clear();
    for command in scene.commands {
        command.render(surface);
    }
    if let Some(stroke) = scene.in_progress_stroke {
        surface.stroke_path(stroke.points(), stroke.width(), stroke.color());
    }
    if let Some(sticker) = scene.in_progress_sticker {
        surface.sticker(sticker.id(), sticker.pos());
    }
    match scene.preview {
        Some(Preview::MarkerCircle { pos, width, color }) => {
            surface.preview_circle(*pos, *width, *color);
        }
        Some(Preview::Sticker { id, pos }) => {
            surface.preview_sticker(id, *pos);
        }
        None => {}
    }
}

/// [`CanvasSurface`] over an egui painter clipped to the canvas rect.
///
/// Canvas-local coordinates come in; this adds the rect origin back before
/// painting. Sticker images are looked up in the texture map the app uploads
/// from the catalog; anything without a texture falls back to the catalog
/// glyph, or a placeholder box for assets that failed to load.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
    catalog: &'a StickerCatalog,
    textures: &'a HashMap<StickerId, TextureHandle>,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(
        painter: &'a Painter,
        rect: Rect,
        catalog: &'a StickerCatalog,
        textures: &'a HashMap<StickerId, TextureHandle>,
    ) -> Self {
        Self {
            painter,
            rect,
            catalog,
            textures,
            background: Color32::WHITE,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.rect.min.to_vec2()
    }

    fn draw_sticker(&mut self, id: &StickerId, pos: Pos2, alpha: f32) {
        let center = self.to_screen(pos);
        let rect = Rect::from_center_size(center, vec2(STICKER_SIZE, STICKER_SIZE));

        if let Some(texture) = self.textures.get(id) {
            let tint = Color32::WHITE.gamma_multiply(alpha);
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            self.painter.image(texture.id(), rect, uv, tint);
            return;
        }

        match self.catalog.art(id) {
            StickerArt::Glyph(glyph) => {
                self.painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    glyph,
                    FontId::proportional(STICKER_SIZE),
                    Color32::BLACK.gamma_multiply(alpha),
                );
            }
            StickerArt::Image(_) | StickerArt::Missing => {
                // Decoded image with no uploaded texture, or a broken asset:
                // draw the visible placeholder rather than nothing.
                let color = Color32::GRAY.gamma_multiply(alpha);
                self.painter
                    .rect_stroke(rect, 2.0, egui::Stroke::new(1.0, color));
                self.painter.text(
                    center,
                    Align2::CENTER_CENTER,
                    "?",
                    FontId::proportional(STICKER_SIZE * 0.75),
                    color,
                );
            }
        }
    }
}

impl CanvasSurface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 {
            return;
        }
        let screen: Vec<Pos2> = points.iter().map(|&p| self.to_screen(p)).collect();
        self.painter
            .add(egui::Shape::line(screen, egui::Stroke::new(width, color)));
    }

    fn sticker(&mut self, id: &StickerId, pos: Pos2) {
        self.draw_sticker(id, pos, 1.0);
    }

    fn preview_circle(&mut self, pos: Pos2, width: f32, color: Color32) {
        self.painter.circle_stroke(
            self.to_screen(pos),
            (width / 2.0).max(1.0),
            egui::Stroke::new(1.0, color.gamma_multiply(PREVIEW_ALPHA)),
        );
    }

    fn preview_sticker(&mut self, id: &StickerId, pos: Pos2) {
        self.draw_sticker(id, pos, PREVIEW_ALPHA);
    }
}
