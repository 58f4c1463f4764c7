use crate::document::Document;
use crate::renderer::STICKER_SIZE;
use crate::sticker::{StickerArt, StickerCatalog, StickerId};
use crate::surface::CanvasSurface;
use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage, imageops};

/// Render the committed display list onto a fresh raster image scaled up by
/// an integer factor. Previews and gestures in progress are excluded; this
/// pass sees only the document.
pub fn export(
    document: &Document,
    canvas_size: (u32, u32),
    scale: u32,
    catalog: &StickerCatalog,
) -> RgbaImage {
    let mut surface = RasterSurface::new(canvas_size.0, canvas_size.1, scale, catalog);
    surface.clear();
    for command in document.commands() {
        command.render(&mut surface);
    }
    log::info!(
        "exported {} commands at {}x ({}x{} px)",
        document.len(),
        scale,
        surface.image.width(),
        surface.image.height()
    );
    surface.into_image()
}

/// [`CanvasSurface`] over an `RgbaImage`. Canvas point (x, y) lands on
/// output pixel (scale·x, scale·y).
pub struct RasterSurface<'a> {
    image: RgbaImage,
    scale: f32,
    catalog: &'a StickerCatalog,
    background: Rgba<u8>,
}

impl<'a> RasterSurface<'a> {
    pub fn new(width: u32, height: u32, scale: u32, catalog: &'a StickerCatalog) -> Self {
        debug_assert!(scale >= 1);
        Self {
            image: RgbaImage::new(width * scale, height * scale),
            scale: scale as f32,
            catalog,
            background: Rgba([255, 255, 255, 255]),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Stamp a thick segment as a run of filled squares along the line.
    fn segment(&mut self, a: Pos2, b: Pos2, width: f32, color: Rgba<u8>) {
        let (x0, y0) = (a.x * self.scale, a.y * self.scale);
        let (x1, y1) = (b.x * self.scale, b.y * self.scale);
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len = (dx * dx + dy * dy).sqrt();
        let steps = (len * 2.0) as i32;
        let half = ((width * self.scale / 2.0).max(0.5)) as i32;
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);

        for i in 0..=steps {
            let t = i as f32 / steps.max(1) as f32;
            let cx = (x0 + dx * t).round() as i32;
            let cy = (y0 + dy * t).round() as i32;
            for oy in -half..=half {
                for ox in -half..=half {
                    let px = cx + ox;
                    let py = cy + oy;
                    if px >= 0 && px < w && py >= 0 && py < h {
                        self.image.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }

    fn placeholder_box(&mut self, cx: i32, cy: i32, side: i32) {
        let fill = Rgba([200, 200, 200, 255]);
        let border = Rgba([120, 120, 120, 255]);
        let (w, h) = (self.image.width() as i32, self.image.height() as i32);
        let half = side / 2;
        for oy in -half..=half {
            for ox in -half..=half {
                let px = cx + ox;
                let py = cy + oy;
                if px >= 0 && px < w && py >= 0 && py < h {
                    let on_edge = ox.abs() == half || oy.abs() == half;
                    self.image
                        .put_pixel(px as u32, py as u32, if on_edge { border } else { fill });
                }
            }
        }
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), color.a()])
}

impl CanvasSurface for RasterSurface<'_> {
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        // A single recorded point is invisible, matching the live canvas.
        if points.len() < 2 {
            return;
        }
        let color = to_rgba(color);
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1], width, color);
        }
    }

    fn sticker(&mut self, id: &StickerId, pos: Pos2) {
        let side = (STICKER_SIZE * self.scale) as u32;
        let cx = (pos.x * self.scale).round() as i32;
        let cy = (pos.y * self.scale).round() as i32;
        match self.catalog.art(id) {
            StickerArt::Image(art) => {
                let resized =
                    imageops::resize(art, side, side, imageops::FilterType::Triangle);
                imageops::overlay(
                    &mut self.image,
                    &resized,
                    cx as i64 - side as i64 / 2,
                    cy as i64 - side as i64 / 2,
                );
            }
            StickerArt::Glyph(_) | StickerArt::Missing => {
                // No text rasterizer in the export path; a box marks the spot.
                self.placeholder_box(cx, cy, side as i32);
            }
        }
    }

    // The export pass replays committed commands only; previews never reach
    // this surface.
    fn preview_circle(&mut self, _pos: Pos2, _width: f32, _color: Color32) {}

    fn preview_sticker(&mut self, _id: &StickerId, _pos: Pos2) {}
}
