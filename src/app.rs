use crate::editor::Editor;
use crate::export;
use crate::input::InputHandler;
use crate::renderer::{self, EguiSurface};
use crate::sticker::{StickerArt, StickerCatalog, StickerId};
use crate::tools::Tool;
use egui::{Color32, Slider, TextureHandle, vec2};
use std::collections::HashMap;

/// Canvas size in points, same as the page this replaces.
pub const CANVAS_SIZE: (u32, u32) = (256, 256);

/// Export renders the display list at this integer scale-up.
pub const EXPORT_SCALE: u32 = 4;

/// The slice of app state worth restoring between sessions: just the tool
/// settings. The drawing itself lives only for the session.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct ToolSettings {
    tool: Tool,
    marker_width: f32,
    marker_color: Color32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            marker_width: crate::tools::DEFAULT_MARKER_WIDTH,
            marker_color: crate::tools::DEFAULT_MARKER_COLOR,
        }
    }
}

pub struct SketchApp {
    editor: Editor,
    catalog: StickerCatalog,
    input: InputHandler,
    textures: HashMap<StickerId, TextureHandle>,
    marker_width: f32,
    marker_color: Color32,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: ToolSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut editor = Editor::with_tool(settings.tool);
        let egui_ctx = cc.egui_ctx.clone();
        editor.subscribe(move || egui_ctx.request_repaint());

        Self {
            editor,
            catalog: StickerCatalog::with_default_stickers(),
            input: InputHandler::new(),
            textures: HashMap::new(),
            marker_width: settings.marker_width,
            marker_color: settings.marker_color,
        }
    }

    /// Upload any decoded sticker images that don't have a texture yet.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        for id in self.catalog.ids() {
            if self.textures.contains_key(id) {
                continue;
            }
            if let StickerArt::Image(img) = self.catalog.art(id) {
                let size = [img.width() as usize, img.height() as usize];
                let pixels = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                let texture = ctx.load_texture(
                    id.as_str(),
                    pixels,
                    egui::TextureOptions::default(),
                );
                self.textures.insert(id.clone(), texture);
            }
        }
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.separator();

        let marker_active = self.editor.tool().is_marker();
        if ui.selectable_label(marker_active, "🖊 Marker").clicked() {
            self.editor.select_marker(self.marker_width, self.marker_color);
        }

        ui.horizontal(|ui| {
            ui.label("Width:");
            if ui
                .add(Slider::new(&mut self.marker_width, 1.0..=24.0))
                .changed()
                && marker_active
            {
                self.editor.select_marker(self.marker_width, self.marker_color);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Color:");
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut self.marker_color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
                && marker_active
            {
                self.editor.select_marker(self.marker_width, self.marker_color);
            }
        });

        ui.separator();
        ui.label("Stickers:");
        let sticker_ids: Vec<StickerId> = self.catalog.ids().cloned().collect();
        ui.horizontal_wrapped(|ui| {
            for id in sticker_ids {
                let active = self.editor.tool() == &Tool::Sticker(id.clone());
                let label = match self.catalog.art(&id) {
                    StickerArt::Glyph(glyph) => glyph.clone(),
                    _ => id.as_str().to_owned(),
                };
                if ui.selectable_label(active, label).clicked() {
                    self.editor.select_sticker(id);
                }
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            let can_undo = self.editor.history().can_undo();
            if ui.add_enabled(can_undo, egui::Button::new("⟲ Undo")).clicked() {
                self.editor.undo();
            }
            let can_redo = self.editor.history().can_redo();
            if ui.add_enabled(can_redo, egui::Button::new("⟳ Redo")).clicked() {
                self.editor.redo();
            }
        });
        if ui.button("🗑 Clear Canvas").clicked() {
            self.editor.clear();
        }
        if ui.button("💾 Export PNG").clicked() {
            self.export_png();
        }
    }

    fn export_png(&self) {
        let snapshot = export::export(
            self.editor.history().document(),
            CANVAS_SIZE,
            EXPORT_SCALE,
            &self.catalog,
        );
        #[cfg(not(target_arch = "wasm32"))]
        if let Err(err) = snapshot.save("sketchpad-export.png") {
            log::error!("export failed: {err}");
        }
        #[cfg(target_arch = "wasm32")]
        log::warn!(
            "export produced a {}x{} image; wiring a browser download is TODO",
            snapshot.width(),
            snapshot.height()
        );
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let size = vec2(CANVAS_SIZE.0 as f32, CANVAS_SIZE.1 as f32);
        let (response, painter) =
            ui.allocate_painter(size, egui::Sense::click_and_drag());

        for event in self.input.process(&response) {
            self.editor.handle_event(event);
        }

        let mut surface =
            EguiSurface::new(&painter, response.rect, &self.catalog, &self.textures);
        renderer::render(&self.editor.scene(), &mut surface);
    }
}

impl eframe::App for SketchApp {
    /// Persist tool settings; the drawing is deliberately not saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = ToolSettings {
            tool: self.editor.tool().clone(),
            marker_width: self.marker_width,
            marker_color: self.marker_color,
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_textures(ctx);

        egui::SidePanel::left("tools_panel").show(ctx, |ui| {
            self.tools_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Drawing Studio");
            self.canvas(ui);
        });
    }
}
