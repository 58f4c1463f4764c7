#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod document;
pub mod editor;
pub mod export;
pub mod input;
pub mod renderer;
pub mod sticker;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use app::SketchApp;
pub use command::{CommandHistory, DrawCommand};
pub use document::Document;
pub use editor::{Editor, InteractionState, Preview};
pub use input::{InputHandler, PointerEvent};
pub use sticker::{PlacedSticker, StickerCatalog, StickerId};
pub use stroke::{MutableStroke, Stroke, StrokeRef};
pub use surface::CanvasSurface;
pub use tools::Tool;
