use egui::Pos2;
use std::collections::HashMap;
use thiserror::Error;

/// Identifier for a sticker in the catalog ("star", "heart", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StickerId(String);

impl StickerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StickerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sticker on the canvas. The position stays mutable while the user is
/// dragging it into place; commit hands over the final value.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSticker {
    id: StickerId,
    pos: Pos2,
}

impl PlacedSticker {
    pub fn new(id: StickerId, pos: Pos2) -> Self {
        Self { id, pos }
    }

    pub fn id(&self) -> &StickerId {
        &self.id
    }

    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    /// Reposition while the placement gesture is still active.
    pub fn move_to(&mut self, pos: Pos2) {
        self.pos = pos;
    }
}

#[derive(Debug, Error)]
pub enum StickerError {
    #[error("failed to decode sticker image '{id}': {source}")]
    Decode {
        id: StickerId,
        source: image::ImageError,
    },
}

/// One entry in the catalog: either a decoded image or a text glyph.
///
/// A sticker whose image failed to decode stays registered with no art;
/// rendering falls back to a visible placeholder so a broken asset never
/// blocks commit or redraw.
#[derive(Debug, Clone)]
pub enum StickerArt {
    Image(image::RgbaImage),
    Glyph(String),
    Missing,
}

/// Registry of the stickers offered by the tool palette.
#[derive(Debug, Default)]
pub struct StickerCatalog {
    entries: Vec<(StickerId, StickerArt)>,
    by_id: HashMap<StickerId, usize>,
}

impl StickerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The emoji set the drawing page ships with.
    pub fn with_default_stickers() -> Self {
        let mut catalog = Self::new();
        catalog.insert_glyph(StickerId::new("star"), "⭐");
        catalog.insert_glyph(StickerId::new("heart"), "❤");
        catalog.insert_glyph(StickerId::new("smiley"), "😀");
        catalog
    }

    pub fn insert_glyph(&mut self, id: StickerId, glyph: impl Into<String>) {
        self.insert(id, StickerArt::Glyph(glyph.into()));
    }

    /// Decode image bytes for a sticker. On failure the id is still
    /// registered, with `StickerArt::Missing`, and the error is returned for
    /// the caller to log or ignore.
    pub fn insert_image_bytes(
        &mut self,
        id: StickerId,
        bytes: &[u8],
    ) -> Result<(), StickerError> {
        match image::load_from_memory(bytes) {
            Ok(img) => {
                log::debug!(
                    "decoded sticker '{}': {}x{}",
                    id,
                    img.width(),
                    img.height()
                );
                self.insert(id, StickerArt::Image(img.to_rgba8()));
                Ok(())
            }
            Err(source) => {
                log::warn!("sticker '{}' failed to decode, using fallback glyph", id);
                self.insert(id.clone(), StickerArt::Missing);
                Err(StickerError::Decode { id, source })
            }
        }
    }

    fn insert(&mut self, id: StickerId, art: StickerArt) {
        if let Some(&index) = self.by_id.get(&id) {
            self.entries[index].1 = art;
        } else {
            self.by_id.insert(id.clone(), self.entries.len());
            self.entries.push((id, art));
        }
    }

    /// Art for a sticker id. Unknown ids get the fallback too, so rendering
    /// stays total.
    pub fn art(&self, id: &StickerId) -> &StickerArt {
        match self.by_id.get(id) {
            Some(&index) => &self.entries[index].1,
            None => &StickerArt::Missing,
        }
    }

    /// Catalog entries in palette order.
    pub fn ids(&self) -> impl Iterator<Item = &StickerId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
