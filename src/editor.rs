//! The interaction state machine and the single owning context for all
//! drawing state.
//!
//! Valid transitions:
//!
//! ```text
//!            pointer down, marker active
//!   ┌──────┐ ───────────────────────────► ┌─────────┐
//!   │      │ ◄─────────────────────────── │ Drawing │ ─┐ move:
//!   │      │   release (commit)           └─────────┘ ◄┘ extend stroke
//!   │ Idle │   leave   (discard)
//!   │      │
//!   │      │   click, sticker active (the press alone is a no-op)
//!   │      │ ───────────────────────────► ┌────────────────┐
//!   └──────┘ ◄─────────────────────────── │ PlacingSticker │ ─┐ move:
//!              next release (commit)      └────────────────┘ ◄┘ reposition
//!              leave         (commit too)
//! ```
//!
//! The leave edge is asymmetric on purpose: leaving the canvas cancels a
//! stroke but finalizes a sticker placement. That matches the page this
//! replaces.

use crate::command::{CommandHistory, DrawCommand};
use crate::input::PointerEvent;
use crate::sticker::{PlacedSticker, StickerId};
use crate::stroke::MutableStroke;
use crate::tools::Tool;
use egui::{Color32, Pos2};

/// What the current pointer gesture means. The in-progress command lives
/// inside the state variant, so there is at most one by construction.
#[derive(Debug)]
pub enum InteractionState {
    Idle,
    Drawing(MutableStroke),
    PlacingSticker(PlacedSticker),
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Transient hint of what the next action would produce. Derived from the
/// pointer position and the active tool; never committed anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    MarkerCircle {
        pos: Pos2,
        width: f32,
        color: Color32,
    },
    Sticker {
        id: StickerId,
        pos: Pos2,
    },
}

/// Single-subscriber changed signal. The render side registers exactly one
/// listener (a repaint request); anything fancier would be unused.
#[derive(Default)]
pub struct ChangeNotifier {
    listener: Option<Box<dyn FnMut()>>,
}

impl ChangeNotifier {
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) {
        self.listener = Some(Box::new(listener));
    }

    fn notify(&mut self) {
        if let Some(listener) = &mut self.listener {
            listener();
        }
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribed", &self.listener.is_some())
            .finish()
    }
}

/// Everything the drawing surface needs for one replay, borrowed from the
/// editor.
pub struct Scene<'a> {
    pub commands: &'a [DrawCommand],
    pub in_progress_stroke: Option<&'a MutableStroke>,
    pub in_progress_sticker: Option<&'a PlacedSticker>,
    /// Only populated while idle; mid-gesture the in-progress command itself
    /// is the feedback.
    pub preview: Option<&'a Preview>,
}

/// Owns the history, the active tool, the interaction state and the preview.
///
/// All pointer and tool events funnel through here; the display list and the
/// redo stack are only ever touched via the owned [`CommandHistory`].
#[derive(Debug)]
pub struct Editor {
    history: CommandHistory,
    tool: Tool,
    state: InteractionState,
    preview: Option<Preview>,
    notifier: ChangeNotifier,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            history: CommandHistory::new(),
            tool: Tool::default(),
            state: InteractionState::Idle,
            preview: None,
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn with_tool(tool: Tool) -> Self {
        let mut editor = Self::new();
        editor.tool = tool;
        editor
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Register the one redraw listener.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) {
        self.notifier.subscribe(listener);
    }

    pub fn scene(&self) -> Scene<'_> {
        let (in_progress_stroke, in_progress_sticker) = match &self.state {
            InteractionState::Idle => (None, None),
            InteractionState::Drawing(stroke) => (Some(stroke), None),
            InteractionState::PlacingSticker(sticker) => (None, Some(sticker)),
        };
        Scene {
            commands: self.history.document().commands(),
            in_progress_stroke,
            in_progress_sticker,
            preview: if self.state.is_idle() {
                self.preview.as_ref()
            } else {
                None
            },
        }
    }

    // ---- tool selection ----

    pub fn select_marker(&mut self, width: f32, color: Color32) {
        log::info!("tool: marker width={width} color={color:?}");
        self.tool = Tool::marker(width, color);
        self.refresh_preview();
        self.notifier.notify();
    }

    pub fn select_sticker(&mut self, id: StickerId) {
        log::info!("tool: sticker '{id}'");
        self.tool = Tool::sticker(id);
        self.refresh_preview();
        self.notifier.notify();
    }

    // ---- pointer events ----

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Moved(pos) => self.pointer_moved(pos),
            PointerEvent::Released(pos) => self.pointer_released(pos),
            PointerEvent::Left => self.pointer_left(),
        }
    }

    fn pointer_down(&mut self, pos: Pos2) {
        if !self.state.is_idle() {
            return;
        }
        match &self.tool {
            Tool::Marker { width, color } => {
                self.state =
                    InteractionState::Drawing(MutableStroke::new(*color, *width, pos));
                self.notifier.notify();
            }
            // Sticker placement starts on the click, not the press; the
            // press alone does nothing.
            Tool::Sticker(_) => {}
        }
    }

    fn pointer_moved(&mut self, pos: Pos2) {
        match &mut self.state {
            InteractionState::Idle => {
                self.preview = Some(derive_preview(&self.tool, pos));
            }
            InteractionState::Drawing(stroke) => {
                stroke.add_point(pos);
            }
            InteractionState::PlacingSticker(sticker) => {
                sticker.move_to(pos);
            }
        }
        self.notifier.notify();
    }

    fn pointer_released(&mut self, pos: Pos2) {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Idle => {
                if let Tool::Sticker(id) = &self.tool {
                    // The click places the sticker; it stays draggable until
                    // the next release or leave.
                    self.state = InteractionState::PlacingSticker(PlacedSticker::new(
                        id.clone(),
                        pos,
                    ));
                    self.notifier.notify();
                }
            }
            InteractionState::Drawing(stroke) => {
                // A plain click commits a 1-point stroke, which renders as
                // nothing but still occupies an undo slot.
                self.history.commit(DrawCommand::Stroke(stroke.into_stroke_ref()));
                self.preview = Some(derive_preview(&self.tool, pos));
                self.notifier.notify();
            }
            InteractionState::PlacingSticker(sticker) => {
                self.history.commit(DrawCommand::Sticker(sticker));
                self.preview = Some(derive_preview(&self.tool, pos));
                self.notifier.notify();
            }
        }
    }

    fn pointer_left(&mut self) {
        self.preview = None;
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Idle => {}
            InteractionState::Drawing(stroke) => {
                // Leaving the canvas cancels the stroke.
                log::debug!("stroke discarded at {} points", stroke.points().len());
            }
            InteractionState::PlacingSticker(sticker) => {
                // Leaving finalizes sticker placement instead.
                self.history.commit(DrawCommand::Sticker(sticker));
            }
        }
        self.notifier.notify();
    }

    // ---- history commands ----

    pub fn undo(&mut self) {
        if self.history.undo() {
            log::debug!("undo ({} remaining)", self.history.document().len());
            self.notifier.notify();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            log::debug!("redo ({} total)", self.history.document().len());
            self.notifier.notify();
        }
    }

    /// Empty the display list, the redo stack, any gesture in progress and
    /// the preview.
    pub fn clear(&mut self) {
        log::info!("clear canvas");
        self.history.clear();
        self.state = InteractionState::Idle;
        self.preview = None;
        self.notifier.notify();
    }

    fn refresh_preview(&mut self) {
        if let Some(preview) = &self.preview {
            let pos = match preview {
                Preview::MarkerCircle { pos, .. } => *pos,
                Preview::Sticker { pos, .. } => *pos,
            };
            self.preview = Some(derive_preview(&self.tool, pos));
        }
    }
}

fn derive_preview(tool: &Tool, pos: Pos2) -> Preview {
    match tool {
        Tool::Marker { width, color } => Preview::MarkerCircle {
            pos,
            width: *width,
            color: *color,
        },
        Tool::Sticker(id) => Preview::Sticker {
            id: id.clone(),
            pos,
        },
    }
}
