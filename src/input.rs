use egui::{Pos2, Response};

/// Pointer events over the canvas, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed on the canvas.
    Down(Pos2),
    /// Pointer moved while over the canvas (pressed or not).
    Moved(Pos2),
    /// Primary button released over the canvas.
    Released(Pos2),
    /// Pointer left the canvas area.
    Left,
}

/// Translates raw egui pointer state for the canvas region into
/// [`PointerEvent`]s, tracking the last known position to synthesize leave
/// events.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self { last_pos: None }
    }

    /// Process one frame's input for the canvas `Response`.
    pub fn process(&mut self, response: &Response) -> Vec<PointerEvent> {
        let rect = response.rect;
        let mut events = Vec::new();

        let (hover, pressed, released) = response.ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });

        match hover {
            Some(pos) if rect.contains(pos) => {
                let local = (pos - rect.min).to_pos2();
                if self.last_pos != Some(local) {
                    events.push(PointerEvent::Moved(local));
                }
                if pressed {
                    events.push(PointerEvent::Down(local));
                }
                if released {
                    events.push(PointerEvent::Released(local));
                }
                self.last_pos = Some(local);
            }
            _ => {
                // Outside the canvas (or the window). One leave event per
                // crossing.
                if self.last_pos.take().is_some() {
                    events.push(PointerEvent::Left);
                }
            }
        }

        events
    }
}
