use egui::{Color32, Pos2, pos2};
use sketchpad::command::DrawCommand;
use sketchpad::editor::{Editor, InteractionState, Preview};
use sketchpad::input::PointerEvent;
use sketchpad::renderer;
use sketchpad::sticker::StickerId;
use sketchpad::surface::CanvasSurface;
use sketchpad::tools::Tool;

/// Test double that records what the render pipeline asked for.
#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    strokes: Vec<(Vec<Pos2>, f32, Color32)>,
    stickers: Vec<(StickerId, Pos2)>,
    preview_circles: Vec<Pos2>,
    preview_stickers: Vec<(StickerId, Pos2)>,
}

impl CanvasSurface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn stroke_path(&mut self, points: &[Pos2], width: f32, color: Color32) {
        // Same visibility rule as the real surfaces.
        if points.len() < 2 {
            return;
        }
        self.strokes.push((points.to_vec(), width, color));
    }

    fn sticker(&mut self, id: &StickerId, pos: Pos2) {
        self.stickers.push((id.clone(), pos));
    }

    fn preview_circle(&mut self, pos: Pos2, _width: f32, _color: Color32) {
        self.preview_circles.push(pos);
    }

    fn preview_sticker(&mut self, id: &StickerId, pos: Pos2) {
        self.preview_stickers.push((id.clone(), pos));
    }
}

fn render_to_recorder(editor: &Editor) -> RecordingSurface {
    let mut surface = RecordingSurface::default();
    renderer::render(&editor.scene(), &mut surface);
    surface
}

#[test]
fn drag_gesture_commits_a_stroke_with_all_points() {
    let mut editor = Editor::with_tool(Tool::marker(4.0, Color32::BLACK));
    editor.handle_event(PointerEvent::Down(pos2(10.0, 10.0)));
    editor.handle_event(PointerEvent::Moved(pos2(20.0, 10.0)));
    editor.handle_event(PointerEvent::Released(pos2(20.0, 10.0)));

    let commands = editor.history().document().commands();
    assert_eq!(commands.len(), 1);
    match &commands[0] {
        DrawCommand::Stroke(stroke) => {
            assert_eq!(stroke.points(), &[pos2(10.0, 10.0), pos2(20.0, 10.0)]);
            assert_eq!(stroke.width(), 4.0);
        }
        other => panic!("expected a stroke, got {other:?}"),
    }
    assert!(editor.state().is_idle());
}

#[test]
fn plain_click_commits_an_invisible_single_point_stroke() {
    let mut editor = Editor::new();
    editor.handle_event(PointerEvent::Down(pos2(5.0, 5.0)));
    editor.handle_event(PointerEvent::Released(pos2(5.0, 5.0)));

    // It occupies an undo slot...
    assert_eq!(editor.history().document().len(), 1);
    // ...but renders zero visible marks.
    let surface = render_to_recorder(&editor);
    assert!(surface.strokes.is_empty());
}

#[test]
fn leaving_the_canvas_cancels_the_stroke() {
    let mut editor = Editor::new();
    editor.handle_event(PointerEvent::Down(pos2(10.0, 10.0)));
    editor.handle_event(PointerEvent::Moved(pos2(30.0, 30.0)));
    editor.handle_event(PointerEvent::Left);

    assert!(editor.history().document().is_empty());
    assert!(editor.state().is_idle());
}

#[test]
fn pressing_with_a_sticker_tool_places_nothing() {
    let mut editor = Editor::with_tool(Tool::sticker(StickerId::new("star")));
    editor.handle_event(PointerEvent::Down(pos2(50.0, 50.0)));

    // Placement begins on the click, not the press.
    assert!(editor.state().is_idle());
    assert!(editor.history().document().is_empty());
    let surface = render_to_recorder(&editor);
    assert!(surface.stickers.is_empty());
}

// Select "star", click at (50,50), drag to (60,60), leave the canvas: the
// sticker follows the drag and the leave finalizes it, unlike strokes.
#[test]
fn sticker_placement_drags_and_commits_on_leave() {
    let mut editor = Editor::with_tool(Tool::sticker(StickerId::new("star")));
    editor.handle_event(PointerEvent::Down(pos2(50.0, 50.0)));
    editor.handle_event(PointerEvent::Released(pos2(50.0, 50.0)));

    // The click placed the sticker but committed nothing yet.
    assert!(matches!(editor.state(), InteractionState::PlacingSticker(_)));
    assert!(editor.history().document().is_empty());

    editor.handle_event(PointerEvent::Moved(pos2(60.0, 60.0)));
    editor.handle_event(PointerEvent::Left);

    let commands = editor.history().document().commands();
    assert_eq!(commands.len(), 1);
    match &commands[0] {
        DrawCommand::Sticker(sticker) => {
            assert_eq!(sticker.id(), &StickerId::new("star"));
            assert_eq!(sticker.pos(), pos2(60.0, 60.0));
        }
        other => panic!("expected a sticker, got {other:?}"),
    }
    assert!(editor.state().is_idle());
}

#[test]
fn sticker_placement_commits_on_the_next_release() {
    let mut editor = Editor::with_tool(Tool::sticker(StickerId::new("heart")));
    editor.handle_event(PointerEvent::Down(pos2(30.0, 40.0)));
    editor.handle_event(PointerEvent::Released(pos2(30.0, 40.0)));
    editor.handle_event(PointerEvent::Moved(pos2(35.0, 45.0)));
    // Press is still a no-op mid-placement; its release commits.
    editor.handle_event(PointerEvent::Down(pos2(35.0, 45.0)));
    editor.handle_event(PointerEvent::Released(pos2(35.0, 45.0)));

    let commands = editor.history().document().commands();
    assert_eq!(commands.len(), 1);
    assert!(matches!(&commands[0], DrawCommand::Sticker(s) if s.pos() == pos2(35.0, 45.0)));
}

#[test]
fn in_progress_sticker_is_visible_before_commit() {
    let mut editor = Editor::with_tool(Tool::sticker(StickerId::new("star")));
    editor.handle_event(PointerEvent::Down(pos2(50.0, 50.0)));
    editor.handle_event(PointerEvent::Released(pos2(50.0, 50.0)));

    let surface = render_to_recorder(&editor);
    assert_eq!(surface.stickers, vec![(StickerId::new("star"), pos2(50.0, 50.0))]);
    assert!(editor.history().document().is_empty());
}

#[test]
fn preview_follows_the_idle_pointer_and_matches_the_tool() {
    let mut editor = Editor::with_tool(Tool::marker(6.0, Color32::RED));
    assert!(editor.preview().is_none()); // nothing before the first move

    editor.handle_event(PointerEvent::Moved(pos2(12.0, 34.0)));
    assert_eq!(
        editor.preview(),
        Some(&Preview::MarkerCircle {
            pos: pos2(12.0, 34.0),
            width: 6.0,
            color: Color32::RED,
        })
    );

    // Switching tools re-derives the preview at the same spot.
    editor.select_sticker(StickerId::new("smiley"));
    assert_eq!(
        editor.preview(),
        Some(&Preview::Sticker {
            id: StickerId::new("smiley"),
            pos: pos2(12.0, 34.0),
        })
    );
}

#[test]
fn preview_follows_the_pointer_to_the_release_point_after_a_commit() {
    let mut editor = Editor::with_tool(Tool::marker(4.0, Color32::BLACK));
    editor.handle_event(PointerEvent::Moved(pos2(2.0, 2.0)));
    editor.handle_event(PointerEvent::Down(pos2(2.0, 2.0)));
    editor.handle_event(PointerEvent::Moved(pos2(30.0, 30.0)));
    editor.handle_event(PointerEvent::Released(pos2(30.0, 30.0)));

    // The ghost cursor sits where the drag ended, not where it started.
    assert_eq!(
        editor.preview(),
        Some(&Preview::MarkerCircle {
            pos: pos2(30.0, 30.0),
            width: 4.0,
            color: Color32::BLACK,
        })
    );
}

#[test]
fn preview_is_suppressed_while_drawing() {
    let mut editor = Editor::new();
    editor.handle_event(PointerEvent::Moved(pos2(5.0, 5.0)));
    editor.handle_event(PointerEvent::Down(pos2(5.0, 5.0)));
    editor.handle_event(PointerEvent::Moved(pos2(9.0, 9.0)));

    assert!(matches!(editor.state(), InteractionState::Drawing(_)));
    let surface = render_to_recorder(&editor);
    assert!(surface.preview_circles.is_empty());
    assert!(surface.preview_stickers.is_empty());
}

#[test]
fn render_replays_display_list_in_order_after_every_change() {
    let mut editor = Editor::new();
    editor.handle_event(PointerEvent::Down(pos2(0.0, 0.0)));
    editor.handle_event(PointerEvent::Moved(pos2(10.0, 0.0)));
    editor.handle_event(PointerEvent::Released(pos2(10.0, 0.0)));

    editor.select_sticker(StickerId::new("star"));
    editor.handle_event(PointerEvent::Down(pos2(20.0, 20.0)));
    editor.handle_event(PointerEvent::Released(pos2(20.0, 20.0)));
    editor.handle_event(PointerEvent::Down(pos2(20.0, 20.0)));
    editor.handle_event(PointerEvent::Released(pos2(20.0, 20.0)));

    let surface = render_to_recorder(&editor);
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.strokes.len(), 1);
    assert_eq!(surface.stickers.len(), 1);
}

#[test]
fn clear_resets_document_redo_gesture_and_preview() {
    let mut editor = Editor::new();
    editor.handle_event(PointerEvent::Down(pos2(0.0, 0.0)));
    editor.handle_event(PointerEvent::Moved(pos2(5.0, 5.0)));
    editor.handle_event(PointerEvent::Released(pos2(5.0, 5.0)));
    editor.undo();

    // Start another gesture, then clear mid-drag.
    editor.handle_event(PointerEvent::Down(pos2(1.0, 1.0)));
    editor.clear();

    assert!(editor.history().document().is_empty());
    assert!(!editor.history().can_redo());
    assert!(editor.state().is_idle());
    assert!(editor.preview().is_none());
}

#[test]
fn undo_then_redo_restores_the_committed_scene() {
    let mut editor = Editor::new();
    editor.handle_event(PointerEvent::Down(pos2(0.0, 0.0)));
    editor.handle_event(PointerEvent::Moved(pos2(10.0, 10.0)));
    editor.handle_event(PointerEvent::Released(pos2(10.0, 10.0)));
    let before = editor.history().document().commands().to_vec();

    editor.undo();
    assert!(editor.history().document().is_empty());
    editor.redo();
    assert_eq!(editor.history().document().commands(), &before[..]);
}

#[test]
fn changed_signal_fires_on_every_visible_mutation() {
    use std::cell::Cell;
    use std::rc::Rc;

    let count = Rc::new(Cell::new(0usize));
    let seen = count.clone();
    let mut editor = Editor::new();
    editor.subscribe(move || seen.set(seen.get() + 1));

    editor.handle_event(PointerEvent::Down(pos2(0.0, 0.0)));
    editor.handle_event(PointerEvent::Moved(pos2(1.0, 1.0)));
    editor.handle_event(PointerEvent::Released(pos2(1.0, 1.0)));
    editor.undo();
    editor.redo();
    editor.clear();

    assert_eq!(count.get(), 6);
}
