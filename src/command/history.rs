use crate::command::DrawCommand;
use crate::document::Document;

/// Owns the display list and the redo stack; the only writer of either.
///
/// Undo pops from the document tail onto the redo stack and redo pushes
/// back, so the two are exact inverses as long as no commit intervenes.
#[derive(Debug, Default)]
pub struct CommandHistory {
    document: Document,
    redo_stack: Vec<DrawCommand>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Append a finished command to the display list. Any new commit
    /// invalidates the redo history: redo is linear, never branching.
    pub fn commit(&mut self, command: DrawCommand) {
        log::debug!("commit: {:?}", command);
        self.document.push(command);
        self.redo_stack.clear();
    }

    /// Move the newest command onto the redo stack. No-op when the display
    /// list is empty; returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.document.pop() {
            Some(command) => {
                self.redo_stack.push(command);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone command. No-op when the redo stack
    /// is empty; clears nothing else.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(command) => {
                self.document.push(command);
                true
            }
            None => false,
        }
    }

    /// Empty the display list and the redo stack.
    pub fn clear(&mut self) {
        self.document.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.document.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Stroke;
    use egui::{Color32, pos2};

    fn stroke(x: f32) -> DrawCommand {
        DrawCommand::Stroke(Stroke::new_ref(
            Color32::BLACK,
            4.0,
            vec![pos2(x, 0.0), pos2(x, 10.0)],
        ))
    }

    #[test]
    fn undo_then_redo_restores_the_display_list() {
        let mut history = CommandHistory::new();
        history.commit(stroke(1.0));
        history.commit(stroke(2.0));
        let before: Vec<_> = history.document().commands().to_vec();

        assert!(history.undo());
        assert!(history.redo());
        assert_eq!(history.document().commands(), &before[..]);
    }

    #[test]
    fn undo_and_redo_on_empty_stacks_are_noops() {
        let mut history = CommandHistory::new();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn commit_after_undo_drops_the_redo_history() {
        let mut history = CommandHistory::new();
        history.commit(stroke(1.0));
        history.undo();
        assert!(history.can_redo());

        history.commit(stroke(2.0));
        assert!(!history.can_redo());
        assert_eq!(history.document().len(), 1);
    }
}
