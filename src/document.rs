use crate::command::DrawCommand;

/// The display list: the ordered sequence of committed draw commands.
///
/// Insertion order is render order is z-order. Every entry is fully
/// constructed; gestures in progress live in the editor until commit.
#[derive(Debug, Default)]
pub struct Document {
    commands: Vec<DrawCommand>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Remove and return the most recent command (undo's pop-from-tail).
    pub fn pop(&mut self) -> Option<DrawCommand> {
        self.commands.pop()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
