use egui::{Color32, Pos2};
use std::sync::Arc;

// Immutable stroke for sharing between the display list and the redo stack
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

// Mutable stroke for the gesture in progress
#[derive(Debug, Clone)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Color32, width: f32, points: Vec<Pos2>) -> Self {
        debug_assert!(width > 0.0);
        debug_assert!(!points.is_empty());
        Self {
            points,
            color,
            width,
        }
    }

    pub fn new_ref(color: Color32, width: f32, points: Vec<Pos2>) -> StrokeRef {
        Arc::new(Self::new(color, width, points))
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

impl MutableStroke {
    /// Start a stroke from the pointer-down position.
    pub fn new(color: Color32, width: f32, origin: Pos2) -> Self {
        Self {
            points: vec![origin],
            color,
            width,
        }
    }

    /// Extend the stroke with the next pointer position.
    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Freeze into the immutable, shareable form for commit.
    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke {
            points: self.points,
            color: self.color,
            width: self.width,
        })
    }
}
