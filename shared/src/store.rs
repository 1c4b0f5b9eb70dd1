use crate::shape::Shape;

/// Ordered annotation list. A shape's index is its identity: badge number
/// `index + 1`, and the key used for note edits and deletes. Removing a shape
/// renumbers everything after it.
///
/// Out-of-range indices are ignored rather than reported; the UI only ever
/// passes back indices it has just displayed.
#[derive(Clone, Debug, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn remove_last(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Shape> {
        if index >= self.shapes.len() {
            return None;
        }
        Some(self.shapes.remove(index))
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn set_note(&mut self, index: usize, text: &str) -> bool {
        match self.shapes.get_mut(index) {
            Some(shape) => {
                shape.note = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn all(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
