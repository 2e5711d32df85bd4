use serde::{Deserialize, Serialize};

/// A caret position: the path of a text leaf plus a character offset into it.
///
/// Ordering is document order (path first, then offset).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub path: Vec<usize>,
    pub offset: usize,
}

#[cfg(test)]
impl Point {
    pub fn new(path: Vec<usize>, offset: usize) -> Self {
        Self { path, offset }
    }
}

/// An editor selection. `anchor` may come after `focus` (backwards selection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

#[cfg(test)]
impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// A selection spanning `start..end` characters of a single leaf.
    pub fn within(path: Vec<usize>, start: usize, end: usize) -> Self {
        Self::new(Point::new(path.clone(), start), Point::new(path, end))
    }
}

impl Range {
    /// `(start, end)` in document order.
    pub fn edges(&self) -> (&Point, &Point) {
        if self.anchor <= self.focus {
            (&self.anchor, &self.focus)
        } else {
            (&self.focus, &self.anchor)
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}
