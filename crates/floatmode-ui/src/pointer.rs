//! Pointer events delivered to the drag handle.

use floatmode_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer event on the drag handle region.
///
/// `position` is local to the handle; `global_position` is in absolute (raw)
/// coordinates, which is what drag offsets are computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub global_position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, global_position: Point) -> Self {
        Self {
            kind,
            position,
            global_position,
        }
    }

    /// Event with identical local and global coordinates.
    pub fn at(kind: PointerEventKind, global_position: Point) -> Self {
        Self::new(kind, global_position, global_position)
    }
}
