/// Minimum horizontal travel, in screen units, for a drag to count as a swipe.
pub(crate) const SWIPE_THRESHOLD: i32 = 50;

// Approximate size of one terminal cell in screen units.
const CELL_WIDTH: i32 = 8;
const CELL_HEIGHT: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Point {
    pub(crate) const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Screen position of a terminal cell.
    pub(crate) fn from_cell(column: u16, row: u16) -> Self {
        Self::new(i32::from(column) * CELL_WIDTH, i32::from(row) * CELL_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwipeIntent {
    Left,
    Right,
    None,
}

/// Classify a drag from `start` to `end`.
///
/// Only horizontal-dominant drags longer than [`SWIPE_THRESHOLD`] count.
pub(crate) fn swipe_intent(start: Point, end: Point) -> SwipeIntent {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    if dx.abs() <= dy.abs() {
        return SwipeIntent::None;
    }
    if dx > SWIPE_THRESHOLD {
        SwipeIntent::Right
    } else if dx < -SWIPE_THRESHOLD {
        SwipeIntent::Left
    } else {
        SwipeIntent::None
    }
}
