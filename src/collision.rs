/// Axis-aligned bounding boxes.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Index of the first target in `targets` that `probe` overlaps.
///
/// Iteration order decides ties, so callers get "first match wins".
pub fn first_hit<I>(probe: &Rect, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Rect)>,
{
    targets
        .into_iter()
        .find(|(_, target)| intersects(probe, target))
        .map(|(i, _)| i)
}
