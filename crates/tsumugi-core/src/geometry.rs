//! Geometric primitives for drop-target hit testing.
//!
//! Pure functions over pixel-space points and rectangles. The drag
//! controller feeds pointer positions and registered target rectangles
//! through [`nearest`] on every move tick.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates (origin at top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Midpoint of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Vertical midline, used to split a target into above/below halves.
    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// The candidate whose center is closest to `point`.
///
/// Ties keep the first-seen candidate (stable reduce over encounter order),
/// so the result is deterministic for a fixed input slice. Returns `None`
/// only for an empty slice.
pub fn nearest<I: Copy>(point: Point, candidates: &[(I, Rect)]) -> Option<I> {
    let mut best: Option<(I, f64)> = None;
    for (id, rect) in candidates {
        let d = distance(point, rect.center());
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((*id, d)),
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn center_is_the_midpoint() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center(), Point::new(60.0, 40.0));
        assert_eq!(rect.mid_y(), 40.0);
    }

    #[rstest]
    #[case::same_point(Point::new(3.0, 4.0), Point::new(3.0, 4.0), 0.0)]
    #[case::axis_aligned(Point::new(0.0, 0.0), Point::new(0.0, 5.0), 5.0)]
    #[case::pythagorean(Point::new(0.0, 0.0), Point::new(3.0, 4.0), 5.0)]
    fn distance_is_euclidean(#[case] a: Point, #[case] b: Point, #[case] expected: f64) {
        assert_eq!(distance(a, b), expected);
    }

    #[test]
    fn nearest_picks_the_closest_center() {
        let candidates = [
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),   // center (5, 5)
            ("b", Rect::new(0.0, 100.0, 10.0, 10.0)), // center (5, 105)
        ];

        assert_eq!(nearest(Point::new(4.0, 8.0), &candidates), Some("a"));
        assert_eq!(nearest(Point::new(4.0, 90.0), &candidates), Some("b"));
    }

    #[test]
    fn nearest_of_empty_slice_is_none() {
        let candidates: [(&str, Rect); 0] = [];
        assert_eq!(nearest(Point::new(0.0, 0.0), &candidates), None);
    }

    #[test]
    fn ties_keep_the_first_seen_candidate() {
        // Two targets mirrored around the pointer: equal distances.
        let candidates = [
            ("first", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("second", Rect::new(10.0, 0.0, 10.0, 10.0)),
        ];

        assert_eq!(nearest(Point::new(10.0, 5.0), &candidates), Some("first"));
    }

    #[test]
    fn nearest_is_deterministic_across_calls() {
        let candidates = [
            (1u8, Rect::new(0.0, 0.0, 20.0, 20.0)),
            (2u8, Rect::new(0.0, 30.0, 20.0, 20.0)),
            (3u8, Rect::new(0.0, 60.0, 20.0, 20.0)),
        ];
        let point = Point::new(10.0, 41.0);

        let first = nearest(point, &candidates);
        for _ in 0..10 {
            assert_eq!(nearest(point, &candidates), first);
        }
    }
}
