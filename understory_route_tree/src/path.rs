// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path modes: how a newly drawn segment bends between its two ends.

use kurbo::Point;

/// Shape of a segment drawn from a start point to an end point.
///
/// Every mode except [`PathMode::Straight`] routes through one intermediate
/// point, see [`PathMode::midpoint`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PathMode {
    /// A single straight segment.
    Straight,
    /// Vertical leg from the start, then horizontal leg to the end.
    #[default]
    VerticalThenHorizontal,
    /// Horizontal leg from the start, then vertical leg to the end.
    HorizontalThenVertical,
    /// 45° leg from the start, then an axis-aligned leg to the end.
    StraightThenOrthogonal,
    /// Axis-aligned leg from the start, then a 45° leg to the end.
    OrthogonalThenStraight,
}

impl PathMode {
    /// All modes, in [`PathMode::next`] order.
    pub const ALL: [Self; 5] = [
        Self::Straight,
        Self::VerticalThenHorizontal,
        Self::HorizontalThenVertical,
        Self::StraightThenOrthogonal,
        Self::OrthogonalThenStraight,
    ];

    /// The following mode, wrapping around after the last one.
    ///
    /// Editors commonly bind this to a key so the user can cycle through the
    /// modes while drawing.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Straight => Self::VerticalThenHorizontal,
            Self::VerticalThenHorizontal => Self::HorizontalThenVertical,
            Self::HorizontalThenVertical => Self::StraightThenOrthogonal,
            Self::StraightThenOrthogonal => Self::OrthogonalThenStraight,
            Self::OrthogonalThenStraight => Self::Straight,
        }
    }

    /// Intermediate point of a segment from `start` to `end`, if this mode
    /// bends.
    ///
    /// The diagonal modes put their 45° leg next to `start`
    /// ([`PathMode::StraightThenOrthogonal`]) or next to `end`
    /// ([`PathMode::OrthogonalThenStraight`]); the axis-aligned leg covers the
    /// rest of the longer direction.
    ///
    /// The result may coincide with `start` or `end` (for example when both
    /// ends are already aligned); callers collapse such points when the
    /// segment is committed.
    pub fn midpoint(self, start: Point, end: Point) -> Option<Point> {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let down = end.y > start.y;
        let right = end.x > start.x;
        match self {
            Self::Straight => None,
            Self::VerticalThenHorizontal => Some(Point::new(start.x, end.y)),
            Self::HorizontalThenVertical => Some(Point::new(end.x, start.y)),
            Self::StraightThenOrthogonal => Some(if dx < dy {
                Point::new(end.x, start.y + signed(dx, down))
            } else {
                Point::new(start.x + signed(dy, right), end.y)
            }),
            Self::OrthogonalThenStraight => Some(if dx <= dy {
                Point::new(start.x, end.y - signed(dx, down))
            } else {
                Point::new(end.x - signed(dy, right), start.y)
            }),
        }
    }
}

fn signed(v: f64, positive: bool) -> f64 {
    if positive { v } else { -v }
}

#[cfg(test)]
mod tests {
    use super::*;

    const O: Point = Point::new(0.0, 0.0);

    #[test]
    fn orthogonal_modes() {
        let end = Point::new(100.0, 100.0);
        assert_eq!(PathMode::Straight.midpoint(O, end), None);
        assert_eq!(
            PathMode::VerticalThenHorizontal.midpoint(O, end),
            Some(Point::new(0.0, 100.0))
        );
        assert_eq!(
            PathMode::HorizontalThenVertical.midpoint(O, end),
            Some(Point::new(100.0, 0.0))
        );
    }

    #[test]
    fn straight_then_orthogonal_puts_diagonal_first() {
        // Taller than wide: 45° leg covers dx, then vertical.
        assert_eq!(
            PathMode::StraightThenOrthogonal.midpoint(O, Point::new(30.0, 100.0)),
            Some(Point::new(30.0, 30.0))
        );
        assert_eq!(
            PathMode::StraightThenOrthogonal.midpoint(O, Point::new(-30.0, -100.0)),
            Some(Point::new(-30.0, -30.0))
        );
        // Wider than tall: 45° leg covers dy, then horizontal.
        assert_eq!(
            PathMode::StraightThenOrthogonal.midpoint(O, Point::new(100.0, -30.0)),
            Some(Point::new(30.0, -30.0))
        );
    }

    #[test]
    fn orthogonal_then_straight_puts_diagonal_last() {
        assert_eq!(
            PathMode::OrthogonalThenStraight.midpoint(O, Point::new(30.0, 100.0)),
            Some(Point::new(0.0, 70.0))
        );
        assert_eq!(
            PathMode::OrthogonalThenStraight.midpoint(O, Point::new(100.0, -30.0)),
            Some(Point::new(70.0, 0.0))
        );
        assert_eq!(
            PathMode::OrthogonalThenStraight.midpoint(O, Point::new(-100.0, 30.0)),
            Some(Point::new(-70.0, 0.0))
        );
    }

    #[test]
    fn diagonal_modes_on_exact_diagonal() {
        let end = Point::new(40.0, 40.0);
        // dx == dy: the whole segment is the 45° leg.
        assert_eq!(PathMode::StraightThenOrthogonal.midpoint(O, end), Some(end));
        assert_eq!(PathMode::OrthogonalThenStraight.midpoint(O, end), Some(O));
    }

    #[test]
    fn next_cycles_through_all_modes() {
        let mut mode = PathMode::Straight;
        for expected in PathMode::ALL.iter().skip(1) {
            mode = mode.next();
            assert_eq!(mode, *expected);
        }
        assert_eq!(mode.next(), PathMode::Straight);
    }
}
