// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment-level geometry used by the route queries.
//!
//! These helpers work on plain points and never produce NaN: zero-length and
//! vertical segments take explicit branches instead of dividing by zero.

use kurbo::{Point, Rect};

use crate::types::LineHit;

/// Test whether `point` lies on the segment `p1`–`p2`.
///
/// - A point outside the segment's (inclusive) bounding box never matches.
/// - A point equal to `p1` or `p2` reports [`LineHit::Start`] or
///   [`LineHit::End`].
/// - For a vertical segment the horizontal offset is compared against
///   `epsilon`; otherwise the vertical offset from the segment's line.
///
/// Membership does not depend on the order of `p1` and `p2`; swapping them
/// only swaps `Start` and `End`.
pub fn belongs_to_line(p1: Point, p2: Point, point: Point, epsilon: f64) -> Option<LineHit> {
    if !contains_inclusive(Rect::from_points(p1, p2), point) {
        return None;
    }
    if point == p1 {
        return Some(LineHit::Start);
    }
    if point == p2 {
        return Some(LineHit::End);
    }
    let off = match line_equation(p1, p2) {
        None => (point.x - p1.x).abs(),
        Some((slope, intercept)) => (point.y - (slope * point.x + intercept)).abs(),
    };
    (off <= epsilon).then_some(LineHit::Interior)
}

/// Test whether the segment `p1`–`p2` passes through `rect`.
///
/// This is [`belongs_to_line`] with the tolerance taken from the rectangle:
/// the segment matches when its line passes within half the rectangle's
/// width and height of the rectangle's center. Endpoints inside the
/// rectangle report [`LineHit::Start`] or [`LineHit::End`].
pub fn line_crosses_rect(p1: Point, p2: Point, rect: Rect) -> Option<LineHit> {
    let rect = rect.abs();
    let center = rect.center();
    let (hw, hh) = (rect.width() / 2.0, rect.height() / 2.0);
    if !contains_inclusive(Rect::from_points(p1, p2).inflate(hw, hh), center) {
        return None;
    }
    if contains_inclusive(rect, p1) {
        return Some(LineHit::Start);
    }
    if contains_inclusive(rect, p2) {
        return Some(LineHit::End);
    }
    let crosses = match line_equation(p1, p2) {
        None => (center.x - p1.x).abs() <= hw,
        Some((slope, intercept)) => {
            (center.y - (slope * center.x + intercept)).abs() <= hh + slope.abs() * hw
        }
    };
    crosses.then_some(LineHit::Interior)
}

/// Closest point to `pos` on the segment `p1`–`p2`.
///
/// `pos` is projected perpendicularly onto the segment's line; when the
/// projection falls outside the segment, the nearer endpoint is returned.
pub fn nearest_on_segment(p1: Point, p2: Point, pos: Point) -> Point {
    let d = p2 - p1;
    let len_sq = d.hypot2();
    if len_sq == 0.0 {
        return p1;
    }
    let t = (pos - p1).dot(d) / len_sq;
    if (0.0..=1.0).contains(&t) {
        p1 + d * t
    } else if pos.distance_squared(p1) <= pos.distance_squared(p2) {
        p1
    } else {
        p2
    }
}

/// Slope and intercept of the line through `p1` and `p2`, or `None` when the
/// line is vertical.
///
/// The intercept is averaged over both points so the result is the same for
/// either point order.
fn line_equation(p1: Point, p2: Point) -> Option<(f64, f64)> {
    if p1.x == p2.x {
        return None;
    }
    let slope = (p2.y - p1.y) / (p2.x - p1.x);
    let intercept = ((p1.y + p2.y) - slope * (p1.x + p2.x)) / 2.0;
    Some((slope, intercept))
}

/// Like [`Rect::contains`] but inclusive of the far edges.
fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
