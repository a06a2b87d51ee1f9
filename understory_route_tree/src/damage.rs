// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary types published by link edits.

use kurbo::Rect;

/// Regions invalidated by geometry changes of a [`crate::Link`].
///
/// Each change records the link's bounding rectangle before and after the
/// edit. The rectangles may overlap and are not a minimal cover.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Scene-space rectangles that should be repainted.
    pub dirty_rects: alloc::vec::Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    pub(crate) fn record(&mut self, old: Rect, new: Rect) {
        for r in [old, new] {
            if self.dirty_rects.last() != Some(&r) {
                self.dirty_rects.push(r);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_skips_repeated_rects() {
        let mut damage = Damage::default();
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 20.0, 10.0);
        damage.record(a, b);
        damage.record(b, b);
        assert_eq!(damage.dirty_rects, [a, b]);
        assert_eq!(damage.union_rect(), Some(b));
    }
}
