// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal strip geometry: per-item widths, prefix offsets and the visible window.

use alloc::vec::Vec;

/// Slack applied to visibility checks so sub-pixel rounding from the host does
/// not drop an item that is flush with a viewport edge.
const VISIBILITY_EPSILON: f64 = 0.5;

/// Inclusive range of items that are fully inside the viewport.
///
/// In looping mode `left` and `right` are logical indices of the first and last
/// visible display slots, so `left > right` is possible when the window wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleWindow {
    /// First visible index.
    pub left: usize,
    /// Last visible index.
    pub right: usize,
    /// Number of visible items.
    pub count: usize,
}

impl VisibleWindow {
    /// A window holding exactly one item.
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            left: index,
            right: index,
            count: 1,
        }
    }
}

/// Measured widths of a row of items, with the start offset of each item.
///
/// Offsets are recomputed eagerly in [`ItemStrip::rebuild`]; every query after
/// that is a lookup or a binary search.
#[derive(Clone, Default, Debug)]
pub struct ItemStrip {
    extents: Vec<f64>,
    starts: Vec<f64>,
    total: f64,
}

impl ItemStrip {
    /// Creates an empty strip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all widths, in strip order.
    ///
    /// Negative widths are clamped to zero.
    pub fn rebuild<I>(&mut self, extents: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.extents.clear();
        self.starts.clear();
        let mut pos = 0.0;
        for extent in extents {
            debug_assert!(
                extent.is_finite(),
                "ItemStrip extents must be finite; got {extent:?}"
            );
            let extent = if extent.is_sign_negative() { 0.0 } else { extent };
            self.starts.push(pos);
            self.extents.push(extent);
            pos += extent;
        }
        self.total = pos;
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Returns `true` if the strip holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Width of `index`, or zero when out of range.
    #[must_use]
    pub fn extent_of(&self, index: usize) -> f64 {
        self.extents.get(index).copied().unwrap_or(0.0)
    }

    /// Distance from the start of the strip to the start of `index`.
    ///
    /// Indices past the end report the total extent.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        self.starts.get(index).copied().unwrap_or(self.total)
    }

    /// Sum of all widths.
    #[must_use]
    pub const fn total_extent(&self) -> f64 {
        self.total
    }

    /// Index of the item covering `offset`, clamped into `0..len`.
    #[must_use]
    pub fn index_at_offset(&self, offset: f64) -> usize {
        if self.starts.is_empty() {
            return 0;
        }
        let target = offset.max(0.0);
        let index = match self
            .starts
            .binary_search_by(|pos| pos.partial_cmp(&target).unwrap_or(core::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        index.min(self.starts.len() - 1)
    }

    /// Largest scroll distance that still keeps the viewport inside the content.
    #[must_use]
    pub fn max_scroll(&self, viewport_extent: f64) -> f64 {
        (self.total - viewport_extent).max(0.0)
    }
}

/// Computes which items lie entirely within `[scroll, scroll + viewport_extent]`.
///
/// Returns `None` if the strip is empty or the viewport has no extent. When no
/// item fits completely (an item wider than the viewport), the item under the
/// viewport's leading edge is reported as a single-item window.
pub fn compute_visible_window(
    strip: &ItemStrip,
    scroll: f64,
    viewport_extent: f64,
) -> Option<VisibleWindow> {
    let len = strip.len();
    if len == 0 || viewport_extent.is_nan() || viewport_extent <= 0.0 || !scroll.is_finite() {
        return None;
    }

    let view_start = scroll.max(0.0);
    let view_end = view_start + viewport_extent;

    let first = strip.index_at_offset(view_start);
    let mut window: Option<VisibleWindow> = None;
    for index in first..len {
        let start = strip.offset_of(index);
        if start > view_end + VISIBILITY_EPSILON {
            break;
        }
        let end = start + strip.extent_of(index);
        if start + VISIBILITY_EPSILON >= view_start && end <= view_end + VISIBILITY_EPSILON {
            window = Some(match window {
                None => VisibleWindow::single(index),
                Some(w) => VisibleWindow {
                    left: w.left,
                    right: index,
                    count: w.count + 1,
                },
            });
        }
    }

    Some(window.unwrap_or(VisibleWindow::single(first)))
}

#[cfg(test)]
mod tests {
    use super::{ItemStrip, VISIBILITY_EPSILON, VisibleWindow, compute_visible_window};

    fn strip(extents: &[f64]) -> ItemStrip {
        let mut strip = ItemStrip::new();
        strip.rebuild(extents.iter().copied());
        strip
    }

    #[test]
    fn offsets_are_prefix_sums() {
        let strip = strip(&[100.0, 50.0, 150.0]);
        assert_eq!(strip.len(), 3);
        assert_eq!(strip.offset_of(0), 0.0);
        assert_eq!(strip.offset_of(1), 100.0);
        assert_eq!(strip.offset_of(2), 150.0);
        assert_eq!(strip.offset_of(3), 300.0);
        assert_eq!(strip.total_extent(), 300.0);
        assert_eq!(strip.extent_of(7), 0.0);
    }

    #[test]
    fn index_lookup_clamps_to_last_item() {
        let strip = strip(&[10.0, 10.0, 10.0]);
        assert_eq!(strip.index_at_offset(-5.0), 0);
        assert_eq!(strip.index_at_offset(9.9), 0);
        assert_eq!(strip.index_at_offset(10.0), 1);
        assert_eq!(strip.index_at_offset(500.0), 2);
    }

    #[test]
    fn negative_widths_are_clamped() {
        let strip = strip(&[-5.0, 10.0]);
        assert_eq!(strip.extent_of(0), 0.0);
        assert_eq!(strip.offset_of(1), 0.0);
        assert_eq!(strip.total_extent(), 10.0);
    }

    #[test]
    fn subpixel_overflow_still_counts_as_visible() {
        let strip = strip(&[100.0, 100.0, 100.0]);
        let overflow = VISIBILITY_EPSILON / 2.0;
        assert_eq!(
            compute_visible_window(&strip, 0.0, 200.0 - overflow),
            Some(VisibleWindow {
                left: 0,
                right: 1,
                count: 2
            })
        );
        assert_eq!(
            compute_visible_window(&strip, 0.0, 200.0 - 2.0 * VISIBILITY_EPSILON),
            Some(VisibleWindow::single(0))
        );
    }

    #[test]
    fn window_holds_only_fully_visible_items() {
        let strip = strip(&[100.0; 5]);
        assert_eq!(
            compute_visible_window(&strip, 0.0, 200.0),
            Some(VisibleWindow {
                left: 0,
                right: 1,
                count: 2
            })
        );
        // Half of item 0 and half of item 2 are cut off.
        assert_eq!(
            compute_visible_window(&strip, 50.0, 200.0),
            Some(VisibleWindow::single(1))
        );
        assert_eq!(
            compute_visible_window(&strip, 300.0, 200.0),
            Some(VisibleWindow {
                left: 3,
                right: 4,
                count: 2
            })
        );
    }

    #[test]
    fn non_uniform_widths() {
        let strip = strip(&[80.0, 120.0, 60.0, 200.0]);
        // Viewport 0..260 holds items 0, 1 and 2.
        let window = compute_visible_window(&strip, 0.0, 260.0).unwrap();
        assert_eq!((window.left, window.right, window.count), (0, 2, 3));
        // Viewport 200..460 holds items 2 and 3.
        let window = compute_visible_window(&strip, 200.0, 260.0).unwrap();
        assert_eq!((window.left, window.right, window.count), (2, 3, 2));
    }

    #[test]
    fn oversized_item_is_reported_alone() {
        let strip = strip(&[500.0, 500.0]);
        assert_eq!(
            compute_visible_window(&strip, 0.0, 200.0),
            Some(VisibleWindow::single(0))
        );
    }

    #[test]
    fn degenerate_geometry_yields_no_window() {
        assert_eq!(compute_visible_window(&ItemStrip::new(), 0.0, 200.0), None);
        let strip = strip(&[100.0, 100.0]);
        assert_eq!(compute_visible_window(&strip, 0.0, 0.0), None);
        assert_eq!(compute_visible_window(&strip, f64::NAN, 100.0), None);
        assert_eq!(strip.max_scroll(150.0), 50.0);
        assert_eq!(strip.max_scroll(500.0), 0.0);
    }
}
