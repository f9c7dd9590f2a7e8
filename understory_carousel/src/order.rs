// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring-to-slot projection used by looping carousels.
//!
//! A looping carousel never creates or destroys items. Instead every item is
//! given a display order (a flex `order`) relative to the current anchor:
//!
//! - the anchor takes slot 1,
//! - the item just before it (wrapping) takes slot 0, shown as a sliver at the
//!   leading edge,
//! - everything else follows in ring order from slot 2.
//!
//! ```rust
//! use understory_carousel::display_orders;
//!
//! // Four items, anchor on the last one.
//! let orders: Vec<usize> = display_orders(3, 4).collect();
//! assert_eq!(orders, [2, 3, 0, 1]);
//! ```

/// Display slot of item `index` when `anchor` is the current item.
///
/// For every `anchor < count` the values over `0..count` form a permutation of
/// `0..count`. Out-of-range arguments fall back to the identity order.
#[must_use]
pub fn display_order(index: usize, anchor: usize, count: usize) -> usize {
    if count <= 1 || index >= count || anchor >= count {
        return index;
    }
    let previous = if anchor == 0 { count - 1 } else { anchor - 1 };
    if index == anchor {
        1
    } else if index == previous {
        0
    } else if index > anchor {
        index - anchor + 1
    } else {
        count + index + 1 - anchor
    }
}

/// Display slots for items `0..count`, in logical order.
pub fn display_orders(anchor: usize, count: usize) -> impl Iterator<Item = usize> {
    (0..count).map(move |index| display_order(index, anchor, count))
}

/// Logical index of the item shown in display `slot`.
///
/// This is the inverse of [`display_order`].
#[must_use]
pub fn item_at_slot(slot: usize, anchor: usize, count: usize) -> usize {
    if count <= 1 || slot >= count || anchor >= count {
        return slot;
    }
    // Slot 0 holds `anchor - 1`, so slot `s` holds `anchor + s - 1` on the ring.
    (anchor + slot + count - 1) % count
}
