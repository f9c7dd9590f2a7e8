// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons a geometry update is rejected.

/// Why [`CarouselContainer`](crate::CarouselContainer) kept its previous layout.
///
/// None of these reach the embedding context as failures; they are logged and
/// the next resize or settle pass tries again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// There are no items to lay out.
    #[error("carousel has no items")]
    NoItems,
    /// The viewport width is missing, zero or not finite.
    #[error("viewport has no usable width")]
    ViewportUnavailable,
    /// An item width is missing, zero or not finite.
    #[error("item {index} has no usable width")]
    ItemUnavailable {
        /// Logical index of the item.
        index: usize,
    },
}
