//! Flip permissions for the anchor solver.

use bitflags::bitflags;
use tracing::warn;

use crate::geom::Axis;

bitflags! {
    /// Per-axis permission to try the mirrored anchor pair when the primary
    /// placement overflows the work area.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FlipHints: u32 {
        /// Allow flipping left/right.
        const FLIP_X = 1 << 0;
        /// Allow flipping top/bottom.
        const FLIP_Y = 1 << 1;
        /// Allow flipping on both axes.
        const FLIP = Self::FLIP_X.bits() | Self::FLIP_Y.bits();
    }
}

impl FlipHints {
    /// Decode raw bits, dropping (and logging) anything undefined.
    #[must_use]
    pub fn from_bits_lossy(bits: u32) -> Self {
        let hints = Self::from_bits_truncate(bits);
        if hints.bits() != bits {
            warn!(
                bits = %format_args!("{bits:#x}"),
                kept = %format_args!("{:#x}", hints.bits()),
                "flip hints: ignoring unknown bits"
            );
        }
        hints
    }

    /// Hints built from per-axis booleans.
    #[must_use]
    pub fn from_axes(flip_x: bool, flip_y: bool) -> Self {
        let mut hints = Self::empty();
        hints.set(Self::FLIP_X, flip_x);
        hints.set(Self::FLIP_Y, flip_y);
        hints
    }

    /// Whether flipping is allowed on `axis`.
    #[inline]
    #[must_use]
    pub const fn allows(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.contains(Self::FLIP_X),
            Axis::Y => self.contains(Self::FLIP_Y),
        }
    }
}
