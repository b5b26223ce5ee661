//! Placement results.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geom::{Point, Rect, Size};

/// Outcome of a solve: final coordinates, the displacement applied to keep
/// the window inside the work area, and whether each axis flipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Final x-coordinate of the window's outer top-left corner.
    pub x: i32,
    /// Final y-coordinate of the window's outer top-left corner.
    pub y: i32,
    /// Horizontal displacement applied by clamping (`x - ideal_x`).
    pub offset_x: i32,
    /// Vertical displacement applied by clamping (`y - ideal_y`).
    pub offset_y: i32,
    /// The horizontal axis used the mirrored anchor pair.
    pub flipped_x: bool,
    /// The vertical axis used the mirrored anchor pair.
    pub flipped_y: bool,
}

impl Placement {
    /// Final position.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Position before clamping.
    #[must_use]
    pub const fn ideal(&self) -> Point {
        Point::new(self.x - self.offset_x, self.y - self.offset_y)
    }

    /// Whether clamping moved the window on either axis.
    #[must_use]
    pub const fn clamped(&self) -> bool {
        self.offset_x != 0 || self.offset_y != 0
    }

    /// Outer window frame at the final position.
    #[must_use]
    pub const fn frame(&self, size: Size) -> Rect {
        Rect::new(self.x, self.y, size.width, size.height)
    }
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "pos=({},{}) offset=({},{}) flipped=({},{})",
            self.x, self.y, self.offset_x, self.offset_y, self.flipped_x, self.flipped_y
        )
    }
}

/// Which edges of a frame sit on the matching edges of the work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClampFlags {
    /// Left edges coincide.
    pub left: bool,
    /// Right edges coincide.
    pub right: bool,
    /// Top edges coincide.
    pub top: bool,
    /// Bottom edges coincide.
    pub bottom: bool,
}

impl ClampFlags {
    /// Compare `frame` against `bounds` edge by edge.
    #[must_use]
    pub const fn between(frame: &Rect, bounds: &Rect) -> Self {
        Self {
            left: frame.left() == bounds.left(),
            right: far_edge(frame.x, frame.width) == far_edge(bounds.x, bounds.width),
            top: frame.top() == bounds.top(),
            bottom: far_edge(frame.y, frame.height) == far_edge(bounds.y, bounds.height),
        }
    }

    /// Returns true if any edge is flagged.
    #[must_use]
    pub const fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

impl Display for ClampFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut parts: Vec<&str> = Vec::new();
        if self.left {
            parts.push("left");
        }
        if self.right {
            parts.push("right");
        }
        if self.top {
            parts.push("top");
        }
        if self.bottom {
            parts.push("bottom");
        }
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(","))
        }
    }
}

/// Exclusive end of `[start, start + len)` without overflow.
const fn far_edge(start: i32, len: i32) -> i64 {
    start as i64 + len as i64
}

#[inline]
pub(crate) fn log_summary(label: &str, placement: &Placement, size: Size, bounds: Option<&Rect>) {
    match bounds {
        Some(b) => debug!(
            "summary: op={} {} size={} bounds={} edges={}",
            label,
            placement,
            size,
            b,
            ClampFlags::between(&placement.frame(size), b)
        ),
        None => debug!("summary: op={} {} size={} bounds=none", label, placement, size),
    }
}
