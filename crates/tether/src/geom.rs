// Integer pixel geometry shared by both solvers.
// Screen convention: x grows right, y grows down; (x, y) is the top-left corner.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A point in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Component-wise sum.
    #[inline]
    #[must_use]
    pub const fn offset_by(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A window size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// Construct a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Reject negative extents.
    pub fn validate(self, what: &'static str) -> Result<()> {
        if self.width < 0 || self.height < 0 {
            return Err(Error::NegativeExtent {
                what,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Logical axis; every placement decision is taken per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// The other axis.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// A rectangle in some coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent, non-negative.
    pub width: i32,
    /// Vertical extent, non-negative.
    pub height: i32,
}

impl Rect {
    /// Construct a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Centre point, truncating toward the origin corner.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2,
            y: self.y + self.height / 2,
        }
    }

    /// Rectangle size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Start coordinate along `axis`.
    #[inline]
    #[must_use]
    pub const fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// End coordinate (exclusive) along `axis`.
    #[inline]
    #[must_use]
    pub const fn end(&self, axis: Axis) -> i32 {
        self.start(axis) + self.extent(axis)
    }

    /// Same rectangle moved by `delta`.
    #[must_use]
    pub const fn translated(&self, delta: Point) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Grow outward by `insets` (negative insets shrink), saturating at the
    /// `i32` limits.
    #[must_use]
    pub const fn outset(&self, insets: &Insets) -> Self {
        Self {
            x: self.x.saturating_sub(insets.left),
            y: self.y.saturating_sub(insets.top),
            width: self
                .width
                .saturating_add(insets.left)
                .saturating_add(insets.right),
            height: self
                .height
                .saturating_add(insets.top)
                .saturating_add(insets.bottom),
        }
    }

    /// Shrink inward by `insets`.
    #[must_use]
    pub const fn inset(&self, insets: &Insets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: self.width - insets.left - insets.right,
            height: self.height - insets.top - insets.bottom,
        }
    }

    /// Half-open containment test.
    #[inline]
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// True when `[start, start + len)` lies inside this rectangle on `axis`.
    ///
    /// Spans are widened so that windows near the `i32` limits compare
    /// without overflow.
    #[inline]
    #[must_use]
    pub const fn fits_span(&self, axis: Axis, start: i64, len: i64) -> bool {
        let lo = self.start(axis) as i64;
        lo <= start && start + len <= lo + self.extent(axis) as i64
    }

    /// Squared distance from `p` to the nearest point of the rectangle.
    #[must_use]
    pub fn distance_sq(&self, p: Point) -> i64 {
        let dx = i64::from(
            (self.left() - p.x)
                .max(0)
                .max(p.x - (self.right() - 1).max(self.left())),
        );
        let dy = i64::from(
            (self.top() - p.y)
                .max(0)
                .max(p.y - (self.bottom() - 1).max(self.top())),
        );
        dx * dx + dy * dy
    }

    /// Reject negative extents.
    pub fn validate(&self, what: &'static str) -> Result<()> {
        self.size().validate(what)
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({},{} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Per-edge pixel insets.
///
/// For windows these describe the transparent shadow margin around the visual
/// content. The rule-based solver also uses them for margins and padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    /// Top inset.
    pub top: i32,
    /// Left inset.
    pub left: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

/// Shadow margin around a window's visual content.
pub type ShadowInsets = Insets;

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0);

    /// Construct insets in `top, left, right, bottom` order.
    #[must_use]
    pub const fn new(top: i32, left: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Same inset on all four edges.
    #[must_use]
    pub const fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Leading (left or top) inset along `axis`.
    #[inline]
    #[must_use]
    pub const fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Trailing (right or bottom) inset along `axis`.
    #[inline]
    #[must_use]
    pub const fn trailing(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Check these insets as the shadow of a window of `size`: no edge may
    /// be negative, and opposite edges together may not exceed the window.
    pub fn validate(&self, size: Size) -> Result<()> {
        let negative = self.top < 0 || self.left < 0 || self.right < 0 || self.bottom < 0;
        let too_wide = i64::from(self.left) + i64::from(self.right) > i64::from(size.width);
        let too_tall = i64::from(self.top) + i64::from(self.bottom) > i64::from(size.height);
        if negative || too_wide || too_tall {
            return Err(Error::InvalidShadow {
                insets: *self,
                size,
            });
        }
        Ok(())
    }
}

impl Display for Insets {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "top={} left={} right={} bottom={}",
            self.top, self.left, self.right, self.bottom
        )
    }
}

/// Narrow a widened coordinate back to pixels.
pub(crate) fn narrow(axis: Axis, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::CoordinateOverflow { axis, value })
}
