//! Symbolic anchor points on rectangles.
//!
//! An [`Anchor`] names one of nine points on a rectangle: the four corners,
//! the four edge midpoints, or the centre. Each anchor is a pair of
//! independent per-axis components, so the solvers can treat the horizontal
//! and vertical axes separately through [`Side`].

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geom::{Axis, Point, Rect};

/// Position of an anchor along a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left or top edge.
    Min,
    /// Midpoint.
    Mid,
    /// Right or bottom edge.
    Max,
}

impl Side {
    /// Mirror around the midpoint.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Min => Self::Max,
            Self::Mid => Self::Mid,
            Self::Max => Self::Min,
        }
    }

    /// Coordinate of this side on the span `[start, start + len)`.
    ///
    /// The midpoint uses integer division, truncating toward `start`.
    #[inline]
    #[must_use]
    pub const fn locate(self, start: i32, len: i32) -> i32 {
        match self {
            Self::Min => start,
            Self::Mid => start + len / 2,
            Self::Max => start + len,
        }
    }

    /// [`Side::locate`] on a widened span, for window extents whose end may
    /// not fit in `i32`.
    #[inline]
    #[must_use]
    pub const fn locate_wide(self, start: i64, len: i64) -> i64 {
        match self {
            Self::Min => start,
            Self::Mid => start + len / 2,
            Self::Max => start + len,
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Mid => "mid",
            Self::Max => "max",
        }
    }
}

/// Horizontal anchor component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Horizontal {
    /// Left edge.
    Left,
    /// Horizontal centre.
    Center,
    /// Right edge.
    Right,
}

impl Horizontal {
    /// Left and right swapped; centre unchanged.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Center => Self::Center,
            Self::Right => Self::Left,
        }
    }

    /// Axis-neutral form.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Left => Side::Min,
            Self::Center => Side::Mid,
            Self::Right => Side::Max,
        }
    }
}

/// Vertical anchor component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vertical {
    /// Top edge.
    Top,
    /// Vertical centre.
    Center,
    /// Bottom edge.
    Bottom,
}

impl Vertical {
    /// Top and bottom swapped; centre unchanged.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Center => Self::Center,
            Self::Bottom => Self::Top,
        }
    }

    /// Axis-neutral form.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Top => Side::Min,
            Self::Center => Side::Mid,
            Self::Bottom => Side::Max,
        }
    }
}

/// A point on a rectangle, as independent horizontal and vertical components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    /// Horizontal component.
    pub horizontal: Horizontal,
    /// Vertical component.
    pub vertical: Vertical,
}

/// Legacy bit for the left edge.
pub const ANCHOR_LEFT: u32 = 1 << 0;
/// Legacy bit for the right edge.
pub const ANCHOR_RIGHT: u32 = 1 << 1;
/// Legacy bit for the top edge.
pub const ANCHOR_TOP: u32 = 1 << 2;
/// Legacy bit for the bottom edge.
pub const ANCHOR_BOTTOM: u32 = 1 << 3;
/// All bits with a defined meaning.
const ANCHOR_KNOWN_BITS: u32 = ANCHOR_LEFT | ANCHOR_RIGHT | ANCHOR_TOP | ANCHOR_BOTTOM;

impl Anchor {
    /// Centre of the rectangle.
    pub const CENTER: Self = Self::new(Horizontal::Center, Vertical::Center);
    /// Midpoint of the left edge.
    pub const LEFT: Self = Self::new(Horizontal::Left, Vertical::Center);
    /// Midpoint of the right edge.
    pub const RIGHT: Self = Self::new(Horizontal::Right, Vertical::Center);
    /// Midpoint of the top edge.
    pub const TOP: Self = Self::new(Horizontal::Center, Vertical::Top);
    /// Midpoint of the bottom edge.
    pub const BOTTOM: Self = Self::new(Horizontal::Center, Vertical::Bottom);
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self::new(Horizontal::Left, Vertical::Top);
    /// Top-right corner.
    pub const TOP_RIGHT: Self = Self::new(Horizontal::Right, Vertical::Top);
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self::new(Horizontal::Left, Vertical::Bottom);
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self::new(Horizontal::Right, Vertical::Bottom);

    /// All nine anchors.
    pub const ALL: [Self; 9] = [
        Self::TOP_LEFT,
        Self::TOP,
        Self::TOP_RIGHT,
        Self::LEFT,
        Self::CENTER,
        Self::RIGHT,
        Self::BOTTOM_LEFT,
        Self::BOTTOM,
        Self::BOTTOM_RIGHT,
    ];

    /// Construct from components.
    #[must_use]
    pub const fn new(horizontal: Horizontal, vertical: Vertical) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Both components mirrored.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::new(self.horizontal.opposite(), self.vertical.opposite())
    }

    /// Component along `axis`.
    #[inline]
    #[must_use]
    pub const fn side(self, axis: Axis) -> Side {
        match axis {
            Axis::X => self.horizontal.side(),
            Axis::Y => self.vertical.side(),
        }
    }

    /// Decode the legacy bit encoding.
    ///
    /// An axis with both of its bits set is meaningless and decodes as
    /// centre. Unknown bits are ignored. Both cases log a warning.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        if bits & !ANCHOR_KNOWN_BITS != 0 {
            warn!(
                bits = %format_args!("{bits:#x}"),
                "anchor: ignoring unknown bits"
            );
        }
        let horizontal = match (bits & ANCHOR_LEFT != 0, bits & ANCHOR_RIGHT != 0) {
            (true, false) => Horizontal::Left,
            (false, true) => Horizontal::Right,
            (false, false) => Horizontal::Center,
            (true, true) => {
                warn!(
                    bits = %format_args!("{bits:#x}"),
                    "anchor: left|right on one axis, using center"
                );
                Horizontal::Center
            }
        };
        let vertical = match (bits & ANCHOR_TOP != 0, bits & ANCHOR_BOTTOM != 0) {
            (true, false) => Vertical::Top,
            (false, true) => Vertical::Bottom,
            (false, false) => Vertical::Center,
            (true, true) => {
                warn!(
                    bits = %format_args!("{bits:#x}"),
                    "anchor: top|bottom on one axis, using center"
                );
                Vertical::Center
            }
        };
        Self::new(horizontal, vertical)
    }

    /// Encode to the legacy bit form.
    #[must_use]
    pub const fn bits(self) -> u32 {
        let h = match self.horizontal {
            Horizontal::Left => ANCHOR_LEFT,
            Horizontal::Center => 0,
            Horizontal::Right => ANCHOR_RIGHT,
        };
        let v = match self.vertical {
            Vertical::Top => ANCHOR_TOP,
            Vertical::Center => 0,
            Vertical::Bottom => ANCHOR_BOTTOM,
        };
        h | v
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Concrete coordinate of `anchor` on `rect`.
#[must_use]
pub const fn anchor_point(rect: &Rect, anchor: Anchor) -> Point {
    Point {
        x: anchor.horizontal.side().locate(rect.x, rect.width),
        y: anchor.vertical.side().locate(rect.y, rect.height),
    }
}

/// Mirror of `anchor` on both axes.
#[must_use]
pub const fn opposite(anchor: Anchor) -> Anchor {
    anchor.opposite()
}

impl Display for Anchor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let v = match self.vertical {
            Vertical::Top => Some("top"),
            Vertical::Center => None,
            Vertical::Bottom => Some("bottom"),
        };
        let h = match self.horizontal {
            Horizontal::Left => Some("left"),
            Horizontal::Center => None,
            Horizontal::Right => Some("right"),
        };
        match (v, h) {
            (Some(v), Some(h)) => write!(f, "{v}-{h}"),
            (Some(v), None) => write!(f, "{v}-center"),
            (None, Some(h)) => write!(f, "center-{h}"),
            (None, None) => f.write_str("center"),
        }
    }
}

/// Error returned when parsing an anchor name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown anchor '{0}' (expected e.g. top-left, bottom-center, center)")]
pub struct ParseAnchorError(pub String);

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    /// Accepts `vertical-horizontal` pairs (`top-left`, `bottom-center`,
    /// `center-right`), bare edges (`top`, `left`), and `center`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        let mut horizontal = Horizontal::Center;
        let mut vertical = Vertical::Center;
        let mut seen_h = false;
        let mut seen_v = false;
        for part in norm.split('-') {
            match part {
                "left" | "right" if !seen_h => {
                    horizontal = if part == "left" {
                        Horizontal::Left
                    } else {
                        Horizontal::Right
                    };
                    seen_h = true;
                }
                "top" | "bottom" if !seen_v => {
                    vertical = if part == "top" {
                        Vertical::Top
                    } else {
                        Vertical::Bottom
                    };
                    seen_v = true;
                }
                "center" | "centre" | "mid" => {}
                _ => return Err(ParseAnchorError(s.to_string())),
            }
        }
        Ok(Self::new(horizontal, vertical))
    }
}

impl TryFrom<String> for Anchor {
    type Error = ParseAnchorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(value: Anchor) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_point_covers_all_nine() {
        let r = Rect::new(100, 100, 50, 21);
        assert_eq!(anchor_point(&r, Anchor::TOP_LEFT), Point::new(100, 100));
        assert_eq!(anchor_point(&r, Anchor::TOP), Point::new(125, 100));
        assert_eq!(anchor_point(&r, Anchor::TOP_RIGHT), Point::new(150, 100));
        assert_eq!(anchor_point(&r, Anchor::LEFT), Point::new(100, 110));
        assert_eq!(anchor_point(&r, Anchor::CENTER), Point::new(125, 110));
        assert_eq!(anchor_point(&r, Anchor::RIGHT), Point::new(150, 110));
        assert_eq!(anchor_point(&r, Anchor::BOTTOM_LEFT), Point::new(100, 121));
        assert_eq!(anchor_point(&r, Anchor::BOTTOM), Point::new(125, 121));
        assert_eq!(anchor_point(&r, Anchor::BOTTOM_RIGHT), Point::new(150, 121));
    }

    #[test]
    fn opposite_mirrors_each_axis() {
        assert_eq!(opposite(Anchor::TOP_LEFT), Anchor::BOTTOM_RIGHT);
        assert_eq!(opposite(Anchor::BOTTOM), Anchor::TOP);
        assert_eq!(opposite(Anchor::RIGHT), Anchor::LEFT);
        assert_eq!(opposite(Anchor::CENTER), Anchor::CENTER);
        for a in Anchor::ALL {
            assert_eq!(a.opposite().opposite(), a);
        }
    }

    #[test]
    fn bits_roundtrip_for_valid_anchors() {
        for a in Anchor::ALL {
            assert_eq!(Anchor::from_bits(a.bits()), a);
        }
        assert_eq!(
            Anchor::from_bits(ANCHOR_BOTTOM | ANCHOR_RIGHT),
            Anchor::BOTTOM_RIGHT
        );
    }

    #[test]
    fn conflicting_bits_degrade_to_center_per_axis() {
        assert_eq!(
            Anchor::from_bits(ANCHOR_LEFT | ANCHOR_RIGHT | ANCHOR_TOP),
            Anchor::TOP
        );
        assert_eq!(
            Anchor::from_bits(ANCHOR_TOP | ANCHOR_BOTTOM | ANCHOR_RIGHT),
            Anchor::RIGHT
        );
        assert_eq!(Anchor::from_bits(0x30 | ANCHOR_LEFT), Anchor::LEFT);
    }

    #[test]
    fn names_parse_and_print() {
        for a in Anchor::ALL {
            let s = a.to_string();
            assert_eq!(s.parse::<Anchor>().unwrap(), a, "{s}");
        }
        assert_eq!("left-top".parse::<Anchor>().unwrap(), Anchor::TOP_LEFT);
        assert_eq!("Bottom_Center".parse::<Anchor>().unwrap(), Anchor::BOTTOM);
        assert_eq!("right".parse::<Anchor>().unwrap(), Anchor::RIGHT);
        assert!("top-bottom".parse::<Anchor>().is_err());
        assert!("diagonal".parse::<Anchor>().is_err());
    }
}
