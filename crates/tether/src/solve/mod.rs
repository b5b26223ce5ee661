//! The anchor + flip-hint position solver.
//!
//! Each axis is solved independently:
//!
//! 1. The rectangle anchor is located on the attachment rectangle, moved into
//!    absolute coordinates by the resolved origin of its space.
//! 2. The window anchor is located on the window's visual rectangle (its
//!    outer frame minus shadow insets), so shadows do not push the window
//!    away from the attachment.
//! 3. The fixed offset is added, giving the primary candidate.
//! 4. The work area is padded outward by the shadow insets.
//! 5. If the primary candidate overflows and the axis may flip, the mirrored
//!    anchor pair (with the offset negated) is tried and adopted only if it
//!    fits.
//! 6. The chosen candidate is clamped into the padded work area and the
//!    displacement is reported.

use tracing::trace;

use crate::{
    anchor::Side,
    error::{Error, Result},
    geom::{Axis, Insets, Point, Rect, Size, narrow},
    metrics::PLACEMENT_COUNTERS,
    params::AttachParams,
    report::{Placement, log_summary},
};

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod scenario_tests;

/// Per-solve inputs that come from the window system rather than from the
/// parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveInput {
    /// Absolute origin of the attachment rectangle's coordinate space.
    pub origin: Point,
    /// Outer window size, shadow included.
    pub size: Size,
    /// Shadow insets inside the outer window size.
    pub shadow: Insets,
    /// Monitor work area in absolute coordinates, if known.
    pub bounds: Option<Rect>,
}

impl SolveInput {
    /// Input for a window of `size` with no shadow, root origin and no bounds.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            origin: Point::new(0, 0),
            size,
            shadow: Insets::ZERO,
            bounds: None,
        }
    }

    /// Set the absolute origin of the attachment space.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Set the window shadow insets.
    #[must_use]
    pub const fn with_shadow(mut self, shadow: Insets) -> Self {
        self.shadow = shadow;
        self
    }

    /// Set the monitor work area.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Everything needed to place one axis.
///
/// Coordinates are widened to `i64` so that any valid `i32` input can be
/// summed without overflow; results are narrowed once at the end.
#[derive(Clone, Copy, Debug)]
struct AxisProblem {
    axis: Axis,
    /// Attachment rectangle start in absolute coordinates.
    rect_start: i64,
    /// Attachment rectangle extent.
    rect_len: i64,
    rect_side: Side,
    window_side: Side,
    /// Outer window extent.
    size: i64,
    /// Shadow on the leading edge.
    lead: i64,
    /// Shadow on the trailing edge.
    trail: i64,
    offset: i64,
    allow_flip: bool,
    /// Padded work-area span `[start, end)`.
    bounds: Option<(i64, i64)>,
}

/// Result for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AxisSolution {
    /// Final coordinate.
    value: i32,
    /// Displacement applied by clamping.
    offset: i32,
    flipped: bool,
}

impl AxisProblem {
    fn new(axis: Axis, params: &AttachParams, rect: &Rect, input: &SolveInput) -> Self {
        let (rect_anchor, window_anchor) = params.anchors();
        let lead = i64::from(input.shadow.leading(axis));
        let trail = i64::from(input.shadow.trailing(axis));
        Self {
            axis,
            rect_start: i64::from(rect.start(axis)) + i64::from(input.origin.along(axis)),
            rect_len: i64::from(rect.extent(axis)),
            rect_side: rect_anchor.side(axis),
            window_side: window_anchor.side(axis),
            size: i64::from(input.size.along(axis)),
            lead,
            trail,
            offset: i64::from(params.offset().along(axis)),
            allow_flip: params.flip_hints().allows(axis),
            bounds: input.bounds.map(|b| {
                let start = i64::from(b.start(axis));
                (start - lead, start + i64::from(b.extent(axis)) + trail)
            }),
        }
    }

    /// Outer window coordinate that puts `window_side` of the visual
    /// rectangle on `rect_side` of the attachment, displaced by `offset`.
    fn candidate(&self, rect_side: Side, window_side: Side, offset: i64) -> i64 {
        let target = rect_side.locate_wide(self.rect_start, self.rect_len);
        let visual_len = self.size - self.lead - self.trail;
        let anchor_in_window = window_side.locate_wide(self.lead, visual_len);
        target - anchor_in_window + offset
    }

    fn fits(&self, value: i64) -> bool {
        self.bounds
            .is_none_or(|(start, end)| start <= value && value + self.size <= end)
    }

    fn solve(&self) -> Result<AxisSolution> {
        let primary = self.candidate(self.rect_side, self.window_side, self.offset);
        let mut ideal = primary;
        let mut flipped = false;
        if !self.fits(primary) && self.allow_flip {
            let mirrored = self.candidate(
                self.rect_side.opposite(),
                self.window_side.opposite(),
                -self.offset,
            );
            if self.fits(mirrored) {
                ideal = mirrored;
                flipped = true;
            }
            trace!(
                axis = %self.axis,
                primary,
                mirrored,
                adopted = flipped,
                "solve: flip considered"
            );
        }
        let value = match self.bounds {
            Some((start, end)) => clamp_span(ideal, self.size, start, end),
            None => ideal,
        };
        trace!(axis = %self.axis, primary, ideal, value, flipped, "solve: axis");
        // The ideal position must stay representable so that
        // `Placement::ideal` can recover it.
        narrow(self.axis, ideal)?;
        Ok(AxisSolution {
            value: narrow(self.axis, value)?,
            offset: narrow(self.axis, value - ideal)?,
            flipped,
        })
    }
}

/// Clamp a window of `size` starting at `val` into `[start, end)`.
///
/// When the window is larger than the span it is pushed to whichever edge
/// needs the smaller move; an exact tie goes to `start`.
#[inline]
pub(crate) fn clamp_span(val: i64, size: i64, start: i64, end: i64) -> i64 {
    let min = start;
    let max = end - size;
    if max < min {
        if min - val <= val - max { min } else { max }
    } else {
        val.clamp(min, max)
    }
}

/// Compute where a window should go for `params`.
///
/// Fails when the parameters carry no attachment rectangle, an extent is
/// negative, the shadow does not fit the window, or the result does not
/// fit in pixel coordinates. An axis with no in-bounds solution is reported
/// through a non-zero offset instead.
pub fn solve(params: &AttachParams, input: &SolveInput) -> Result<Placement> {
    let attachment = params.attachment().ok_or(Error::MissingAttachRect)?;
    attachment.rect.validate("attachment rectangle")?;
    input.size.validate("window")?;
    input.shadow.validate(input.size)?;

    let x = AxisProblem::new(Axis::X, params, &attachment.rect, input).solve()?;
    let y = AxisProblem::new(Axis::Y, params, &attachment.rect, input).solve()?;
    let placement = Placement {
        x: x.value,
        y: y.value,
        offset_x: x.offset,
        offset_y: y.offset,
        flipped_x: x.flipped,
        flipped_y: y.flipped,
    };
    let padded = input.bounds.map(|b| b.outset(&input.shadow));
    log_summary("solve", &placement, input.size, padded.as_ref());
    PLACEMENT_COUNTERS.record_solve(&placement);
    Ok(placement)
}
