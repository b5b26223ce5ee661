//! Priority-rule placement strategy.
//!
//! This is the earlier, search-based design, kept alongside the anchor
//! solver. A caller supplies two ordered lists of single-axis
//! [`AttachRule`]s. The strategy looks for a satisfiable primary rule on one
//! axis and a satisfiable secondary rule on the other, preferring earlier
//! rules, and falls back to unsatisfiable ("good") rules when no satisfiable
//! pair exists. The two strategies can disagree for the same geometric
//! intent and are never mixed.
//!
//! Candidates are computed in `i64` and narrowed once a position has been
//! chosen, so extreme extents surface as [`Error::CoordinateOverflow`].

use std::{
    any::Any,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    adapter::{DisplayAdapter, WindowId},
    anchor::Side,
    callback::{CallbackContext, CallbackSlot},
    error::{Error, Result},
    geom::{Axis, Insets, Point, Rect, Size, narrow},
    metrics::PLACEMENT_COUNTERS,
};

/// Constraint aligning one side of the window with one side of the
/// attachment rectangle on a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttachRule {
    /// Axis the rule constrains.
    pub axis: Axis,
    /// Side of the attachment rectangle.
    pub rect: Side,
    /// Side of the window placed on `rect`.
    pub window: Side,
}

impl AttachRule {
    /// Construct a rule.
    #[must_use]
    pub const fn new(axis: Axis, rect: Side, window: Side) -> Self {
        Self { axis, rect, window }
    }

    /// Window placed outside the rectangle, edge to edge. Margins only apply
    /// to such rules.
    #[must_use]
    pub const fn touching(self) -> bool {
        matches!(
            (self.rect, self.window),
            (Side::Min, Side::Max) | (Side::Max, Side::Min)
        )
    }
}

impl Display for AttachRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}:{}", self.axis, self.rect.name(), self.window.name())
    }
}

/// Error returned when a rule string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid attach rule '{0}' (expected axis:rect:window, e.g. y:max:min)")]
pub struct ParseRuleError(pub String);

impl FromStr for AttachRule {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bad = || ParseRuleError(s.to_string());
        let parts: Vec<String> = s
            .split(':')
            .map(|p| p.trim().to_ascii_lowercase())
            .collect();
        let [axis, rect, window] = parts.as_slice() else {
            return Err(bad());
        };
        let axis = match axis.as_str() {
            "x" => Axis::X,
            "y" => Axis::Y,
            _ => return Err(bad()),
        };
        let side = |p: &str| match p {
            "min" => Some(Side::Min),
            "mid" => Some(Side::Mid),
            "max" => Some(Side::Max),
            _ => None,
        };
        match (side(rect), side(window)) {
            (Some(rect), Some(window)) => Ok(Self::new(axis, rect, window)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for AttachRule {
    type Error = ParseRuleError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttachRule> for String {
    fn from(value: AttachRule) -> Self {
        value.to_string()
    }
}

/// What a rule callback learns about a finished move.
pub struct RuleEvent<'a> {
    /// Window that was moved.
    pub window: WindowId,
    /// Parameters used for the move.
    pub params: &'a RuleParams,
    /// Final coordinates and the primary and secondary rules chosen.
    pub placement: RulePlacement,
    /// Context registered with the callback, if any.
    pub context: Option<&'a (dyn Any + Send + Sync)>,
}

impl RuleEvent<'_> {
    /// Context downcast to `T`, if present and of that type.
    #[must_use]
    pub fn context_as<T: Any>(&self) -> Option<&T> {
        self.context.and_then(|ctx| ctx.downcast_ref::<T>())
    }
}

impl Debug for RuleEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RuleEvent")
            .field("window", &self.window)
            .field("placement", &self.placement)
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

/// Parameters for the rule-based strategy.
#[derive(Default)]
pub struct RuleParams {
    origin: Point,
    attach_rect: Option<Rect>,
    attach_margin: Insets,
    window_margin: Insets,
    window_padding: Insets,
    offset: Point,
    primary: Vec<AttachRule>,
    secondary: Vec<AttachRule>,
    /// Callback run by [`move_window`], with its owned context.
    callback: CallbackSlot<dyn Fn(&RuleEvent<'_>) + Send + Sync>,
}

impl RuleParams {
    /// Empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute origin of the attachment rectangle's coordinate system.
    pub fn set_attach_origin(&mut self, x: i32, y: i32) {
        self.origin = Point::new(x, y);
    }

    /// Set or clear the attachment rectangle.
    pub fn set_attach_rect(&mut self, rect: Option<Rect>) {
        self.attach_rect = rect;
    }

    /// Space to leave around the attachment rectangle.
    pub fn set_attach_margin(&mut self, margin: Option<Insets>) {
        self.attach_margin = margin.unwrap_or_default();
    }

    /// Space to leave around the window.
    pub fn set_window_margin(&mut self, margin: Option<Insets>) {
        self.window_margin = margin.unwrap_or_default();
    }

    /// Space between the window frame and its contents.
    pub fn set_window_padding(&mut self, padding: Option<Insets>) {
        self.window_padding = padding.unwrap_or_default();
    }

    /// Fixed displacement added to every candidate.
    pub fn set_window_offset(&mut self, x: i32, y: i32) {
        self.offset = Point::new(x, y);
    }

    /// Append primary rules, in descending priority.
    pub fn add_primary_rules<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = AttachRule>,
    {
        self.primary.extend(rules);
    }

    /// Append secondary rules, in descending priority.
    pub fn add_secondary_rules<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = AttachRule>,
    {
        self.secondary.extend(rules);
    }

    /// Primary rules in priority order.
    #[must_use]
    pub fn primary_rules(&self) -> &[AttachRule] {
        &self.primary
    }

    /// Secondary rules in priority order.
    #[must_use]
    pub fn secondary_rules(&self) -> &[AttachRule] {
        &self.secondary
    }

    /// Attachment rectangle, if set.
    #[must_use]
    pub const fn attach_rect(&self) -> Option<&Rect> {
        self.attach_rect.as_ref()
    }

    /// Register the function called after [`move_window`] has moved a
    /// window.
    ///
    /// Any previously registered context is released before `context` is
    /// stored.
    pub fn set_position_callback<F>(&mut self, callback: F, context: Option<CallbackContext>)
    where
        F: Fn(&RuleEvent<'_>) + Send + Sync + 'static,
    {
        self.callback.replace(Box::new(callback), context);
    }

    /// Remove the callback and release its context.
    pub fn clear_position_callback(&mut self) {
        self.callback.release();
    }

    /// Whether a position callback is registered.
    #[must_use]
    pub const fn has_position_callback(&self) -> bool {
        self.callback.is_set()
    }

    /// Invoke the position callback, if any.
    fn notify(&self, window: WindowId, placement: RulePlacement) {
        let Some(callback) = self.callback.callback() else {
            return;
        };
        let event = RuleEvent {
            window,
            params: self,
            placement,
            context: self.callback.context(),
        };
        callback(&event);
    }

    /// Absolute coordinate `rule` would give the window, ignoring bounds.
    fn candidate(&self, rect: &Rect, rule: AttachRule, size: Size) -> i64 {
        let axis = rule.axis;
        let touching = rule.touching();
        let when = |v: i32| if touching { i64::from(v) } else { 0 };
        let len = i64::from(size.along(axis));
        let start = i64::from(rect.start(axis));
        let extent = i64::from(rect.extent(axis));
        let on_rect = match rule.rect {
            Side::Min => start - when(self.attach_margin.leading(axis)),
            Side::Mid => Side::Mid.locate_wide(start, extent),
            Side::Max => start + extent + when(self.attach_margin.trailing(axis)),
        };
        let window_shift = match rule.window {
            Side::Min => {
                when(self.window_margin.leading(axis))
                    - i64::from(self.window_padding.leading(axis))
            }
            Side::Mid => -(len / 2),
            Side::Max => {
                -len - when(self.window_margin.trailing(axis))
                    + i64::from(self.window_padding.trailing(axis))
            }
        };
        i64::from(self.origin.along(axis))
            + on_rect
            + window_shift
            + i64::from(self.offset.along(axis))
    }
}

impl Debug for RuleParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RuleParams")
            .field("origin", &self.origin)
            .field("attach_rect", &self.attach_rect)
            .field("attach_margin", &self.attach_margin)
            .field("window_margin", &self.window_margin)
            .field("window_padding", &self.window_padding)
            .field("offset", &self.offset)
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .field("has_callback", &self.callback.is_set())
            .field("has_context", &self.callback.has_context())
            .finish()
    }
}

/// Outcome of the rule-based strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RulePlacement {
    /// Final x-coordinate.
    pub x: i32,
    /// Final y-coordinate.
    pub y: i32,
    /// Horizontal displacement applied to stay on-screen.
    pub offset_x: i32,
    /// Vertical displacement applied to stay on-screen.
    pub offset_y: i32,
    /// Primary rule that was used.
    pub primary: AttachRule,
    /// Secondary rule that was used.
    pub secondary: AttachRule,
}

/// How well a remembered rule did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quality {
    /// Satisfiable.
    Best,
    /// Unsatisfiable, kept as a fallback.
    Good,
}

/// A remembered rule and its candidate coordinate.
#[derive(Clone, Copy, Debug)]
struct Slot {
    rule: AttachRule,
    value: i64,
}

/// First best and first good rule per axis for one rule list.
#[derive(Clone, Copy, Debug, Default)]
struct Scan {
    best: [Option<Slot>; 2],
    good: [Option<Slot>; 2],
    /// Axis of the first best rule found.
    best_axis: Option<Axis>,
    /// Axis of the first good rule found.
    good_axis: Option<Axis>,
}

const fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
    }
}

impl Scan {
    fn run(
        params: &RuleParams,
        rect: &Rect,
        rules: &[AttachRule],
        size: Size,
        bounds: Option<&Rect>,
    ) -> Self {
        let mut scan = Self::default();
        for &rule in rules {
            let axis = rule.axis;
            let i = axis_index(axis);
            let value = params.candidate(rect, rule, size);
            let satisfiable =
                bounds.is_none_or(|b| b.fits_span(axis, value, i64::from(size.along(axis))));
            trace!(%rule, value, satisfiable, "rules: candidate");
            let slot = Slot { rule, value };
            if satisfiable && scan.best[i].is_none() {
                scan.best[i] = Some(slot);
                if scan.best[1 - i].is_some() {
                    break;
                }
                scan.best_axis = Some(axis);
            } else if scan.good[i].is_none() {
                scan.good[i] = Some(slot);
                if scan.good[1 - i].is_none() {
                    scan.good_axis = Some(axis);
                }
            }
        }
        scan
    }

    fn slot(&self, quality: Quality, axis: Axis) -> Option<Slot> {
        match quality {
            Quality::Best => self.best[axis_index(axis)],
            Quality::Good => self.good[axis_index(axis)],
        }
    }

    fn preferred_axis(&self, quality: Quality) -> Axis {
        match quality {
            Quality::Best => self.best_axis,
            Quality::Good => self.good_axis,
        }
        .unwrap_or(Axis::X)
    }
}

/// Push `[val, val + len)` back inside `[start, end)`; the start edge wins
/// when the window is too large.
fn clamp_into(val: i64, len: i64, start: i64, end: i64) -> (i64, i64) {
    let mut v = val;
    let mut offset = 0;
    if v + len > end {
        offset += end - len - v;
        v = end - len;
    }
    if v < start {
        offset += start - v;
        v = start;
    }
    (v, offset)
}

/// Best position for a window of `size` within `bounds` under `params`.
///
/// `Ok(None)` means no primary rule could be paired with a secondary rule
/// on the other axis.
pub fn choose_position(
    params: &RuleParams,
    size: Size,
    bounds: Option<&Rect>,
) -> Result<Option<RulePlacement>> {
    let rect = params.attach_rect.ok_or(Error::MissingAttachRect)?;
    size.validate("window")?;

    let primary = Scan::run(params, &rect, &params.primary, size, bounds);
    let secondary = Scan::run(params, &rect, &params.secondary, size, bounds);

    let mut found = None;
    'search: for pq in [Quality::Best, Quality::Good] {
        for sq in [Quality::Best, Quality::Good] {
            let pref = primary.preferred_axis(pq);
            for p_axis in [pref, pref.other()] {
                let p = primary.slot(pq, p_axis);
                let s = secondary.slot(sq, p_axis.other());
                let (Some(p), Some(s)) = (p, s) else {
                    continue;
                };
                debug!(primary = %p.rule, secondary = %s.rule, ?pq, ?sq, "rules: pair chosen");
                found = Some((p_axis, p, s));
                break 'search;
            }
        }
    }

    PLACEMENT_COUNTERS.record_rule_solve(found.is_some());
    let Some((p_axis, p, s)) = found else {
        debug!(
            primary = params.primary.len(),
            secondary = params.secondary.len(),
            "rules: no non-conflicting pair"
        );
        return Ok(None);
    };
    let settle = |axis: Axis, value: i64| -> Result<(i32, i32)> {
        let (value, offset) = match bounds {
            Some(b) => {
                let start = i64::from(b.start(axis));
                let end = start + i64::from(b.extent(axis));
                clamp_into(value, i64::from(size.along(axis)), start, end)
            }
            None => (value, 0),
        };
        Ok((narrow(axis, value)?, narrow(axis, offset)?))
    };
    let (x, y) = match p_axis {
        Axis::X => (p.value, s.value),
        Axis::Y => (s.value, p.value),
    };
    let (x, offset_x) = settle(Axis::X, x)?;
    let (y, offset_y) = settle(Axis::Y, y)?;
    Ok(Some(RulePlacement {
        x,
        y,
        offset_x,
        offset_y,
        primary: p.rule,
        secondary: s.rule,
    }))
}

/// [`choose_position`] for a live window: bounds are the work area of the
/// monitor under the attachment rectangle's centre.
pub fn choose_position_for_window<A>(
    adapter: &A,
    params: &RuleParams,
    window: WindowId,
) -> Result<Option<RulePlacement>>
where
    A: DisplayAdapter + ?Sized,
{
    let rect = params.attach_rect.ok_or(Error::MissingAttachRect)?;
    let center = params.origin.offset_by(rect.center());
    let bounds = adapter.monitor_work_area(center)?;
    let size = adapter.window_size(window)?;
    choose_position(params, size, Some(&bounds))
}

/// Move `window` to the position chosen by [`choose_position_for_window`].
///
/// Returns the placement used, or `None` (window untouched) when no pair of
/// rules could be satisfied. After a move the position callback, if any, is
/// invoked with the placement and the rules that produced it.
pub fn move_window<A>(
    adapter: &A,
    params: &RuleParams,
    window: WindowId,
) -> Result<Option<RulePlacement>>
where
    A: DisplayAdapter + ?Sized,
{
    let chosen = choose_position_for_window(adapter, params, window)?;
    if let Some(p) = chosen {
        adapter.move_window(window, p.x, p.y)?;
        let notified = params.has_position_callback();
        params.notify(window, p);
        PLACEMENT_COUNTERS.record_placed(notified);
    }
    Ok(chosen)
}
