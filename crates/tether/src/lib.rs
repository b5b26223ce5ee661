//! tether: positioning of attached windows.
//!
//! Popups, dropdown menus, tooltips and submenus are placed relative to an
//! attachment rectangle on some other surface. Given the rectangle, a pair
//! of anchors, flip permissions and an offset, the solver picks a position
//! that keeps the window on the monitor's work area, flipping to the other
//! side of the rectangle when that helps and clamping when it does not.
//!
//! - [`solve()`] is the pure anchor + flip-hint solver.
//! - [`place_window`] resolves inputs through a [`DisplayAdapter`], solves,
//!   moves the window and invokes the position callback.
//! - [`rules`] is the older priority-rule strategy, kept separate.

pub mod adapter;
pub mod anchor;
mod callback;
mod error;
pub mod geom;
pub mod hints;
mod metrics;
pub mod params;
pub mod place;
pub mod report;
pub mod rules;
pub mod solve;
pub mod space;

pub use adapter::{
    DisplayAdapter, DisplayHandle, DisplayOp, Monitor, VirtualDisplay, VirtualWindowConfig,
    WindowId,
};
pub use anchor::{
    ANCHOR_BOTTOM, ANCHOR_LEFT, ANCHOR_RIGHT, ANCHOR_TOP, Anchor, Horizontal, ParseAnchorError,
    Side, Vertical, anchor_point, opposite,
};
pub use callback::CallbackContext;
pub use error::{Error, Result};
pub use geom::{Axis, Insets, Point, Rect, ShadowInsets, Size};
pub use hints::FlipHints;
pub use metrics::{
    AxisSnapshot, PlacementCountersSnapshot, placement_counters_reset,
    placement_counters_snapshot,
};
pub use params::{AttachParams, Attachment, PositionCallback, PositionEvent};
pub use place::place_window;
pub use report::{ClampFlags, Placement};
pub use solve::{SolveInput, solve};
pub use space::{CoordinateSpace, SurfaceId, SurfaceLink, resolve_origin};
