//! Window-system seam used by [`crate::place_window`].
//!
//! The solvers never talk to a window system directly. Everything they need
//! from the outside world (surface origins, monitor work areas, window
//! sizes and shadows, and the final move) goes through [`DisplayAdapter`].
//! [`VirtualDisplay`] is an in-memory implementation that records every call
//! so placement can be exercised deterministically.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    geom::{Insets, Point, Rect, Size},
    space::{CoordinateSpace, SurfaceId, SurfaceLink, resolve_origin},
};

/// Identifier of a top-level window known to an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(u64);

impl WindowId {
    /// Wrap a raw window identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Display for WindowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "window#{}", self.0)
    }
}

/// A physical monitor and the part of it available to windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    /// Full monitor bounds in absolute coordinates.
    pub geometry: Rect,
    /// Work area: geometry minus panels, docks and similar reservations.
    pub work_area: Rect,
}

impl Monitor {
    /// Monitor with a distinct work area.
    #[must_use]
    pub const fn new(geometry: Rect, work_area: Rect) -> Self {
        Self {
            geometry,
            work_area,
        }
    }

    /// Monitor whose work area is its whole geometry.
    #[must_use]
    pub const fn full(geometry: Rect) -> Self {
        Self::new(geometry, geometry)
    }
}

/// Shared handle for display adapters.
pub type DisplayHandle = Arc<dyn DisplayAdapter>;

/// Operations placement needs from a window system.
pub trait DisplayAdapter: Send + Sync {
    /// One step of `surface`'s ancestor chain.
    fn surface_link(&self, surface: SurfaceId) -> Result<SurfaceLink>;

    /// Absolute origin of `space`, walking [`Self::surface_link`] upward.
    fn resolve_absolute_origin(&self, space: CoordinateSpace) -> Result<Point> {
        resolve_origin(space, |surface| self.surface_link(surface))
    }

    /// Work area of the monitor containing `point`, or the nearest monitor
    /// when no monitor contains it.
    fn monitor_work_area(&self, point: Point) -> Result<Rect>;

    /// Outer size of `window`, shadow included.
    fn window_size(&self, window: WindowId) -> Result<Size>;

    /// Shadow insets inside the outer size of `window`.
    fn window_shadow(&self, window: WindowId) -> Result<Insets>;

    /// Move the outer top-left corner of `window` to `(x, y)`.
    fn move_window(&self, window: WindowId, x: i32, y: i32) -> Result<()>;
}

/// Call recorded by [`VirtualDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOp {
    /// `surface_link` was queried.
    SurfaceLink(SurfaceId),
    /// `monitor_work_area` was queried at a point.
    WorkArea(Point),
    /// `window_size` was queried.
    Size(WindowId),
    /// `window_shadow` was queried.
    Shadow(WindowId),
    /// A window was moved.
    Move {
        /// Moved window.
        window: WindowId,
        /// New x-coordinate.
        x: i32,
        /// New y-coordinate.
        y: i32,
    },
}

/// Initial state of a virtual window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindowConfig {
    /// Outer size, shadow included.
    pub size: Size,
    /// Shadow insets.
    pub shadow: Insets,
    /// Initial outer top-left corner.
    pub position: Point,
}

impl Default for VirtualWindowConfig {
    fn default() -> Self {
        Self {
            size: Size::new(200, 100),
            shadow: Insets::ZERO,
            position: Point::default(),
        }
    }
}

impl VirtualWindowConfig {
    /// Window of `size` at the origin with no shadow.
    #[must_use]
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Set the shadow insets.
    #[must_use]
    pub const fn with_shadow(mut self, shadow: Insets) -> Self {
        self.shadow = shadow;
        self
    }
}

/// Mutable state behind a [`VirtualDisplay`].
#[derive(Default)]
struct State {
    monitors: Vec<Monitor>,
    surfaces: HashMap<SurfaceId, SurfaceLink>,
    windows: HashMap<WindowId, VirtualWindowConfig>,
    next_window: u64,
    ops: Vec<DisplayOp>,
}

impl State {
    fn window(&mut self, window: WindowId) -> Result<&mut VirtualWindowConfig> {
        self.windows
            .get_mut(&window)
            .ok_or(Error::UnknownWindow(window))
    }
}

/// In-memory [`DisplayAdapter`] with scripted monitors, surfaces and windows.
#[derive(Default)]
pub struct VirtualDisplay {
    state: Mutex<State>,
}

impl VirtualDisplay {
    /// Empty display: no monitors, surfaces or windows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::add_monitor`].
    #[must_use]
    pub fn with_monitor(self, monitor: Monitor) -> Self {
        self.add_monitor(monitor);
        self
    }

    /// Attach a monitor.
    pub fn add_monitor(&self, monitor: Monitor) {
        self.state.lock().monitors.push(monitor);
    }

    /// Register or replace the ancestor link of a surface.
    pub fn add_surface(&self, surface: SurfaceId, link: SurfaceLink) {
        self.state.lock().surfaces.insert(surface, link);
    }

    /// Create a window and return its identifier.
    pub fn new_window(&self, config: VirtualWindowConfig) -> WindowId {
        let mut state = self.state.lock();
        state.next_window += 1;
        let id = WindowId::new(state.next_window);
        state.windows.insert(id, config);
        id
    }

    /// Current outer top-left corner of a window.
    #[must_use]
    pub fn window_position(&self, window: WindowId) -> Option<Point> {
        self.state.lock().windows.get(&window).map(|w| w.position)
    }

    /// Calls recorded so far, oldest first.
    #[must_use]
    pub fn operations(&self) -> Vec<DisplayOp> {
        self.state.lock().ops.clone()
    }

    /// Forget recorded calls.
    pub fn clear_operations(&self) {
        self.state.lock().ops.clear();
    }
}

/// Monitor containing `point`, else the one whose geometry is closest.
fn monitor_for(monitors: &[Monitor], point: Point) -> Option<&Monitor> {
    monitors
        .iter()
        .find(|m| m.geometry.contains(point))
        .or_else(|| {
            monitors
                .iter()
                .min_by_key(|m| m.geometry.distance_sq(point))
        })
}

impl DisplayAdapter for VirtualDisplay {
    fn surface_link(&self, surface: SurfaceId) -> Result<SurfaceLink> {
        let mut state = self.state.lock();
        state.ops.push(DisplayOp::SurfaceLink(surface));
        state
            .surfaces
            .get(&surface)
            .copied()
            .ok_or(Error::UnknownSurface(surface))
    }

    fn monitor_work_area(&self, point: Point) -> Result<Rect> {
        let mut state = self.state.lock();
        state.ops.push(DisplayOp::WorkArea(point));
        let work_area = monitor_for(&state.monitors, point)
            .map(|m| m.work_area)
            .ok_or(Error::NoMonitor {
                x: point.x,
                y: point.y,
            })?;
        debug!(%point, %work_area, "virtual: work area");
        Ok(work_area)
    }

    fn window_size(&self, window: WindowId) -> Result<Size> {
        let mut state = self.state.lock();
        state.ops.push(DisplayOp::Size(window));
        Ok(state.window(window)?.size)
    }

    fn window_shadow(&self, window: WindowId) -> Result<Insets> {
        let mut state = self.state.lock();
        state.ops.push(DisplayOp::Shadow(window));
        Ok(state.window(window)?.shadow)
    }

    fn move_window(&self, window: WindowId, x: i32, y: i32) -> Result<()> {
        let mut state = self.state.lock();
        state.ops.push(DisplayOp::Move { window, x, y });
        state.window(window)?.position = Point::new(x, y);
        debug!(%window, x, y, "virtual: moved");
        Ok(())
    }
}
