use thiserror::Error;

use crate::{
    adapter::WindowId,
    geom::{Axis, Insets, Size},
    space::SurfaceId,
};

/// Errors that can occur while resolving or placing an attached window.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A solve was requested before an attachment rectangle was set.
    #[error("attachment rectangle not set")]
    MissingAttachRect,

    /// A rectangle or window size had a negative width or height.
    #[error("negative extent for {what}: {width}x{height}")]
    NegativeExtent {
        /// Which input carried the bad extent.
        what: &'static str,
        /// Offending width.
        width: i32,
        /// Offending height.
        height: i32,
    },

    /// Shadow insets were negative or larger than the window they belong to.
    #[error("invalid shadow ({insets}) for window {size}")]
    InvalidShadow {
        /// Offending insets.
        insets: Insets,
        /// Outer window size.
        size: Size,
    },

    /// A computed coordinate does not fit in pixel range.
    #[error("coordinate {value} on the {axis} axis is out of range")]
    CoordinateOverflow {
        /// Axis the coordinate belongs to.
        axis: Axis,
        /// Widened value that failed to narrow.
        value: i64,
    },

    /// The adapter does not know the surface.
    #[error("unknown surface {0}")]
    UnknownSurface(SurfaceId),

    /// Walking parent links returned to a surface already visited.
    #[error("surface parent chain loops at {0}")]
    SurfaceCycle(SurfaceId),

    /// The adapter does not know the window.
    #[error("unknown window {0}")]
    UnknownWindow(WindowId),

    /// No monitor could be found for a point.
    #[error("no monitor for point ({x},{y})")]
    NoMonitor {
        /// Absolute x-coordinate queried.
        x: i32,
        /// Absolute y-coordinate queried.
        y: i32,
    },
}

/// Result alias for placement operations.
pub type Result<T> = std::result::Result<T, Error>;
