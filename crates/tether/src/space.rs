//! Coordinate spaces for attachment rectangles.
//!
//! An attachment rectangle is either in absolute (root) coordinates or in
//! the coordinates of some surface. Surfaces may nest: each one is placed at
//! an offset inside a parent, until a surface with a known absolute origin
//! is reached. Resolution walks that chain once per placement.

use std::{
    collections::HashSet,
    fmt::{Display, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{Error, Result},
    geom::Point,
};

/// Identifier of a surface (a window or sub-window) that defines a
/// coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Wrap a raw identifier.
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

impl Display for SurfaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "surface#{}", self.0)
    }
}

/// Coordinate space in which an attachment rectangle is expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// Absolute root coordinates.
    #[default]
    Root,
    /// Relative to the origin of a surface.
    Surface(SurfaceId),
}

/// One step up a surface's ancestor chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceLink {
    /// The surface's origin is known in absolute coordinates.
    Absolute(Point),
    /// The surface sits at `offset` inside `parent`.
    Parent {
        /// Enclosing surface.
        parent: SurfaceId,
        /// Origin of this surface in the parent's coordinates.
        offset: Point,
    },
}

/// Resolve the absolute origin of `space`.
///
/// `link` answers one step of the chain. Offsets are summed until an
/// absolute origin is found. A surface seen twice is a cycle.
pub fn resolve_origin<F>(space: CoordinateSpace, mut link: F) -> Result<Point>
where
    F: FnMut(SurfaceId) -> Result<SurfaceLink>,
{
    let CoordinateSpace::Surface(start) = space else {
        return Ok(Point::default());
    };
    let mut seen = HashSet::new();
    let mut acc = Point::default();
    let mut current = start;
    loop {
        if !seen.insert(current) {
            return Err(Error::SurfaceCycle(current));
        }
        match link(current)? {
            SurfaceLink::Absolute(origin) => {
                let resolved = acc.offset_by(origin);
                trace!(%start, depth = seen.len(), origin = %resolved, "space: resolved");
                return Ok(resolved);
            }
            SurfaceLink::Parent { parent, offset } => {
                acc = acc.offset_by(offset);
                current = parent;
            }
        }
    }
}
