//! Placement parameters for the anchor solver.
//!
//! [`AttachParams`] describes how a window should sit relative to an
//! attachment rectangle: which point of the rectangle and which point of the
//! window meet, which axes may flip, a fixed pixel offset, and an optional
//! callback that learns the final position.

use std::{
    any::Any,
    fmt::{Debug, Formatter, Result as FmtResult},
};

use serde::{Deserialize, Serialize};
use crate::{
    adapter::WindowId,
    callback::{CallbackContext, CallbackSlot},
    anchor::Anchor,
    geom::{Point, Rect},
    hints::FlipHints,
    report::Placement,
    space::CoordinateSpace,
};

/// Function invoked after a window has been moved into place.
pub type PositionCallback = Box<dyn Fn(&PositionEvent<'_>) + Send + Sync>;

/// Attachment rectangle together with the space it is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Rectangle the window is positioned relative to.
    pub rect: Rect,
    /// Coordinate space of `rect`.
    #[serde(default)]
    pub space: CoordinateSpace,
}

/// Everything a position callback learns about a finished placement.
pub struct PositionEvent<'a> {
    /// Window that was moved.
    pub window: WindowId,
    /// Parameters used for the placement.
    pub params: &'a AttachParams,
    /// Final coordinates, clamp offsets and flip flags.
    pub placement: Placement,
    /// Context registered with the callback, if any.
    pub context: Option<&'a (dyn Any + Send + Sync)>,
}

impl PositionEvent<'_> {
    /// Context downcast to `T`, if present and of that type.
    #[must_use]
    pub fn context_as<T: Any>(&self) -> Option<&T> {
        self.context.and_then(|ctx| ctx.downcast_ref::<T>())
    }
}

impl Debug for PositionEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PositionEvent")
            .field("window", &self.window)
            .field("placement", &self.placement)
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

/// Parameters describing where a window goes relative to an attachment
/// rectangle.
pub struct AttachParams {
    /// Attachment rectangle; required before solving.
    attachment: Option<Attachment>,
    /// Point on the attachment rectangle the window is aligned to.
    rect_anchor: Anchor,
    /// Point on the window aligned to `rect_anchor`.
    window_anchor: Anchor,
    /// Axes that may flip when the primary placement overflows.
    hints: FlipHints,
    /// Fixed displacement applied after anchor alignment.
    offset: Point,
    /// Position callback and its owned context.
    callback: CallbackSlot<dyn Fn(&PositionEvent<'_>) + Send + Sync>,
}

impl Default for AttachParams {
    fn default() -> Self {
        Self {
            attachment: None,
            rect_anchor: Anchor::BOTTOM_LEFT,
            window_anchor: Anchor::TOP_LEFT,
            hints: FlipHints::empty(),
            offset: Point::default(),
            callback: CallbackSlot::default(),
        }
    }
}

impl AttachParams {
    /// New parameters: no attachment, window's top-left on the rectangle's
    /// bottom-left, no flipping, no offset, no callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attachment rectangle and its coordinate space.
    pub fn set_attach_rect(&mut self, rect: Rect, space: CoordinateSpace) {
        self.attachment = Some(Attachment { rect, space });
    }

    /// Forget the attachment rectangle.
    pub fn clear_attach_rect(&mut self) {
        self.attachment = None;
    }

    /// Attachment rectangle and space, if set.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Whether an attachment rectangle has been set.
    #[must_use]
    pub const fn has_attach_rect(&self) -> bool {
        self.attachment.is_some()
    }

    /// Set the rectangle anchor and the window anchor.
    pub fn set_anchors(&mut self, rect_anchor: Anchor, window_anchor: Anchor) {
        self.rect_anchor = rect_anchor;
        self.window_anchor = window_anchor;
    }

    /// Rectangle anchor and window anchor.
    #[must_use]
    pub const fn anchors(&self) -> (Anchor, Anchor) {
        (self.rect_anchor, self.window_anchor)
    }

    /// Set the per-axis flip permissions.
    pub fn set_flip_hints(&mut self, hints: FlipHints) {
        self.hints = hints;
    }

    /// Per-axis flip permissions.
    #[must_use]
    pub const fn flip_hints(&self) -> FlipHints {
        self.hints
    }

    /// Set the fixed displacement applied after anchor alignment.
    pub fn set_offset(&mut self, dx: i32, dy: i32) {
        self.offset = Point::new(dx, dy);
    }

    /// Fixed displacement.
    #[must_use]
    pub const fn offset(&self) -> Point {
        self.offset
    }

    /// Register the function called once a window has been placed.
    ///
    /// Any previously registered context is released before `context` is
    /// stored.
    pub fn set_position_callback<F>(&mut self, callback: F, context: Option<CallbackContext>)
    where
        F: Fn(&PositionEvent<'_>) + Send + Sync + 'static,
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
    pub(crate) fn notify(&self, window: WindowId, placement: Placement) {
        let Some(callback) = self.callback.callback() else {
            return;
        };
        let event = PositionEvent {
            window,
            params: self,
            placement,
            context: self.callback.context(),
        };
        callback(&event);
    }
}

impl Debug for AttachParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AttachParams")
            .field("attachment", &self.attachment)
            .field("rect_anchor", &self.rect_anchor)
            .field("window_anchor", &self.window_anchor)
            .field("hints", &self.hints)
            .field("offset", &self.offset)
            .field("has_callback", &self.callback.is_set())
            .field("has_context", &self.callback.has_context())
            .finish()
    }
}
