//! Scenario files: everything needed to run one placement, in RON.
//!
//! ```ron
//! (
//!     attach: (x: 100, y: 100, width: 50, height: 20),
//!     rect_anchor: "bottom-center",
//!     window_anchor: "top-center",
//!     flip_y: true,
//!     window: (width: 200, height: 100),
//!     bounds: (x: 0, y: 0, width: 400, height: 150),
//! )
//! ```

use std::{fs, path::Path};

use ron::{Options, extensions::Extensions};
use serde::Deserialize;
use tether::{
    Anchor, AttachParams, CoordinateSpace, FlipHints, Insets, Monitor, Point, Rect, Size,
    SolveInput, SurfaceId, SurfaceLink, VirtualDisplay, VirtualWindowConfig, WindowId,
    rules::{AttachRule, RuleParams},
};
use tracing::debug;

use crate::error::{Error, Result};

/// One surface in the virtual display's hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceSpec {
    /// Surface identifier referenced by `space`.
    pub id: SurfaceId,
    /// Link to the surface's parent or its absolute origin.
    pub link: SurfaceLink,
}

/// Inputs specific to the rule-based strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleSpec {
    /// Absolute origin of the attachment rectangle.
    pub origin: Point,
    /// Space left around the attachment rectangle.
    pub attach_margin: Insets,
    /// Space left around the window.
    pub window_margin: Insets,
    /// Space between the window frame and its contents.
    pub window_padding: Insets,
    /// Primary rules, in priority order.
    pub primary: Vec<AttachRule>,
    /// Secondary rules, in priority order.
    pub secondary: Vec<AttachRule>,
}

/// A placement scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Attachment rectangle.
    pub attach: Rect,
    /// Space `attach` is expressed in.
    #[serde(default)]
    pub space: CoordinateSpace,
    /// Point on the attachment rectangle.
    #[serde(default = "default_rect_anchor")]
    pub rect_anchor: Anchor,
    /// Point on the window.
    #[serde(default = "default_window_anchor")]
    pub window_anchor: Anchor,
    /// Allow a horizontal flip.
    #[serde(default)]
    pub flip_x: bool,
    /// Allow a vertical flip.
    #[serde(default)]
    pub flip_y: bool,
    /// Fixed offset after alignment.
    #[serde(default)]
    pub offset: Point,
    /// Outer window size, shadow included.
    pub window: Size,
    /// Window shadow insets.
    #[serde(default)]
    pub shadow: Insets,
    /// Work area for `solve` and `rules`.
    #[serde(default)]
    pub bounds: Option<Rect>,
    /// Monitors for `place`; defaults to one monitor covering `bounds`.
    #[serde(default)]
    pub monitors: Vec<Monitor>,
    /// Surface hierarchy for `place`.
    #[serde(default)]
    pub surfaces: Vec<SurfaceSpec>,
    /// Rule-based strategy inputs.
    #[serde(default)]
    pub rules: Option<RuleSpec>,
}

fn default_rect_anchor() -> Anchor {
    AttachParams::default().anchors().0
}

fn default_window_anchor() -> Anchor {
    AttachParams::default().anchors().1
}

impl Scenario {
    /// Parse a scenario from RON text.
    pub fn parse(text: &str) -> Result<Self> {
        let options = Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .with_default_extension(Extensions::UNWRAP_VARIANT_NEWTYPES);
        Ok(options.from_str(text)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let scenario = Self::parse(&text)?;
        debug!(path = %path.display(), "scenario: loaded");
        Ok(scenario)
    }

    /// Anchor-solver parameters.
    pub fn attach_params(&self) -> AttachParams {
        let mut params = AttachParams::new();
        params.set_attach_rect(self.attach, self.space);
        params.set_anchors(self.rect_anchor, self.window_anchor);
        params.set_flip_hints(FlipHints::from_axes(self.flip_x, self.flip_y));
        params.set_offset(self.offset.x, self.offset.y);
        params
    }

    /// Solver input for a window whose attachment origin is `origin`.
    pub const fn solve_input(&self, origin: Point) -> SolveInput {
        SolveInput {
            origin,
            size: self.window,
            shadow: self.shadow,
            bounds: self.bounds,
        }
    }

    /// Rule-based parameters, if the scenario has a `rules` section.
    pub fn rule_params(&self) -> Result<RuleParams> {
        let spec = self.rules.as_ref().ok_or(Error::MissingRules)?;
        let mut params = RuleParams::new();
        params.set_attach_origin(spec.origin.x, spec.origin.y);
        params.set_attach_rect(Some(self.attach));
        params.set_attach_margin(Some(spec.attach_margin));
        params.set_window_margin(Some(spec.window_margin));
        params.set_window_padding(Some(spec.window_padding));
        params.set_window_offset(self.offset.x, self.offset.y);
        params.add_primary_rules(spec.primary.iter().copied());
        params.add_secondary_rules(spec.secondary.iter().copied());
        Ok(params)
    }

    /// Virtual display holding the scenario's monitors, surfaces and window.
    pub fn display(&self) -> (VirtualDisplay, WindowId) {
        let display = VirtualDisplay::new();
        if self.monitors.is_empty() {
            if let Some(bounds) = self.bounds {
                display.add_monitor(Monitor::full(bounds));
            }
        } else {
            for monitor in &self.monitors {
                display.add_monitor(*monitor);
            }
        }
        for surface in &self.surfaces {
            display.add_surface(surface.id, surface.link);
        }
        let window = display.new_window(VirtualWindowConfig {
            size: self.window,
            shadow: self.shadow,
            position: Point::default(),
        });
        (display, window)
    }
}
