//! Solve and apply: query the adapter, run the anchor solver, move the
//! window and report the result.

use tracing::{debug, warn};

use crate::{
    adapter::{DisplayAdapter, WindowId},
    error::{Error, Result},
    metrics::PLACEMENT_COUNTERS,
    params::AttachParams,
    report::Placement,
    solve::{SolveInput, solve},
};

/// Place `window` according to `params`.
///
/// The work area is that of the monitor under the centre of the attachment
/// rectangle. After the window has been moved the position callback, if
/// any, is invoked with the final placement.
pub fn place_window<A>(adapter: &A, params: &AttachParams, window: WindowId) -> Result<Placement>
where
    A: DisplayAdapter + ?Sized,
{
    match place_inner(adapter, params, window) {
        Ok(placement) => {
            let notified = params.has_position_callback();
            params.notify(window, placement);
            PLACEMENT_COUNTERS.record_placed(notified);
            Ok(placement)
        }
        Err(err) => {
            warn!(%window, error = %err, "place: failed");
            PLACEMENT_COUNTERS.record_failure();
            Err(err)
        }
    }
}

fn place_inner<A>(adapter: &A, params: &AttachParams, window: WindowId) -> Result<Placement>
where
    A: DisplayAdapter + ?Sized,
{
    let attachment = params.attachment().ok_or(Error::MissingAttachRect)?;
    let origin = adapter.resolve_absolute_origin(attachment.space)?;
    let center = origin.offset_by(attachment.rect.center());
    let bounds = adapter.monitor_work_area(center)?;
    let size = adapter.window_size(window)?;
    let shadow = adapter.window_shadow(window)?;
    debug!(%window, %origin, %center, %bounds, %size, "place: inputs");

    let input = SolveInput {
        origin,
        size,
        shadow,
        bounds: Some(bounds),
    };
    let placement = solve(params, &input)?;
    adapter.move_window(window, placement.x, placement.y)?;
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{
        adapter::{DisplayOp, Monitor, VirtualDisplay, VirtualWindowConfig},
        anchor::Anchor,
        geom::{Point, Rect},
        hints::FlipHints,
        space::{CoordinateSpace, SurfaceId, SurfaceLink},
    };

    fn display() -> VirtualDisplay {
        VirtualDisplay::new().with_monitor(Monitor::full(Rect::new(0, 0, 400, 300)))
    }

    fn menu() -> AttachParams {
        let mut p = AttachParams::new();
        p.set_attach_rect(Rect::new(100, 100, 50, 20), CoordinateSpace::Root);
        p.set_anchors(Anchor::BOTTOM, Anchor::TOP);
        p.set_flip_hints(FlipHints::FLIP);
        p
    }

    #[test]
    fn queries_once_then_moves() {
        let d = display();
        let w = d.new_window(VirtualWindowConfig::sized(200, 100));
        let got = place_window(&d, &menu(), w).unwrap();
        assert_eq!(got.position(), Point::new(25, 120));
        assert_eq!(d.window_position(w), Some(Point::new(25, 120)));
        assert_eq!(
            d.operations(),
            vec![
                DisplayOp::WorkArea(Point::new(125, 110)),
                DisplayOp::Size(w),
                DisplayOp::Shadow(w),
                DisplayOp::Move {
                    window: w,
                    x: 25,
                    y: 120
                },
            ]
        );
    }

    #[test]
    fn callback_sees_final_placement_after_move() {
        let d = Arc::new(display());
        let w = d.new_window(VirtualWindowConfig::sized(200, 100));
        let calls = Arc::new(AtomicUsize::new(0));
        let mut p = menu();
        {
            let calls = Arc::clone(&calls);
            let seen_display = Arc::clone(&d);
            p.set_position_callback(
                move |ev| {
                    assert_eq!(ev.window, w);
                    assert_eq!(ev.placement.position(), Point::new(25, 120));
                    assert_eq!(ev.context_as::<&str>(), Some(&"menu"));
                    assert_eq!(seen_display.window_position(ev.window), Some(ev.placement.position()));
                    calls.fetch_add(1, Ordering::SeqCst);
                },
                Some(Box::new("menu")),
            );
        }
        place_window(d.as_ref(), &p, w).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn surface_origin_is_resolved_first() {
        let d = display();
        let s = SurfaceId::new(4);
        d.add_surface(s, SurfaceLink::Absolute(Point::new(20, 30)));
        let w = d.new_window(VirtualWindowConfig::sized(50, 50));
        let mut p = AttachParams::new();
        p.set_attach_rect(Rect::new(10, 10, 20, 20), CoordinateSpace::Surface(s));
        let got = place_window(&d, &p, w).unwrap();
        assert_eq!(got.position(), Point::new(30, 60));
        assert_eq!(d.operations()[0], DisplayOp::SurfaceLink(s));
    }

    #[test]
    fn errors_leave_window_in_place() {
        let d = display();
        let w = d.new_window(VirtualWindowConfig::sized(10, 10));
        assert_eq!(
            place_window(&d, &AttachParams::new(), w),
            Err(Error::MissingAttachRect)
        );
        assert!(d.operations().is_empty());

        let ghost = WindowId::new(1234);
        assert_eq!(place_window(&d, &menu(), ghost), Err(Error::UnknownWindow(ghost)));
        assert_eq!(d.window_position(w), Some(Point::default()));
    }
}
