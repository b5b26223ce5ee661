use super::{SolveInput, solve};
use crate::{
    anchor::Anchor,
    error::Error,
    geom::{Axis, Insets, Point, Rect, Size},
    hints::FlipHints,
    params::AttachParams,
    report::Placement,
    space::{CoordinateSpace, SurfaceId},
};

fn menu_params(hints: FlipHints) -> AttachParams {
    let mut p = AttachParams::new();
    p.set_attach_rect(Rect::new(100, 100, 50, 20), CoordinateSpace::Root);
    p.set_anchors(Anchor::BOTTOM, Anchor::TOP);
    p.set_flip_hints(hints);
    p
}

fn input(w: i32, h: i32, bounds: Rect) -> SolveInput {
    SolveInput::new(Size::new(w, h)).with_bounds(bounds)
}

#[test]
fn below_and_centred_when_it_fits() {
    let p = menu_params(FlipHints::FLIP);
    let got = solve(&p, &input(200, 100, Rect::new(0, 0, 400, 300))).unwrap();
    assert_eq!(
        got,
        Placement {
            x: 25,
            y: 120,
            ..Placement::default()
        }
    );
}

#[test]
fn flips_vertically_when_below_overflows() {
    let p = menu_params(FlipHints::FLIP_Y);
    let got = solve(&p, &input(200, 100, Rect::new(0, 0, 400, 150))).unwrap();
    assert_eq!(got.position(), Point::new(25, 0));
    assert!(got.flipped_y);
    assert!(!got.flipped_x);
    assert_eq!((got.offset_x, got.offset_y), (0, 0));
}

#[test]
fn disabled_hint_clamps_instead_of_flipping() {
    let p = menu_params(FlipHints::FLIP_X);
    let got = solve(&p, &input(200, 100, Rect::new(0, 0, 400, 150))).unwrap();
    assert!(!got.flipped_y);
    assert_eq!(got.y, 50);
    assert_eq!(got.offset_y, -70);
}

#[test]
fn flip_rejected_when_mirror_also_overflows() {
    let p = menu_params(FlipHints::FLIP_Y);
    // Below: 120 + 140 > 150. Above: 100 - 140 < 0.
    let got = solve(&p, &input(200, 140, Rect::new(0, 0, 400, 150))).unwrap();
    assert!(!got.flipped_y);
    assert_eq!(got.y, 10);
    assert_eq!(got.offset_y, -110);
}

#[test]
fn oversized_window_goes_to_nearer_edge() {
    let p = menu_params(FlipHints::FLIP);
    let b = Rect::new(0, 0, 400, 300);
    let got = solve(&p, &input(500, 100, b)).unwrap();
    // Primary x = 125 - 250 = -125, nearer to the right-aligned position.
    assert_eq!(got.x, b.x + b.width - 500);
    assert_eq!(got.offset_x, 25);
    assert!(!got.flipped_x);
}

#[test]
fn oversized_window_left_of_start_goes_to_start() {
    let mut p = menu_params(FlipHints::empty());
    p.set_attach_rect(Rect::new(390, 100, 10, 20), CoordinateSpace::Root);
    p.set_anchors(Anchor::BOTTOM_LEFT, Anchor::TOP_LEFT);
    let got = solve(&p, &input(500, 100, Rect::new(0, 0, 400, 300))).unwrap();
    assert_eq!(got.x, 0);
    assert_eq!(got.offset_x, -390);
}

#[test]
fn submenu_flips_to_the_left_with_mirrored_offset() {
    let mut p = AttachParams::new();
    p.set_attach_rect(Rect::new(350, 100, 40, 20), CoordinateSpace::Root);
    p.set_anchors(Anchor::TOP_RIGHT, Anchor::TOP_LEFT);
    p.set_offset(4, 0);
    p.set_flip_hints(FlipHints::FLIP);
    let got = solve(&p, &input(100, 50, Rect::new(0, 0, 400, 300))).unwrap();
    assert_eq!(got.position(), Point::new(246, 100));
    assert!(got.flipped_x);
    assert!(!got.flipped_y);
}

#[test]
fn vertical_offset_is_negated_on_flip() {
    let mut p = AttachParams::new();
    p.set_attach_rect(Rect::new(100, 200, 50, 20), CoordinateSpace::Root);
    p.set_anchors(Anchor::BOTTOM_LEFT, Anchor::TOP_LEFT);
    p.set_offset(0, 5);
    p.set_flip_hints(FlipHints::FLIP_Y);
    let got = solve(&p, &input(100, 100, Rect::new(0, 0, 400, 300))).unwrap();
    assert_eq!(got.y, 200 - 100 - 5);
    assert!(got.flipped_y);
}

#[test]
fn shadow_is_excluded_from_alignment() {
    let p = menu_params(FlipHints::empty());
    let shadow = Insets::uniform(10);
    let inp = input(200, 100, Rect::new(0, 0, 400, 300)).with_shadow(shadow);
    let got = solve(&p, &inp).unwrap();
    // Visual frame is 180x80 at (+10, +10): its top sits on y = 120 and it
    // is centred on x = 125.
    assert_eq!(got.position(), Point::new(25, 110));
    assert!(!got.clamped());
}

#[test]
fn shadow_may_extend_past_the_work_area() {
    let mut p = AttachParams::new();
    p.set_attach_rect(Rect::new(0, 0, 50, 20), CoordinateSpace::Root);
    p.set_anchors(Anchor::BOTTOM_LEFT, Anchor::TOP_LEFT);
    let inp = input(120, 80, Rect::new(0, 0, 400, 300)).with_shadow(Insets::uniform(10));
    let got = solve(&p, &inp).unwrap();
    assert_eq!(got.position(), Point::new(-10, 10));
    assert!(!got.clamped());
}

#[test]
fn origin_moves_the_attachment() {
    let mut p = AttachParams::new();
    p.set_attach_rect(
        Rect::new(10, 10, 20, 20),
        CoordinateSpace::Surface(SurfaceId::new(3)),
    );
    p.set_anchors(Anchor::BOTTOM_LEFT, Anchor::TOP_LEFT);
    let inp = SolveInput::new(Size::new(50, 50)).with_origin(Point::new(300, 200));
    let got = solve(&p, &inp).unwrap();
    assert_eq!(got.position(), Point::new(310, 230));
}

#[test]
fn without_bounds_nothing_flips_or_clamps() {
    let p = menu_params(FlipHints::FLIP);
    let got = solve(&p, &SolveInput::new(Size::new(5000, 5000))).unwrap();
    assert_eq!(got.position(), Point::new(125 - 2500, 120));
    assert!(!got.flipped_x && !got.flipped_y && !got.clamped());
}

#[test]
fn missing_attachment_is_rejected() {
    let p = AttachParams::new();
    let err = solve(&p, &SolveInput::new(Size::new(10, 10))).unwrap_err();
    assert_eq!(err, Error::MissingAttachRect);
}

#[test]
fn negative_window_size_is_rejected() {
    let p = menu_params(FlipHints::empty());
    let err = solve(&p, &SolveInput::new(Size::new(-1, 10))).unwrap_err();
    assert!(matches!(err, Error::NegativeExtent { what: "window", .. }));
}

#[test]
fn window_as_wide_as_i32_is_clamped_without_overflow() {
    let mut p = menu_params(FlipHints::FLIP);
    p.set_anchors(Anchor::BOTTOM_LEFT, Anchor::TOP_LEFT);
    let got = solve(&p, &input(i32::MAX, 100, Rect::new(0, 0, 400, 300))).unwrap();
    // Neither side fits; the start edge is the smaller move.
    assert_eq!(got.position(), Point::new(0, 120));
    assert_eq!(got.offset_x, -100);
    assert_eq!(got.ideal(), Point::new(100, 120));
    assert!(!got.flipped_x);

    p.set_anchors(Anchor::TOP_LEFT, Anchor::BOTTOM_LEFT);
    let got = solve(&p, &input(100, i32::MAX, Rect::new(0, 0, 400, 300))).unwrap();
    // Above the rectangle the window ends at y = 100; aligning its end with
    // the bottom of the work area is the smaller move.
    assert_eq!(got.position(), Point::new(100, 300 - i32::MAX));
    assert_eq!(got.offset_y, 200);
    assert_eq!(got.ideal(), Point::new(100, 100 - i32::MAX));
}

#[test]
fn coordinates_past_i32_are_an_error() {
    let mut p = AttachParams::new();
    p.set_attach_rect(Rect::new(i32::MAX - 10, 0, 10, 10), CoordinateSpace::Root);
    p.set_anchors(Anchor::BOTTOM_RIGHT, Anchor::TOP_LEFT);
    p.set_offset(100, 0);
    let err = solve(&p, &SolveInput::new(Size::new(10, 10))).unwrap_err();
    assert_eq!(
        err,
        Error::CoordinateOverflow {
            axis: Axis::X,
            value: i64::from(i32::MAX) + 100
        }
    );

    let far = SolveInput::new(Size::new(10, 10)).with_origin(Point::new(0, i32::MAX));
    p.set_offset(0, 0);
    p.set_attach_rect(Rect::new(0, 10, 10, 10), CoordinateSpace::Root);
    assert!(matches!(
        solve(&p, &far),
        Err(Error::CoordinateOverflow { axis: Axis::Y, .. })
    ));
}

#[test]
fn invalid_shadow_is_rejected() {
    let p = menu_params(FlipHints::FLIP);
    let bounds = Rect::new(0, 0, 400, 300);

    let negative = Insets::new(-30, 40, 40, 40);
    let err = solve(&p, &input(10, 10, bounds).with_shadow(negative)).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidShadow {
            insets: negative,
            size: Size::new(10, 10)
        }
    );

    let wider_than_window = Insets::uniform(6);
    assert!(matches!(
        solve(&p, &input(10, 10, bounds).with_shadow(wider_than_window)),
        Err(Error::InvalidShadow { .. })
    ));
    assert!(solve(&p, &input(12, 12, bounds).with_shadow(wider_than_window)).is_ok());
}
