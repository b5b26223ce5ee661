use proptest::prelude::*;

use super::{SolveInput, solve};
use crate::{
    anchor::Anchor,
    geom::{Insets, Point, Rect, Size},
    hints::FlipHints,
    params::AttachParams,
    space::CoordinateSpace,
};

fn anchor_strategy() -> impl Strategy<Value = Anchor> {
    (0usize..Anchor::ALL.len()).prop_map(|i| Anchor::ALL[i])
}

fn hints_strategy() -> impl Strategy<Value = FlipHints> {
    (0u32..4).prop_map(FlipHints::from_bits_truncate)
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..1500, -500i32..1500, 0i32..200, 0i32..200)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn bounds_strategy() -> impl Strategy<Value = Rect> {
    (-200i32..200, -200i32..200, 1i32..1600, 1i32..1200)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn shadow_strategy() -> impl Strategy<Value = Insets> {
    (0i32..24, 0i32..24, 0i32..24, 0i32..24).prop_map(|(t, l, r, b)| Insets::new(t, l, r, b))
}

/// Generated parameters plus solve input.
#[derive(Debug, Clone, Copy)]
struct Case {
    rect: Rect,
    rect_anchor: Anchor,
    window_anchor: Anchor,
    hints: FlipHints,
    offset: Point,
    input: SolveInput,
}

impl Case {
    fn params(&self) -> AttachParams {
        self.params_with(self.hints)
    }

    fn params_with(&self, hints: FlipHints) -> AttachParams {
        let mut p = AttachParams::new();
        p.set_attach_rect(self.rect, CoordinateSpace::Root);
        p.set_anchors(self.rect_anchor, self.window_anchor);
        p.set_flip_hints(hints);
        p.set_offset(self.offset.x, self.offset.y);
        p
    }

    fn padded(&self) -> Option<Rect> {
        self.input.bounds.map(|b| b.outset(&self.input.shadow))
    }
}

fn case_strategy() -> impl Strategy<Value = Case> {
    (
        rect_strategy(),
        anchor_strategy(),
        anchor_strategy(),
        hints_strategy(),
        (-60i32..60, -60i32..60),
        // Shadows are at most 23px per edge, so both edges always fit.
        (46i32..1800, 46i32..1400),
        shadow_strategy(),
        bounds_strategy(),
    )
        .prop_map(
            |(rect, rect_anchor, window_anchor, hints, (dx, dy), (w, h), shadow, bounds)| Case {
                rect,
                rect_anchor,
                window_anchor,
                hints,
                offset: Point::new(dx, dy),
                input: SolveInput::new(Size::new(w, h))
                    .with_shadow(shadow)
                    .with_bounds(bounds),
            },
        )
}

proptest! {
    #[test]
    fn solving_twice_is_identical(case in case_strategy()) {
        let p = case.params();
        let a = solve(&p, &case.input).unwrap();
        let b = solve(&p, &case.input).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fitting_windows_stay_inside_padded_bounds(case in case_strategy()) {
        let padded = case.padded().unwrap();
        let size = case.input.size;
        let got = solve(&case.params(), &case.input).unwrap();
        if size.width <= padded.width {
            prop_assert!(padded.left() <= got.x && got.x + size.width <= padded.right(), "{got} in {padded}");
        }
        if size.height <= padded.height {
            prop_assert!(padded.top() <= got.y && got.y + size.height <= padded.bottom(), "{got} in {padded}");
        }
    }

    #[test]
    fn no_flip_when_primary_already_fits(case in case_strategy()) {
        let padded = case.padded().unwrap();
        let size = case.input.size;
        let unflipped = solve(&case.params_with(FlipHints::empty()), &case.input).unwrap();
        let got = solve(&case.params_with(FlipHints::FLIP), &case.input).unwrap();
        // With the window no larger than the span, a zero clamp offset means
        // the primary candidate already fit.
        if size.width <= padded.width && unflipped.offset_x == 0 {
            prop_assert!(!got.flipped_x);
            prop_assert_eq!(got.x, unflipped.x);
        }
        if size.height <= padded.height && unflipped.offset_y == 0 {
            prop_assert!(!got.flipped_y);
            prop_assert_eq!(got.y, unflipped.y);
        }
    }

    #[test]
    fn offsets_account_for_clamping_exactly(case in case_strategy()) {
        let unbounded = SolveInput { bounds: None, ..case.input };
        let primary = solve(&case.params(), &unbounded).unwrap();
        let got = solve(&case.params(), &case.input).unwrap();
        // Unflipped axes start from the primary candidate; flipped axes are
        // only adopted when they fit, so they never need clamping.
        let ideal = got.ideal();
        if got.flipped_x {
            prop_assert_eq!(got.offset_x, 0);
        } else {
            prop_assert_eq!(ideal.x, primary.x);
        }
        if got.flipped_y {
            prop_assert_eq!(got.offset_y, 0);
        } else {
            prop_assert_eq!(ideal.y, primary.y);
        }
    }

    #[test]
    fn disabled_hints_never_flip(case in case_strategy()) {
        let got = solve(&case.params_with(FlipHints::empty()), &case.input).unwrap();
        prop_assert!(!got.flipped_x);
        prop_assert!(!got.flipped_y);
        let only_x = solve(&case.params_with(FlipHints::FLIP_X), &case.input).unwrap();
        prop_assert!(!only_x.flipped_y);
        let only_y = solve(&case.params_with(FlipHints::FLIP_Y), &case.input).unwrap();
        prop_assert!(!only_y.flipped_x);
    }

    #[test]
    fn oversized_windows_sit_on_an_edge(case in case_strategy()) {
        let padded = case.padded().unwrap();
        let size = case.input.size;
        let got = solve(&case.params(), &case.input).unwrap();
        if size.width > padded.width {
            prop_assert!(got.x == padded.left() || got.x == padded.right() - size.width);
        }
        if size.height > padded.height {
            prop_assert!(got.y == padded.top() || got.y == padded.bottom() - size.height);
        }
    }
}
