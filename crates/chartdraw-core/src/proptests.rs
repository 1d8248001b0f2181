use super::*;
use proptest::prelude::*;

fn finite_point() -> impl Strategy<Value = Point> {
    (-1.0e6..1.0e6f64, -1.0e6..1.0e6f64).prop_map(|(x, y)| Point::new(x, y))
}

fn color() -> impl Strategy<Value = Color> {
    (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64)
        .prop_map(|(r, g, b, a)| Color::rgba(r, g, b, a))
}

fn line_style() -> impl Strategy<Value = LineStyle> {
    (
        0.0..20.0f64,
        color(),
        prop::collection::vec(0.0..10.0f64, 0..4),
        prop_oneof![Just(LineCap::Butt), Just(LineCap::Round), Just(LineCap::Square)],
        prop_oneof![Just(LineJoin::Miter), Just(LineJoin::Round), Just(LineJoin::Bevel)],
    )
        .prop_map(|(width, color, dashes, cap, join)| LineStyle {
            width,
            color,
            dashes,
            cap,
            join,
        })
}

// Property: pixel-grid alignment is idempotent for both alignment functions
proptest! {
    #[test]
    fn prop_pixel_grid_idempotent(p in finite_point()) {
        let env = RenderEnvironment::pixel_grid();

        let once = env.align_point(p);
        prop_assert_eq!(env.align_point(once), once);

        let once = env.align_coord(p);
        prop_assert_eq!(env.align_coord(once), once);
    }
}

// Property: the identity environment never moves a point
proptest! {
    #[test]
    fn prop_identity_leaves_points_alone(p in finite_point()) {
        let env = RenderEnvironment::identity();
        prop_assert_eq!(env.align_point(p), p);
        prop_assert_eq!(env.align_coord(p), p);
    }
}

// Property: the innermost line style wins and leaving it restores the outer one
proptest! {
    #[test]
    fn prop_line_scopes_nest(outer in line_style(), inner in line_style()) {
        let mut state = DrawState::new(RenderEnvironment::identity());
        let before = state.resolved_line_style();

        state.enter(ScopeFrame::Line(outer.clone())).unwrap();
        state.enter(ScopeFrame::Line(inner.clone())).unwrap();
        prop_assert_eq!(state.resolved_line_style(), inner);

        state.exit().unwrap();
        prop_assert_eq!(state.resolved_line_style(), outer);

        state.exit().unwrap();
        prop_assert_eq!(state.resolved_line_style(), before);
        prop_assert_eq!(state.depth(), 0);
    }
}

// Property: a scoped line style beats any source colour around or inside it
proptest! {
    #[test]
    fn prop_line_style_beats_source_color(style in line_style(), source in color()) {
        let mut state = DrawState::new(RenderEnvironment::identity());

        state.enter(ScopeFrame::SourceColor(source)).unwrap();
        prop_assert_eq!(state.stroke_color(), source);
        state.enter(ScopeFrame::Line(style.clone())).unwrap();
        prop_assert_eq!(state.stroke_color(), style.color);
        state.enter(ScopeFrame::SourceColor(source)).unwrap();
        prop_assert_eq!(state.stroke_color(), style.color);
    }
}
