use super::*;

#[test]
fn stroke_zero_width_is_hairline() {
    let s = StrokeStyle::stroke(0.0);
    assert!(s.is_hairline_style());
    assert_eq!(s.width, 0.0);

    let s = StrokeStyle::stroke(f64::NAN);
    assert!(s.is_hairline_style());
}

#[test]
fn set_stroke_and_fill_keeps_width() {
    let mut s = StrokeStyle::fill();
    s.set_stroke(3.0, true);
    assert_eq!(s.style, PaintStyle::StrokeAndFill);
    assert_eq!(s.width, 3.0);
    s.set_fill();
    assert!(s.is_fill_style());
    assert_eq!(s.width, 0.0);
}

#[test]
fn inflation_radius_accounts_for_join_and_cap() {
    let butt_bevel = StrokeStyle::stroke(4.0).with_join(StrokeJoin::Bevel);
    assert_eq!(butt_bevel.inflation_radius(), 2.0);

    let miter = StrokeStyle::stroke(4.0).with_miter_limit(3.0);
    assert_eq!(miter.inflation_radius(), 6.0);

    let square = StrokeStyle::stroke(4.0)
        .with_join(StrokeJoin::Round)
        .with_cap(StrokeCap::Square);
    assert!((square.inflation_radius() - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-12);

    assert_eq!(StrokeStyle::fill().inflation_radius(), 0.0);
}

#[test]
fn style_deserializes_with_defaults() {
    let s: StrokeStyle =
        serde_json::from_value(serde_json::json!({ "style": "stroke", "width": 2.0 })).unwrap();
    assert_eq!(s.style, PaintStyle::Stroke);
    assert_eq!(s.cap, StrokeCap::Butt);
    assert_eq!(s.miter_limit, 4.0);
    assert_eq!(s.measure_res_scale(), 1.0);
}
