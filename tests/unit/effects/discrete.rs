use super::*;
use kurbo::{PathEl, Point, Shape};

fn line(len: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((len, 0.0));
    p
}

fn stroke() -> StrokeStyle {
    StrokeStyle::stroke(1.0)
}

#[test]
fn rejects_bad_parameters() {
    assert!(DiscreteEffect::new(0.0, 1.0, 0).is_err());
    assert!(DiscreteEffect::new(1.0 / 8192.0, 1.0, 0).is_err());
    assert!(DiscreteEffect::new(f64::NAN, 1.0, 0).is_err());
    assert!(DiscreteEffect::new(5.0, f64::INFINITY, 0).is_err());
    assert!(DiscreteEffect::new(5.0, -2.0, 0).is_ok());
}

#[test]
fn chops_a_line_into_jittered_pieces() {
    let d = DiscreteEffect::new(10.0, 3.0, 0).unwrap();
    let out = d.filter(&line(100.0), &stroke()).unwrap();
    let els = out.elements();
    assert_eq!(els.len(), 11);
    assert!(matches!(els[0], PathEl::MoveTo(_)));
    for (i, el) in els.iter().enumerate() {
        let p = match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p,
            _ => panic!("unexpected {el:?}"),
        };
        // Sample points advance by 10 along x; only y is displaced.
        assert!((p.x - 10.0 * i as f64).abs() < 1e-9, "{p:?}");
        assert!(p.y.abs() <= 3.0);
    }
    assert!(els.iter().any(|el| match el {
        PathEl::LineTo(p) => p.y != 0.0,
        _ => false,
    }));
}

#[test]
fn same_seed_same_output() {
    let d = DiscreteEffect::new(4.0, 2.0, 7).unwrap();
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.quad_to((50.0, 80.0), (100.0, 0.0));
    let a = d.filter(&p, &stroke()).unwrap();
    let b = d.filter(&p, &stroke()).unwrap();
    assert_eq!(a, b);

    let other = DiscreteEffect::new(4.0, 2.0, 8).unwrap();
    let c = other.filter(&p, &stroke()).unwrap();
    assert_ne!(a, c);
}

#[test]
fn short_contours_pass_through() {
    let d = DiscreteEffect::new(10.0, 3.0, 0).unwrap();
    let out = d.filter(&line(15.0), &stroke()).unwrap();
    assert_eq!(out, line(15.0));
}

#[test]
fn closed_contours_start_half_a_piece_in() {
    let mut sq = BezPath::new();
    sq.move_to((0.0, 0.0));
    sq.line_to((40.0, 0.0));
    sq.line_to((40.0, 40.0));
    sq.line_to((0.0, 40.0));
    sq.close_path();

    let d = DiscreteEffect::new(10.0, 0.0, 0).unwrap();
    let out = d.filter(&sq, &stroke()).unwrap();
    let els = out.elements();
    // 16 pieces: one move, 15 lines and a close.
    assert_eq!(els.len(), 17);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(5.0, 0.0)));
    assert_eq!(els[16], PathEl::ClosePath);
}

#[test]
fn fill_style_force_closes() {
    let mut open = BezPath::new();
    open.move_to((0.0, 0.0));
    open.line_to((40.0, 0.0));
    open.line_to((40.0, 40.0));
    let d = DiscreteEffect::new(5.0, 1.0, 0).unwrap();
    let out = d.filter(&open, &StrokeStyle::fill()).unwrap();
    assert_eq!(out.elements().last().copied(), Some(PathEl::ClosePath));
}

#[test]
fn output_stays_within_fast_bounds() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.curve_to((20.0, 60.0), (80.0, 60.0), (100.0, 0.0));
    let d = DiscreteEffect::new(3.0, 4.0, 0).unwrap();
    let out = d.filter(&p, &stroke()).unwrap();

    let mut bounds = p.bounding_box();
    assert!(d.compute_fast_bounds(&mut bounds));
    let got = out.bounding_box();
    assert!(bounds.x0 <= got.x0 && bounds.y0 <= got.y0);
    assert!(got.x1 <= bounds.x1 && got.y1 <= bounds.y1);
}
