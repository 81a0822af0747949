use super::*;
use kurbo::{PathEl, Shape};

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x0, y0));
    p.line_to((x1, y1));
    p
}

fn square(size: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((size, 0.0));
    p.line_to((size, size));
    p.line_to((0.0, size));
    p.close_path();
    p
}

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn line_length_and_segment() {
    let p = line(0.0, 0.0, 30.0, 40.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    assert!(m.has_contour());
    assert_eq!(m.length(), 50.0);
    assert!(!m.is_closed());

    let mut dst = BezPath::new();
    assert!(m.get_segment(10.0, 20.0, &mut dst, true));
    let els = dst.elements();
    assert_eq!(els.len(), 2);
    let PathEl::MoveTo(a) = els[0] else {
        panic!("expected move_to")
    };
    let PathEl::LineTo(b) = els[1] else {
        panic!("expected line_to")
    };
    assert!(approx(a.x, 6.0, 1e-9) && approx(a.y, 8.0, 1e-9));
    assert!(approx(b.x, 12.0, 1e-9) && approx(b.y, 16.0, 1e-9));
}

#[test]
fn closed_square_includes_closing_edge() {
    let p = square(10.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    assert!(m.is_closed());
    assert_eq!(m.length(), 40.0);

    // The last 15 units run along the top edge and down the closing edge.
    let mut dst = BezPath::new();
    assert!(m.get_segment(25.0, 40.0, &mut dst, true));
    assert_eq!(
        dst.elements(),
        &[
            PathEl::MoveTo(Point::new(5.0, 10.0)),
            PathEl::LineTo(Point::new(0.0, 10.0)),
            PathEl::LineTo(Point::new(0.0, 0.0)),
        ]
    );
}

#[test]
fn force_closed_adds_closing_edge() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((10.0, 0.0));
    p.line_to((10.0, 10.0));
    let open = ArcLengthMeasure::new(&p, false, 1.0);
    let closed = ArcLengthMeasure::new(&p, true, 1.0);
    assert_eq!(open.length(), 20.0);
    assert!(closed.is_closed());
    assert!(approx(closed.length(), 20.0 + 200f64.sqrt(), 1e-9));
}

#[test]
fn walks_contours_in_order() {
    let mut p = line(0.0, 0.0, 10.0, 0.0);
    p.move_to((0.0, 5.0));
    p.line_to((0.0, 25.0));
    let mut m = ArcLengthMeasure::new(&p, false, 1.0);
    assert_eq!(m.length(), 10.0);
    assert!(m.next_contour());
    assert_eq!(m.length(), 20.0);
    assert_eq!(m.start_point(), Some(Point::new(0.0, 5.0)));
    assert!(!m.next_contour());
    assert_eq!(m.length(), 0.0);
    assert!(!m.has_contour());
    assert!(!m.next_contour());
}

#[test]
fn empty_path_has_no_contour() {
    let p = BezPath::new();
    let mut m = ArcLengthMeasure::new(&p, false, 1.0);
    assert!(!m.has_contour());
    assert_eq!(m.length(), 0.0);
    assert!(!m.next_contour());
    let mut dst = BezPath::new();
    assert!(!m.get_segment(0.0, 1.0, &mut dst, true));
    assert!(dst.elements().is_empty());
}

#[test]
fn zero_length_contour_is_visited_but_yields_nothing() {
    let p = line(5.0, 5.0, 5.0, 5.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    assert!(m.has_contour());
    assert_eq!(m.length(), 0.0);
    assert_eq!(m.start_point(), Some(Point::new(5.0, 5.0)));
    let mut dst = BezPath::new();
    assert!(!m.get_segment(0.0, 0.0, &mut dst, true));
    assert_eq!(m.pos_tan(0.0), None);
}

#[test]
fn non_finite_contour_ends_iteration() {
    let mut p = line(0.0, 0.0, f64::INFINITY, 0.0);
    p.move_to((0.0, 0.0));
    p.line_to((1.0, 0.0));
    let mut m = ArcLengthMeasure::new(&p, false, 1.0);
    assert!(!m.has_contour());
    assert!(!m.next_contour());
}

#[test]
fn rejects_inverted_and_nan_ranges() {
    let p = line(0.0, 0.0, 10.0, 0.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    let mut dst = BezPath::new();
    assert!(!m.get_segment(6.0, 5.0, &mut dst, true));
    assert!(!m.get_segment(f64::NAN, 5.0, &mut dst, true));
    assert!(dst.elements().is_empty());

    // Out-of-range requests are clamped.
    assert!(m.get_segment(-5.0, 50.0, &mut dst, true));
    assert_eq!(
        dst.elements(),
        &[
            PathEl::MoveTo(Point::new(0.0, 0.0)),
            PathEl::LineTo(Point::new(10.0, 0.0)),
        ]
    );
}

#[test]
fn zero_length_request_emits_zero_length_line() {
    let p = line(0.0, 0.0, 10.0, 0.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    let mut dst = BezPath::new();
    assert!(m.get_segment(4.0, 4.0, &mut dst, true));
    assert_eq!(
        dst.elements(),
        &[
            PathEl::MoveTo(Point::new(4.0, 0.0)),
            PathEl::LineTo(Point::new(4.0, 0.0)),
        ]
    );
}

#[test]
fn curves_keep_their_verb_type() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.quad_to((50.0, 100.0), (100.0, 0.0));
    p.curve_to((120.0, -50.0), (180.0, -50.0), (200.0, 0.0));
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    let exact = p.perimeter(1e-6);
    assert!(approx(m.length(), exact, exact * 1e-2), "{} vs {exact}", m.length());

    let mut dst = BezPath::new();
    let len = m.length();
    assert!(m.get_segment(len * 0.25, len * 0.75, &mut dst, true));
    let els = dst.elements();
    assert!(matches!(els[0], PathEl::MoveTo(_)));
    assert!(matches!(els[1], PathEl::QuadTo(..)));
    assert!(matches!(els[2], PathEl::CurveTo(..)));
    assert_eq!(els.len(), 3);

    let sub_len = dst.perimeter(1e-6);
    assert!(approx(sub_len, len * 0.5, len * 0.02), "{sub_len}");
}

#[test]
fn full_range_reproduces_source_exactly() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((10.0, 0.0));
    p.quad_to((20.0, 10.0), (10.0, 20.0));
    p.curve_to((5.0, 25.0), (0.0, 20.0), (0.0, 10.0));
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    let mut dst = BezPath::new();
    assert!(m.get_segment(0.0, m.length(), &mut dst, true));
    assert_eq!(dst.elements(), p.elements());
}

#[test]
fn continuation_without_move_to() {
    let p = line(0.0, 0.0, 10.0, 0.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    let mut dst = BezPath::new();
    assert!(m.get_segment(0.0, 3.0, &mut dst, true));
    assert!(m.get_segment(3.0, 6.0, &mut dst, false));
    assert_eq!(dst.elements().len(), 3);
    assert!(matches!(dst.elements()[2], PathEl::LineTo(_)));
}

#[test]
fn pos_tan_on_line_and_curve() {
    let p = line(0.0, 0.0, 0.0, 10.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    let (pos, tan) = m.pos_tan(2.5).unwrap();
    assert_eq!(pos, Point::new(0.0, 2.5));
    assert_eq!(tan, Vec2::new(0.0, 1.0));

    let mut q = BezPath::new();
    q.move_to((0.0, 0.0));
    q.quad_to((5.0, 10.0), (10.0, 0.0));
    let m = ArcLengthMeasure::new(&q, false, 1.0);
    let (mid, tan) = m.pos_tan(m.length() / 2.0).unwrap();
    assert!(approx(mid.x, 5.0, 0.05));
    assert!(approx(tan.hypot(), 1.0, 1e-9));
    assert!(tan.y.abs() < 0.05);
}

#[test]
fn visible_range_tracks_cull_bounds() {
    let p = line(0.0, 0.0, 1000.0, 0.0);
    let m = ArcLengthMeasure::new(&p, false, 1.0);
    // Straight pieces are clipped exactly, widened by the flattening tolerance.
    let (lo, hi) = m.visible_range(Rect::new(100.0, -5.0, 200.0, 5.0)).unwrap();
    assert!(approx(lo, 99.5, 1e-9) && approx(hi, 200.5, 1e-9), "{lo} {hi}");

    let mut poly = BezPath::new();
    poly.move_to((0.0, 0.0));
    for i in 1..=10 {
        poly.line_to((f64::from(i) * 100.0, 0.0));
    }
    let m = ArcLengthMeasure::new(&poly, false, 1.0);
    let (lo, hi) = m.visible_range(Rect::new(250.0, -5.0, 350.0, 5.0)).unwrap();
    assert!(approx(lo, 249.5, 1e-9) && approx(hi, 350.5, 1e-9), "{lo} {hi}");

    // Curved pieces contribute their whole range.
    let mut q = BezPath::new();
    q.move_to((0.0, 0.0));
    q.quad_to((50.0, 0.0), (100.0, 0.0));
    let m = ArcLengthMeasure::new(&q, false, 1.0);
    let (lo, hi) = m.visible_range(Rect::new(40.0, -1.0, 60.0, 1.0)).unwrap();
    assert!(lo <= 40.0 && hi >= 60.0);
    assert_eq!(m.visible_range(Rect::new(0.0, 50.0, 100.0, 60.0)), None);
}

#[test]
fn finer_res_scale_tightens_curve_length() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.curve_to((0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
    let exact = p.perimeter(1e-9);
    let coarse = ArcLengthMeasure::new(&p, false, 0.01).length();
    let fine = ArcLengthMeasure::new(&p, false, 10.0).length();
    assert!((exact - fine).abs() <= (exact - coarse).abs());
    assert!(fine <= exact + 1e-9);
}
