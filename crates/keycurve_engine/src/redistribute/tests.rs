use super::*;
use crate::curve::{build_curve, Closure};
use crate::handle::{Handle, Waypoint};
use approx::assert_abs_diff_eq;
use std::f64::consts::FRAC_PI_4;

fn polyline(samples: &[((f64, f64), (f64, f64))]) -> SampledPolyline {
    samples
        .iter()
        .map(|&((px, py), (tx, ty))| (DVec2::new(px, py), DVec2::new(tx, ty)))
        .collect()
}

/// Daumen-Kurve aus dem Standard-Layout.
fn thumb_waypoints() -> [Waypoint; 4] {
    [
        Waypoint::Anchor(DVec2::new(0.0, 0.0)),
        Waypoint::Handle(Handle::Polar {
            radius: 3.0,
            angle_deg: -5.0,
        }),
        Waypoint::Handle(Handle::Polar {
            radius: 3.0,
            angle_deg: 125.0,
        }),
        Waypoint::Anchor(DVec2::new(7.0, -4.0)),
    ]
}

/// Bogenlängen-Position eines Frames entlang der Polyline.
fn arc_position(poly: &SampledPolyline, frame: &AnchorFrame) -> f64 {
    let lengths: Vec<f64> = poly.segment_lengths().collect();
    let before: f64 = lengths[..frame.segment].iter().sum();
    before + frame.t * lengths[frame.segment]
}

// ── Endpunkte ──

#[test]
fn test_endpoints_are_exact_for_all_counts() {
    let poly = build_curve(&thumb_waypoints(), 0.02, Closure::Open).unwrap();
    let length = poly.length();
    for count in 2..=9 {
        let frames = redistribute(&poly, count, length).unwrap();
        assert_eq!(frames.len(), count);
        assert_eq!(frames[0].position, poly.points()[0]);
        assert_eq!(frames[count - 1].position, *poly.points().last().unwrap());
        assert_eq!(frames[0].t, 0.0);
        assert_eq!(frames[count - 1].t, 1.0);
        assert_eq!(frames[count - 1].segment, poly.len() - 2);
    }
}

#[test]
fn test_thumb_scenario_four_keys() {
    let poly = build_curve(&thumb_waypoints(), 0.02, Closure::Open).unwrap();
    let frames = redistribute(&poly, 4, 18.0).unwrap();

    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0].position, DVec2::new(0.0, 0.0));
    assert_eq!(frames[3].position, DVec2::new(7.0, -4.0));

    let positions: Vec<f64> = frames.iter().map(|f| arc_position(&poly, f)).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    for frame in &frames[1..3] {
        assert_ne!(frame.position, frames[0].position);
        assert_ne!(frame.position, frames[3].position);
    }
}

#[test]
fn test_single_frame_sits_on_start() {
    let poly = polyline(&[((1.0, 2.0), (0.0, 1.0)), ((5.0, 2.0), (1.0, 0.0))]);
    let frames = redistribute(&poly, 1, 4.0).unwrap();

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].position, DVec2::new(1.0, 2.0));
    assert_abs_diff_eq!(frames[0].angle, std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_single_frame_on_single_sample() {
    let poly = polyline(&[((1.0, 2.0), (1.0, 0.0))]);
    let frames = redistribute(&poly, 1, 1.0).unwrap();
    assert_eq!(frames[0].position, DVec2::new(1.0, 2.0));
}

// ── Abstände ──

#[test]
fn test_interior_frames_are_spaced_by_arc_length() {
    let poly = build_curve(&thumb_waypoints(), 0.01, Closure::Open).unwrap();
    let length = poly.length();
    let count = 5;
    let frames = redistribute(&poly, count, length).unwrap();
    let spacing = length / (count - 1) as f64;

    for (k, frame) in frames.iter().enumerate() {
        assert_abs_diff_eq!(arc_position(&poly, frame), k as f64 * spacing, epsilon = 1e-9);
    }
}

#[test]
fn test_spacing_converges_with_precision() {
    let reference_poly = build_curve(&thumb_waypoints(), 1e-4, Closure::Open).unwrap();
    let target = 8.0;
    let reference = redistribute(&reference_poly, 4, target).unwrap();

    for &p in &[0.05, 0.02, 0.01] {
        let poly = build_curve(&thumb_waypoints(), p, Closure::Open).unwrap();
        let frames = redistribute(&poly, 4, target).unwrap();
        for (frame, expected) in frames.iter().zip(&reference) {
            let error = frame.position.distance(expected.position);
            assert!(error < p, "p={p}: Abweichung {error}");
        }
    }
}

#[test]
fn test_consecutive_distances_converge_on_scaled_thumb_curve() {
    let count = 4;
    let target = 57.0;
    let expected = target / (count - 1) as f64;
    let mut previous_error = f64::INFINITY;

    for &p in &[0.05, 0.01, 0.002] {
        let raw = build_curve(&thumb_waypoints(), p, Closure::Open).unwrap();
        let poly = raw.transformed(target / raw.length(), DVec2::ZERO);
        let frames = redistribute(&poly, count, target).unwrap();

        let error = frames
            .windows(2)
            .map(|w| (w[0].position.distance(w[1].position) - expected).abs())
            .fold(0.0, f64::max);
        // Sehne zwischen zwei Tasten ist etwas kürzer als der Bogen (≈ 0.084)
        assert!(error < 0.1, "p={p}: Abweichung {error}");
        assert!(error <= previous_error + 1e-9, "p={p}: {error} > {previous_error}");
        previous_error = error;
    }
}

#[test]
fn test_straight_line_distances_equal_spacing() {
    // Gerade mit ungleichmäßiger Parametrisierung (Handles nahe den Ankern)
    let wps = [
        Waypoint::Anchor(DVec2::new(0.0, 0.0)),
        Waypoint::Handle(Handle::Relative(DVec2::new(1.0, 0.0))),
        Waypoint::Handle(Handle::Relative(DVec2::new(-1.0, 0.0))),
        Waypoint::Anchor(DVec2::new(10.0, 0.0)),
    ];
    let poly = build_curve(&wps, 0.01, Closure::Open).unwrap();
    let frames = redistribute(&poly, 6, 10.0).unwrap();

    for pair in frames.windows(2) {
        assert_abs_diff_eq!(pair[0].position.distance(pair[1].position), 2.0, epsilon = 1e-9);
    }
}

#[test]
fn test_several_frames_within_one_polyline_segment() {
    let poly = polyline(&[((0.0, 0.0), (10.0, 0.0)), ((10.0, 0.0), (10.0, 0.0))]);
    let frames = redistribute(&poly, 6, 10.0).unwrap();

    let xs: Vec<f64> = frames.iter().map(|f| f.position.x).collect();
    for (x, expected) in xs.iter().zip([0.0, 2.0, 4.0, 6.0, 8.0, 10.0]) {
        assert_abs_diff_eq!(*x, expected, epsilon = 1e-12);
    }
    assert!(frames.iter().all(|f| f.segment == 0));
}

// ── Grenzfälle ──

#[test]
fn test_exact_multiple_belongs_to_following_segment() {
    // D = 1: Ziele 1 und 2 fallen exakt auf Samples
    let poly = polyline(&[
        ((0.0, 0.0), (1.0, 0.0)),
        ((1.0, 0.0), (1.0, 1.0)),
        ((2.0, 0.0), (1.0, 2.0)),
        ((3.0, 0.0), (1.0, 3.0)),
    ]);
    let frames = redistribute(&poly, 4, 3.0).unwrap();

    assert_eq!(frames.len(), 4);
    assert_eq!(frames[1].segment, 1);
    assert_eq!(frames[1].t, 0.0);
    assert_eq!(frames[1].position, DVec2::new(1.0, 0.0));
    assert_eq!(frames[1].tangent, DVec2::new(1.0, 1.0));
    assert_eq!(frames[2].segment, 2);
    assert_eq!(frames[2].t, 0.0);
    assert_eq!(frames[2].position, DVec2::new(2.0, 0.0));
    assert_eq!(frames[3].segment, 2);
    assert_eq!(frames[3].t, 1.0);
}

#[test]
fn test_short_polyline_shrinks_spacing() {
    let poly = polyline(&[((0.0, 0.0), (1.0, 0.0)), ((10.0, 0.0), (1.0, 0.0))]);
    let frames = redistribute(&poly, 3, 30.0).unwrap();

    assert_eq!(frames.len(), 3);
    assert_abs_diff_eq!(frames[1].position.x, 5.0, epsilon = 1e-12);
    assert_eq!(frames[2].position, DVec2::new(10.0, 0.0));
}

#[test]
fn test_zero_length_segments_are_skipped() {
    let poly = polyline(&[
        ((0.0, 0.0), (1.0, 0.0)),
        ((0.0, 0.0), (1.0, 0.0)),
        ((4.0, 0.0), (1.0, 0.0)),
    ]);
    let frames = redistribute(&poly, 3, 4.0).unwrap();

    assert_eq!(frames[1].segment, 1);
    assert_abs_diff_eq!(frames[1].position.x, 2.0, epsilon = 1e-12);
}

#[test]
fn test_angle_from_interpolated_tangent() {
    let poly = polyline(&[((0.0, 0.0), (1.0, 0.0)), ((2.0, 0.0), (0.0, 1.0))]);
    let frames = redistribute(&poly, 3, 2.0).unwrap();

    assert_abs_diff_eq!(frames[1].t, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(frames[1].angle, FRAC_PI_4, epsilon = 1e-12);
    assert_abs_diff_eq!(frames[0].angle, 0.0);
    assert_abs_diff_eq!(frames[2].angle, std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_frame_offset_follows_tangent_and_normal() {
    let poly = polyline(&[((0.0, 0.0), (0.0, 2.0)), ((0.0, 4.0), (0.0, 2.0))]);
    let frames = redistribute(&poly, 2, 4.0).unwrap();

    // Tangente zeigt nach +y, Normale nach -x
    let p = frames[0].offset(1.0, 2.0);
    assert_abs_diff_eq!(p.x, -2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
}

#[test]
fn test_sharp_start_handle_keeps_first_angle() {
    let wps = [
        Waypoint::Anchor(DVec2::new(0.0, 0.0)),
        Waypoint::Handle(Handle::Sharp),
        Waypoint::Handle(Handle::Relative(DVec2::new(0.0, 5.0))),
        Waypoint::Anchor(DVec2::new(10.0, 0.0)),
    ];
    let poly = build_curve(&wps, 0.01, Closure::Open).unwrap();
    let frames = redistribute(&poly, 3, poly.length()).unwrap();

    assert_abs_diff_eq!(frames[0].angle, 0.5f64.atan(), epsilon = 1e-12);
    assert_abs_diff_eq!(frames[2].angle, -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(frames[0].normal().length(), 1.0, epsilon = 1e-12);
}

// ── Fehler ──

#[test]
fn test_degenerate_inputs_fail() {
    let poly = polyline(&[((0.0, 0.0), (1.0, 0.0)), ((1.0, 0.0), (1.0, 0.0))]);

    assert_eq!(
        redistribute(&poly, 0, 1.0),
        Err(CurveError::DegenerateRedistribution {
            count: 0,
            target_length: 1.0
        })
    );
    for bad in [0.0, -1.0, f64::INFINITY] {
        assert!(matches!(
            redistribute(&poly, 3, bad),
            Err(CurveError::DegenerateRedistribution { .. })
        ));
    }
    assert!(matches!(
        redistribute(&poly, 3, f64::NAN),
        Err(CurveError::DegenerateRedistribution { .. })
    ));
}

#[test]
fn test_too_few_samples_fail() {
    let empty = SampledPolyline::new();
    let single = polyline(&[((0.0, 0.0), (1.0, 0.0))]);

    assert_eq!(redistribute(&empty, 1, 1.0), Err(CurveError::EmptyPolyline));
    assert_eq!(redistribute(&single, 2, 1.0), Err(CurveError::EmptyPolyline));
}
