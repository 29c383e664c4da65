//! Integrationstests für das komplette Layout:
//! - Standard-Hälfte aus den Default-Optionen
//! - Optionen aus TOML-Datei
//! - Spiegelung für die zweite Hand

use keycurve::engine::CurveError;
use keycurve::{KeyKind, KeyPlacement, Layout, LayoutOptions};
use std::path::Path;

fn default_layout() -> Layout {
    Layout::new(LayoutOptions::default()).expect("Standard-Layout muss berechenbar sein")
}

#[test]
fn test_thumb_keys_sit_below_matrix() {
    let layout = default_layout();
    let placements = layout.key_placements();

    let (thumb, matrix): (Vec<&KeyPlacement>, Vec<&KeyPlacement>) = placements
        .iter()
        .partition(|k| matches!(k.kind, KeyKind::Thumb { .. }));
    assert_eq!(matrix.len(), 24);
    assert_eq!(thumb.len(), 4);
    assert!(thumb.iter().all(|k| k.position.y < 0.0));
    assert!(matrix.iter().all(|k| k.position.y > 0.0));
    // Daumen-Tasten drehen sich entlang der Kurve nach unten
    assert!(thumb.windows(2).all(|w| w[1].angle < w[0].angle));
}

#[test]
fn test_outline_bounds_contain_all_keys() {
    let geometry = default_layout().geometry();
    let (min, max) = geometry.bounds().expect("Umriss darf nicht leer sein");

    for key in &geometry.placements {
        let p = key.position;
        assert!(p.x > min.x && p.x < max.x, "{:?} außerhalb", key.kind);
        assert!(p.y > min.y && p.y < max.y, "{:?} außerhalb", key.kind);
    }
}

#[test]
fn test_layout_from_toml_fixture() {
    let layout = Layout::from_file(Path::new("tests/fixtures/three_row_layout.toml"))
        .expect("Fixture muss ein gültiges Layout ergeben");

    assert_eq!(layout.options().rows, 3);
    assert_eq!(layout.matrix().columns(), 5);
    assert_eq!(layout.thumb_cluster().key_count(), 3);
    assert_eq!(layout.key_placements().len(), 15 + 3);
    assert_eq!(layout.thumb_cluster().target_length(), 39.0);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let layout = Layout::from_file(Path::new("tests/fixtures/gibt_es_nicht.toml")).unwrap();
    assert_eq!(layout.options(), &LayoutOptions::default());
    assert_eq!(layout.key_placements().len(), 28);
}

#[test]
fn test_engine_error_is_kept_in_chain() {
    let options = LayoutOptions {
        precision: 0.0,
        ..LayoutOptions::default()
    };
    let err = Layout::new(options).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurveError>(),
        Some(CurveError::InvalidPrecision { .. })
    ));
}

#[test]
fn test_mirrored_half() {
    let layout = default_layout();
    let left = layout.geometry();
    let right = layout.mirrored(160.0);

    assert_eq!(right.placements.len(), left.placements.len());
    assert_eq!(right.outline.len(), left.outline.len());
    for (l, r) in left.placements.iter().zip(&right.placements) {
        assert!((l.position.x + r.position.x - 320.0).abs() < 1e-9);
        assert_eq!(l.position.y, r.position.y);
        assert_eq!(l.kind, r.kind);
    }
    assert_eq!(right.outline.first().map(|p| p.y), left.outline.last().map(|p| p.y));

    let back = right.mirrored(160.0);
    for (a, b) in left.outline.iter().zip(&back.outline) {
        assert!(a.distance(*b) < 1e-9);
    }
}
