//! Gehäuse-Umriss um Matrix, Panel und Daumen-Cluster.

use super::{KeyMatrix, ThumbCluster};
use anyhow::Context;
use glam::DVec2;
use keycurve_engine::{Closure, Curve, Handle, Knot, SampledPolyline, WaypointSequence};

/// Umriss des Gehäuses als geschlossenes Polygon.
///
/// Der Rand wird im Uhrzeigersinn beschrieben, beginnend unten links am Daumen-Cluster,
/// über die linke Seite und die obere Kante bis zum Panel und zurück zur rechten
/// Seite des Daumen-Clusters. Die Unterkante des Clusters schließt das Polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellOutline {
    knots: Vec<Knot>,
    boundary: SampledPolyline,
    polygon: Vec<DVec2>,
}

impl ShellOutline {
    pub fn new(
        matrix: &KeyMatrix,
        thumb: &ThumbCluster,
        keycap: DVec2,
        shell_offset: f64,
        precision: f64,
        dedup_tolerance: f64,
    ) -> anyhow::Result<Self> {
        let knots = boundary_knots(matrix, thumb, keycap, shell_offset);
        let sequence = WaypointSequence::from_knots(&knots, Closure::Open);
        let boundary = Curve::from_sequence(&sequence)
            .and_then(|curve| curve.sample(precision))
            .context("Gehäuse-Umriss konnte nicht berechnet werden")?;

        let mut outline = boundary.clone();
        outline.append(&mut thumb.shape());
        let polygon = outline.dedup(dedup_tolerance).into_parts().0;

        log::debug!(
            "Gehäuse-Umriss: {} Knoten, {} Polygon-Punkte",
            knots.len(),
            polygon.len()
        );

        Ok(Self {
            knots,
            boundary,
            polygon,
        })
    }

    /// Wegpunkte des Rands (ohne Daumen-Unterkante).
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Gesampelter Rand ohne Daumen-Unterkante.
    pub fn boundary(&self) -> &SampledPolyline {
        &self.boundary
    }

    /// Geschlossenes Polygon; der letzte Punkt ist implizit mit dem ersten verbunden.
    pub fn polygon(&self) -> &[DVec2] {
        &self.polygon
    }
}

fn boundary_knots(
    matrix: &KeyMatrix,
    thumb: &ThumbCluster,
    keycap: DVec2,
    shell_offset: f64,
) -> Vec<Knot> {
    let top_row = matrix.rows().saturating_sub(1);
    let bottom_left = matrix.key_position(0, 0, false);
    let top_left = matrix.key_position(top_row, 0, false);
    let top_mid = matrix.key_position(top_row, 3, false);
    let panel_top = matrix.panel_top();
    let panel_left = matrix.panel_left();
    let panel_right = matrix.panel_right();
    let so = shell_offset;

    vec![
        Knot::new(thumb.bottom_left(), Handle::Sharp, Handle::Relative(DVec2::new(0.0, 15.0))),
        Knot::new(
            bottom_left + DVec2::new(2.0 * keycap.y, -so),
            Handle::Relative(DVec2::new(5.0, 0.0)),
            Handle::Sharp,
        ),
        Knot::corner(bottom_left - DVec2::splat(so)),
        Knot::new(
            top_left + DVec2::new(-so, keycap.y + so),
            Handle::Sharp,
            Handle::Relative(DVec2::new(25.0, 0.0)),
        ),
        Knot::new(
            top_mid + DVec2::new(0.0, keycap.y + so),
            Handle::Relative(DVec2::new(-25.0, 0.0)),
            Handle::Sharp,
        ),
        Knot::new(
            top_mid + keycap + DVec2::new(0.0, so),
            Handle::Sharp,
            Handle::Polar {
                radius: 15.0,
                angle_deg: 0.0,
            },
        ),
        Knot::new(
            DVec2::new(panel_left, panel_top),
            Handle::Polar {
                radius: 15.0,
                angle_deg: 180.0,
            },
            Handle::Sharp,
        ),
        Knot::corner(DVec2::new(panel_right, panel_top)),
        Knot::new(
            DVec2::new(panel_right, 0.0),
            Handle::Sharp,
            Handle::Relative(DVec2::new(0.0, -8.0)),
        ),
        Knot::new(
            thumb.top_right(),
            Handle::Polar {
                radius: 12.0,
                angle_deg: 125.0,
            },
            Handle::Sharp,
        ),
        Knot::corner(thumb.bottom_right()),
    ]
}
