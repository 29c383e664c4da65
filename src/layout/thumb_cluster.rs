//! Daumen-Cluster: Tasten gleichmäßig entlang einer skalierten Bézier-Kurve.

use super::{KeyKind, KeyPlacement};
use crate::shared::LayoutOptions;
use anyhow::Context;
use glam::DVec2;
use keycurve_engine::{
    redistribute, AnchorFrame, Closure, Curve, SampledPolyline, WaypointSequence,
};

/// Daumen-Tasten entlang einer Kurve.
///
/// Die Kurve läuft entlang der Unterkante der Keycaps. Ihre gesampelte Polyline wird
/// auf die Ziellänge `(N - 1) · (Keycap-Breite + Abstand)` skaliert und nach
/// `thumb_position` verschoben.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbCluster {
    keycap: DVec2,
    offset: f64,
    target_length: f64,
    polyline: SampledPolyline,
    frames: Vec<AnchorFrame>,
}

impl ThumbCluster {
    pub fn new(options: &LayoutOptions) -> anyhow::Result<Self> {
        let sequence = WaypointSequence::from_knots(&options.thumb_curve, Closure::Open);
        let curve = Curve::from_sequence(&sequence).context("Daumen-Kurve ungültig")?;

        let curve_length = curve.arc_length();
        anyhow::ensure!(
            curve_length > 0.0,
            "Daumen-Kurve hat keine Länge ({} Segmente)",
            curve.segment_count()
        );

        let target_length = options.thumb_target_length();
        let scale = target_length / curve_length;
        let polyline = curve
            .sample(options.precision)
            .context("Daumen-Kurve konnte nicht gesampelt werden")?
            .transformed(scale, DVec2::from(options.thumb_position));

        let frames = redistribute(&polyline, options.thumb_key_count, target_length)
            .context("Daumen-Tasten konnten nicht verteilt werden")?;

        log::debug!(
            "Daumen-Cluster: {} Tasten, Kurve skaliert um {:.3} auf {:.1}",
            frames.len(),
            scale,
            target_length
        );

        Ok(Self {
            keycap: options.keycap(),
            offset: options.shell_offset,
            target_length,
            polyline,
            frames,
        })
    }

    pub fn key_count(&self) -> usize {
        self.frames.len()
    }

    pub fn target_length(&self) -> f64 {
        self.target_length
    }

    /// Skalierte und verschobene Kurve.
    pub fn polyline(&self) -> &SampledPolyline {
        &self.polyline
    }

    /// Frames auf der Kurve, einer pro Taste.
    pub fn key_frames(&self) -> &[AnchorFrame] {
        &self.frames
    }

    /// Punkt relativ zur Tastenmitte, gedreht mit der Taste; dazu deren Winkel.
    pub fn key_coord(
        &self,
        index: usize,
        tangent_offset: f64,
        perpendicular_offset: f64,
    ) -> Option<(DVec2, f64)> {
        let frame = self.frames.get(index)?;
        Some((
            self.frame_point(frame, tangent_offset, perpendicular_offset),
            frame.angle,
        ))
    }

    fn frame_point(
        &self,
        frame: &AnchorFrame,
        tangent_offset: f64,
        perpendicular_offset: f64,
    ) -> DVec2 {
        // Kurve liegt an der Unterkante, Tastenmitte eine halbe Höhe darüber
        frame.offset(tangent_offset, perpendicular_offset + self.keycap.y / 2.0)
    }

    fn first_frame(&self) -> &AnchorFrame {
        &self.frames[0]
    }

    fn last_frame(&self) -> &AnchorFrame {
        &self.frames[self.frames.len() - 1]
    }

    /// Halbe Keycap plus Rand, entlang und senkrecht zur Kurve.
    fn corner_offsets(&self) -> DVec2 {
        self.keycap / 2.0 + DVec2::splat(self.offset)
    }

    pub fn top_left(&self) -> DVec2 {
        let o = self.corner_offsets();
        self.frame_point(self.first_frame(), -o.x, o.y)
    }

    pub fn top_right(&self) -> DVec2 {
        let o = self.corner_offsets();
        self.frame_point(self.last_frame(), o.x, o.y)
    }

    pub fn bottom_left(&self) -> DVec2 {
        let o = self.corner_offsets();
        self.frame_point(self.first_frame(), -o.x, -o.y)
    }

    pub fn bottom_right(&self) -> DVec2 {
        let o = self.corner_offsets();
        self.frame_point(self.last_frame(), o.x, -o.y)
    }

    /// Untere Begrenzung des Clusters: Kurve um den Rand nach außen versetzt,
    /// in umgekehrter Richtung (schließt den Umriss im Uhrzeigersinn).
    ///
    /// An scharfen Enden liefert das Sampling die Richtung zum nächsten Kontrollpunkt,
    /// die Normale bleibt dort definiert.
    pub fn shape(&self) -> SampledPolyline {
        self.polyline
            .iter()
            .map(|(point, tangent)| {
                let normal = DVec2::from_angle(tangent.y.atan2(tangent.x)).perp();
                (point - normal * self.offset, tangent)
            })
            .collect::<SampledPolyline>()
            .reversed()
    }

    pub fn shape_points(&self) -> Vec<DVec2> {
        self.shape().into_parts().0
    }

    pub fn switch_holes(&self) -> Vec<KeyPlacement> {
        self.frames
            .iter()
            .enumerate()
            .map(|(index, frame)| KeyPlacement {
                position: self.frame_point(frame, 0.0, 0.0),
                angle: frame.angle,
                kind: KeyKind::Thumb { index },
            })
            .collect()
    }
}
