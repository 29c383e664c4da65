//! Gleichmäßige Verteilung von Anker-Frames nach Bogenlänge.
//!
//! Der erste und letzte Frame liegen exakt auf den Endpunkten der Polyline.
//! Dazwischen wird jeder Frame `k` bei der laufenden Länge `k · D` mit
//! `D = L / (N - 1)` platziert, linear zwischen den zwei umgebenden Samples
//! interpoliert (Position und Tangente).
//!
//! Grenzfall: fällt `k · D` exakt auf ein Sample, gehört der Frame zum
//! FOLGENDEN Polyline-Segment (halboffenes Intervall `[start, ende)`, `t = 0`).

use crate::error::{CurveError, Result};
use crate::sampler::SampledPolyline;
use glam::DVec2;

/// Position plus Ausrichtung eines verteilten Objekts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorFrame {
    pub position: DVec2,
    /// Interpolierte (rohe) Tangente
    pub tangent: DVec2,
    /// Richtung der Tangente in Radiant (`atan2(y, x)`)
    pub angle: f64,
    /// Index des Polyline-Segments, in dem interpoliert wurde
    pub segment: usize,
    /// Lokaler Interpolations-Parameter innerhalb des Segments
    pub t: f64,
}

impl AnchorFrame {
    fn new(position: DVec2, tangent: DVec2, segment: usize, t: f64) -> Self {
        Self {
            position,
            tangent,
            angle: tangent.y.atan2(tangent.x),
            segment,
            t,
        }
    }

    fn interpolate(a: (DVec2, DVec2), b: (DVec2, DVec2), segment: usize, t: f64) -> Self {
        Self::new(a.0.lerp(b.0, t), a.1.lerp(b.1, t), segment, t)
    }

    /// Einheitsvektor in Tangentenrichtung.
    pub fn direction(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    /// Einheitsvektor senkrecht zur Tangente (links davon).
    pub fn normal(&self) -> DVec2 {
        self.direction().perp()
    }

    /// Punkt relativ zum Frame: entlang der Tangente und senkrecht dazu versetzt.
    pub fn offset(&self, tangent_offset: f64, perpendicular_offset: f64) -> DVec2 {
        self.position + self.direction() * tangent_offset + self.normal() * perpendicular_offset
    }
}

/// Akkumulator für den Lauf über die Polyline-Segmente.
///
/// Wird durch `fold` gereicht; hält die bisher gelaufene Länge, das nächste
/// Ziel `k` und die bereits platzierten Frames.
#[derive(Debug, Clone)]
struct ArcWalk {
    travelled: f64,
    next_target: usize,
    frames: Vec<AnchorFrame>,
}

impl ArcWalk {
    fn new(first: AnchorFrame, capacity: usize) -> Self {
        let mut frames = Vec::with_capacity(capacity);
        frames.push(first);
        Self {
            travelled: 0.0,
            next_target: 1,
            frames,
        }
    }

    /// Verarbeitet ein Polyline-Segment `a → b` und platziert alle Ziele in `[start, ende)`.
    fn step(
        mut self,
        segment: usize,
        a: (DVec2, DVec2),
        b: (DVec2, DVec2),
        spacing: f64,
        last_target: usize,
    ) -> Self {
        let seg_len = a.0.distance(b.0);
        let start = self.travelled;
        let end = start + seg_len;

        if seg_len > 0.0 {
            while self.next_target <= last_target {
                let target = self.next_target as f64 * spacing;
                if target >= end {
                    break;
                }
                let t = ((target - start) / seg_len).clamp(0.0, 1.0);
                self.frames.push(AnchorFrame::interpolate(a, b, segment, t));
                self.next_target += 1;
            }
        }

        self.travelled = end;
        self
    }
}

/// Verteilt `count` Frames gleichmäßig entlang der Polyline.
///
/// `target_length` ist die gewünschte Gesamtlänge L (z.B. Tastenabstand × (N - 1)).
/// Ist die Polyline so kurz, dass das letzte Zwischenziel nicht mehr vor ihrem Ende
/// liegt, wird der Abstand auf `Polyline-Länge / (N - 1)` reduziert.
pub fn redistribute(
    polyline: &SampledPolyline,
    count: usize,
    target_length: f64,
) -> Result<Vec<AnchorFrame>> {
    if count < 1 || !(target_length.is_finite() && target_length > 0.0) {
        return Err(CurveError::DegenerateRedistribution {
            count,
            target_length,
        });
    }

    let (first_point, first_tangent) = polyline.first().ok_or(CurveError::EmptyPolyline)?;
    let first = AnchorFrame::new(first_point, first_tangent, 0, 0.0);
    if count == 1 {
        return Ok(vec![first]);
    }
    if polyline.len() < 2 {
        return Err(CurveError::EmptyPolyline);
    }

    let points = polyline.points();
    let tangents = polyline.tangents();
    let last_segment = points.len() - 2;
    let last_target = count - 2;

    let mut spacing = target_length / (count - 1) as f64;
    let available = polyline.length();
    if last_target > 0 && last_target as f64 * spacing >= available {
        log::warn!(
            "Polyline ({:.3}) kürzer als Ziellänge {:.3}: Abstand wird auf {} Frames angepasst",
            available,
            target_length,
            count
        );
        spacing = available / (count - 1) as f64;
    }

    let walk = (0..=last_segment).fold(ArcWalk::new(first, count), |walk, i| {
        walk.step(
            i,
            (points[i], tangents[i]),
            (points[i + 1], tangents[i + 1]),
            spacing,
            last_target,
        )
    });
    let mut frames = walk.frames;

    let last = AnchorFrame::new(
        points[last_segment + 1],
        tangents[last_segment + 1],
        last_segment,
        1.0,
    );
    // Nur bei Rundungsfehlern am Polyline-Ende: fehlende Ziele auf den Endpunkt legen
    if frames.len() < count - 1 {
        log::warn!(
            "{} Zwischen-Frames jenseits des Polyline-Endes, auf Endpunkt gelegt",
            count - 1 - frames.len()
        );
        frames.resize(count - 1, last);
    }
    frames.push(last);

    log::debug!(
        "{} Frames verteilt, Abstand {:.4} über {} Polyline-Segmente",
        frames.len(),
        spacing,
        last_segment + 1
    );
    Ok(frames)
}

#[cfg(test)]
mod tests;
