//! Einzelnes kubisches Bézier-Segment.

use crate::error::{CurveError, Result};
use glam::DVec2;

/// Schritte für die Polylinien-Näherung der Bogenlänge.
pub const ARC_LENGTH_SAMPLES: usize = 256;

/// Kubisches Bézier-Segment aus vier aufgelösten Punkten.
///
/// `p0`/`p3` sind die Anker, `p1`/`p2` die Handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicSegment {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Gerades Segment (Handles auf den Ankern).
    pub fn line(start: DVec2, end: DVec2) -> Self {
        Self::new(start, start, end, end)
    }

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    ///
    /// Außerhalb von [0, 1] wird geklemmt; t = 0 und t = 1 liefern exakt P0 bzw. P3.
    pub fn evaluate(&self, t: f64) -> DVec2 {
        if t <= 0.0 {
            return self.p0;
        }
        if t >= 1.0 {
            return self.p3;
        }
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        inv2 * inv * self.p0
            + 3.0 * inv2 * t * self.p1
            + 3.0 * inv * t2 * self.p2
            + t2 * t * self.p3
    }

    /// Hodograph B'(t) = 3(1-t)²(P1-P0) + 6(1-t)t(P2-P1) + 3t²(P3-P2).
    ///
    /// Nicht normiert; Aufrufer leiten die Richtung per `atan2` ab.
    pub fn evaluate_tangent(&self, t: f64) -> DVec2 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        3.0 * inv * inv * (self.p1 - self.p0)
            + 6.0 * inv * t * (self.p2 - self.p1)
            + 3.0 * t * t * (self.p3 - self.p2)
    }

    /// Tangentenrichtung bei `t`, nie der Nullvektor solange das Segment Länge hat.
    ///
    /// Liegt ein Handle auf seinem Anker, verschwindet der Hodograph am Ende. Dann gilt
    /// die Richtung zum nächsten verschiedenen Kontrollpunkt, zuletzt die Sehne.
    pub fn direction(&self, t: f64) -> DVec2 {
        let tangent = self.evaluate_tangent(t);
        if tangent != DVec2::ZERO {
            return tangent;
        }
        let towards = if t <= 0.5 {
            self.p2 - self.p0
        } else {
            self.p3 - self.p1
        };
        if towards != DVec2::ZERO {
            towards
        } else {
            self.chord()
        }
    }

    /// Approximierte Bogenlänge über Polylinien-Segmente.
    pub fn arc_length(&self) -> f64 {
        let mut length = 0.0;
        let mut prev = self.p0;
        for i in 1..=ARC_LENGTH_SAMPLES {
            let p = self.evaluate(i as f64 / ARC_LENGTH_SAMPLES as f64);
            length += prev.distance(p);
            prev = p;
        }
        length
    }

    /// Sehnenvektor P3 - P0.
    pub fn chord(&self) -> DVec2 {
        self.p3 - self.p0
    }

    /// `true` wenn beide Handles exakt auf ihren Ankern liegen.
    pub fn is_degenerate_line(&self) -> bool {
        self.p1 == self.p0 && self.p2 == self.p3
    }
}

/// Baut ein Segment aus genau vier Punkten.
pub fn build_segment(points: &[DVec2]) -> Result<CubicSegment> {
    match *points {
        [p0, p1, p2, p3] => Ok(CubicSegment::new(p0, p1, p2, p3)),
        _ => Err(CurveError::InvalidSegment {
            count: points.len(),
        }),
    }
}
