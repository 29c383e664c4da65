//! Stückweise kubische Kurve aus einer Wegpunkt-Folge.

use crate::bezier::{build_segment, CubicSegment};
use crate::error::{CurveError, Result};
use crate::handle::{resolve_handles, Waypoint, WaypointSequence};
use crate::sampler::{check_precision, sample_segment, SampledPolyline};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offene oder geschlossene Kurve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Closure {
    /// Länge 3k + 1, endet auf einem Anker
    #[default]
    Open,
    /// Länge 3k, letztes Segment läuft zurück zum ersten Anker
    Closed,
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Closure::Open => write!(f, "offene"),
            Closure::Closed => write!(f, "geschlossene"),
        }
    }
}

/// Ein Segment der Kurve samt Trivial-Flag (reine Gerade).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegment {
    pub cubic: CubicSegment,
    /// Alle Handles SHARP bzw. auf dem Anker: wird als Gerade behandelt
    pub trivial: bool,
}

impl CurveSegment {
    /// Bogenlänge; triviale Segmente nutzen die Sehne.
    pub fn length(&self) -> f64 {
        if self.trivial {
            self.cubic.chord().length()
        } else {
            self.cubic.arc_length()
        }
    }

    /// Sampelt das Segment. Triviale Segmente liefern nur ihre zwei Endpunkte.
    pub fn sample(&self, precision: f64) -> Result<SampledPolyline> {
        if self.trivial {
            check_precision(precision)?;
            let chord = self.cubic.chord();
            return Ok([(self.cubic.p0, chord), (self.cubic.p3, chord)]
                .into_iter()
                .collect());
        }
        sample_segment(&self.cubic, precision)
    }
}

/// Stückweise kubische Bézier-Kurve.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    segments: Vec<CurveSegment>,
    closure: Closure,
}

impl Curve {
    /// Baut die Segmente aus einer positionalen Wegpunkt-Folge.
    ///
    /// Fenster aus 4 Punkten mit Schrittweite 3; bei geschlossenen Kurven
    /// greift das letzte Fenster per Modulo auf den ersten Anker zurück.
    /// Jedes Fenster wird einzeln aufgelöst, um triviale Segmente zu erkennen.
    pub fn from_waypoints(waypoints: &[Waypoint], closure: Closure) -> Result<Self> {
        let count = waypoints.len();
        let segment_count = match closure {
            Closure::Open if count >= 4 && count % 3 == 1 => count / 3,
            Closure::Closed if count >= 3 && count % 3 == 0 => count / 3,
            _ => return Err(CurveError::InvalidWaypointCount { count, closure }),
        };

        // Gesamte Folge einmal prüfen, damit Fehler-Indizes global sind
        resolve_handles(waypoints)?;

        let segments = (0..segment_count)
            .map(|k| {
                let offset = 3 * k;
                let window = [
                    waypoints[offset],
                    waypoints[offset + 1],
                    waypoints[offset + 2],
                    waypoints[(offset + 3) % count],
                ];
                let resolved = resolve_handles(&window)?;
                Ok(CurveSegment {
                    cubic: build_segment(&resolved.points)?,
                    trivial: resolved.trivial,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Kurve aufgebaut: {} Segmente ({} trivial), {}",
            segments.len(),
            segments.iter().filter(|s| s.trivial).count(),
            closure
        );

        Ok(Self { segments, closure })
    }

    pub fn from_sequence(sequence: &WaypointSequence) -> Result<Self> {
        Self::from_waypoints(sequence.waypoints(), sequence.closure())
    }

    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }

    /// Startpunkt des ersten Segments.
    pub fn start(&self) -> DVec2 {
        self.segments[0].cubic.p0
    }

    /// Endpunkt des letzten Segments (bei geschlossenen Kurven gleich `start()`).
    pub fn end(&self) -> DVec2 {
        self.segments[self.segments.len() - 1].cubic.p3
    }

    /// Approximierte Gesamtlänge.
    pub fn arc_length(&self) -> f64 {
        self.segments.iter().map(CurveSegment::length).sum()
    }

    /// Sampelt alle Segmente mit `precision` und hängt sie aneinander.
    ///
    /// Gemeinsame Endpunkte benachbarter Segmente erscheinen doppelt.
    pub fn sample(&self, precision: f64) -> Result<SampledPolyline> {
        let mut polyline = SampledPolyline::new();
        for segment in &self.segments {
            let mut part = segment.sample(precision)?;
            polyline.append(&mut part);
        }
        log::debug!(
            "Kurve gesampelt: {} Punkte bei Präzision {}",
            polyline.len(),
            precision
        );
        Ok(polyline)
    }
}

/// Baut eine Kurve aus Wegpunkten und sampelt sie in einem Schritt.
pub fn build_curve(
    waypoints: &[Waypoint],
    precision: f64,
    closure: Closure,
) -> Result<SampledPolyline> {
    Curve::from_waypoints(waypoints, closure)?.sample(precision)
}
