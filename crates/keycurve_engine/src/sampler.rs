//! Gleichmäßiges Parameter-Sampling und die gesampelte Polyline.

use crate::bezier::CubicSegment;
use crate::error::{CurveError, Result};
use glam::DVec2;

/// Ein Sample auf einem Segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Kurvenparameter in [0, 1]
    pub t: f64,
    pub position: DVec2,
    /// Tangente aus `CubicSegment::direction` (nicht normiert)
    pub tangent: DVec2,
}

/// Geordnete Punktliste mit paralleler Tangentenliste.
///
/// Beide Listen sind immer gleich lang.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledPolyline {
    points: Vec<DVec2>,
    tangents: Vec<DVec2>,
}

impl SampledPolyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            tangents: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, point: DVec2, tangent: DVec2) {
        self.points.push(point);
        self.tangents.push(tangent);
    }

    /// Hängt alle Samples von `other` an (ohne Deduplizierung).
    pub fn append(&mut self, other: &mut SampledPolyline) {
        self.points.append(&mut other.points);
        self.tangents.append(&mut other.tangents);
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn tangents(&self) -> &[DVec2] {
        &self.tangents
    }

    /// Zerlegt die Polyline in Punkte und Tangenten.
    pub fn into_parts(self) -> (Vec<DVec2>, Vec<DVec2>) {
        (self.points, self.tangents)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(DVec2, DVec2)> {
        Some((*self.points.first()?, *self.tangents.first()?))
    }

    pub fn last(&self) -> Option<(DVec2, DVec2)> {
        Some((*self.points.last()?, *self.tangents.last()?))
    }

    /// Iteriert über (Position, Tangente)-Paare.
    pub fn iter(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.points.iter().copied().zip(self.tangents.iter().copied())
    }

    /// Euklidische Länge jedes Polyline-Segments.
    pub fn segment_lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.windows(2).map(|w| w[0].distance(w[1]))
    }

    /// Summe aller Segmentlängen.
    pub fn length(&self) -> f64 {
        self.segment_lengths().sum()
    }

    /// Skaliert um den Ursprung und verschiebt danach um `offset`.
    ///
    /// Tangenten werden mitskaliert, ihre Richtung bleibt für `scale > 0` erhalten.
    pub fn transformed(&self, scale: f64, offset: DVec2) -> Self {
        Self {
            points: self.points.iter().map(|&p| offset + scale * p).collect(),
            tangents: self.tangents.iter().map(|&t| scale * t).collect(),
        }
    }

    /// Entfernt aufeinanderfolgende Punkte mit Abstand <= `tolerance`.
    ///
    /// Der erste Punkt bleibt erhalten; fällt der letzte Punkt auf seinen Vorgänger,
    /// ersetzt er diesen, damit der Endpunkt exakt bleibt.
    pub fn dedup(&self, tolerance: f64) -> Self {
        let n = self.len();
        let mut out = Self::with_capacity(n);
        for (i, (point, tangent)) in self.iter().enumerate() {
            match out.points.last().copied() {
                Some(last) if last.distance(point) <= tolerance => {
                    if i + 1 == n && out.len() > 1 {
                        let idx = out.len() - 1;
                        out.points[idx] = point;
                        out.tangents[idx] = tangent;
                    }
                }
                _ => out.push(point, tangent),
            }
        }
        out
    }

    /// Umgekehrte Laufrichtung; Tangenten werden negiert.
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
            tangents: self.tangents.iter().rev().map(|&t| -t).collect(),
        }
    }
}

impl FromIterator<(DVec2, DVec2)> for SampledPolyline {
    fn from_iter<I: IntoIterator<Item = (DVec2, DVec2)>>(iter: I) -> Self {
        let (points, tangents) = iter.into_iter().unzip();
        Self { points, tangents }
    }
}

impl FromIterator<Sample> for SampledPolyline {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        iter.into_iter().map(|s| (s.position, s.tangent)).collect()
    }
}

impl Extend<(DVec2, DVec2)> for SampledPolyline {
    fn extend<I: IntoIterator<Item = (DVec2, DVec2)>>(&mut self, iter: I) {
        for (point, tangent) in iter {
            self.push(point, tangent);
        }
    }
}

/// Iterator über gleichmäßige Parameter-Samples eines Segments.
///
/// t_i = min(i · p, 1); endet nach dem Sample bei exakt t = 1.
#[derive(Debug, Clone)]
pub struct SampleIter {
    segment: CubicSegment,
    precision: f64,
    index: usize,
    done: bool,
}

impl Iterator for SampleIter {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.done {
            return None;
        }
        let t = (self.index as f64 * self.precision).min(1.0);
        self.index += 1;
        if t >= 1.0 {
            self.done = true;
        }
        Some(Sample {
            t,
            position: self.segment.evaluate(t),
            tangent: self.segment.direction(t),
        })
    }
}

pub(crate) fn check_precision(precision: f64) -> Result<()> {
    if precision.is_finite() && precision > 0.0 {
        Ok(())
    } else {
        Err(CurveError::InvalidPrecision { precision })
    }
}

/// Startet das Sampling eines Segments mit Schrittweite `precision`.
pub fn sample_iter(segment: &CubicSegment, precision: f64) -> Result<SampleIter> {
    check_precision(precision)?;
    Ok(SampleIter {
        segment: *segment,
        precision,
        index: 0,
        done: false,
    })
}

/// Sampelt ein Segment vollständig; mindestens zwei Samples (t = 0 und t = 1).
pub fn sample_segment(segment: &CubicSegment, precision: f64) -> Result<SampledPolyline> {
    Ok(sample_iter(segment, precision)?.collect())
}
