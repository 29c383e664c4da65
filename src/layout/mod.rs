//! Layout einer Tastaturhälfte: Matrix, Daumen-Cluster und Gehäuse-Umriss.
//!
//! Alle Maße stammen aus `LayoutOptions`; die Kurven werden von `keycurve_engine`
//! berechnet.

pub mod key_matrix;
pub mod outline;
pub mod thumb_cluster;

pub use key_matrix::KeyMatrix;
pub use outline::ShellOutline;
pub use thumb_cluster::ThumbCluster;

use crate::shared::LayoutOptions;
use anyhow::Context;
use glam::DVec2;
use std::f64::consts::PI;

/// Herkunft einer Taste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Matrix { row: usize, col: usize },
    Thumb { index: usize },
}

/// Mittelpunkt und Drehung einer Switch-Aussparung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyPlacement {
    pub position: DVec2,
    /// Drehwinkel in Radiant
    pub angle: f64,
    pub kind: KeyKind,
}

impl KeyPlacement {
    /// Spiegelung an der senkrechten Achse `x = axis_x`.
    pub fn mirrored(&self, axis_x: f64) -> Self {
        Self {
            position: mirror_point(self.position, axis_x),
            angle: PI - self.angle,
            kind: self.kind,
        }
    }
}

fn mirror_point(p: DVec2, axis_x: f64) -> DVec2 {
    DVec2::new(2.0 * axis_x - p.x, p.y)
}

/// Fertige 2D-Geometrie einer Hälfte: Tasten plus Umriss.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGeometry {
    pub placements: Vec<KeyPlacement>,
    /// Geschlossenes Polygon im Uhrzeigersinn
    pub outline: Vec<DVec2>,
}

impl LayoutGeometry {
    /// Gespiegelte Hälfte. Die Umriss-Reihenfolge wird umgedreht,
    /// damit das Polygon im Uhrzeigersinn bleibt.
    pub fn mirrored(&self, axis_x: f64) -> Self {
        Self {
            placements: self.placements.iter().map(|k| k.mirrored(axis_x)).collect(),
            outline: self
                .outline
                .iter()
                .rev()
                .map(|&p| mirror_point(p, axis_x))
                .collect(),
        }
    }

    /// Achsparalleles Rechteck (min, max) um den Umriss.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let first = *self.outline.first()?;
        Some(
            self.outline
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }
}

/// Komplettes Layout einer Tastaturhälfte.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    options: LayoutOptions,
    matrix: KeyMatrix,
    thumb: ThumbCluster,
    outline: ShellOutline,
}

impl Layout {
    /// Berechnet Matrix, Daumen-Cluster und Umriss aus den Optionen.
    pub fn new(options: LayoutOptions) -> anyhow::Result<Self> {
        options.validate().context("Ungültige Layout-Optionen")?;

        let matrix = KeyMatrix::new(&options);
        let thumb = ThumbCluster::new(&options)?;
        let outline = ShellOutline::new(
            &matrix,
            &thumb,
            options.keycap(),
            options.shell_offset,
            options.precision,
            options.dedup_tolerance,
        )?;

        log::info!(
            "Layout berechnet: {}×{} Matrix, {} Daumen-Tasten, {} Umriss-Punkte",
            matrix.rows(),
            matrix.columns(),
            thumb.key_count(),
            outline.polygon().len()
        );

        Ok(Self {
            options,
            matrix,
            thumb,
            outline,
        })
    }

    /// Lädt die Optionen aus einer TOML-Datei (Fallback: Standardwerte) und berechnet das Layout.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        Self::new(LayoutOptions::load_from_file(path))
            .with_context(|| format!("Layout aus {} nicht berechenbar", path.display()))
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn matrix(&self) -> &KeyMatrix {
        &self.matrix
    }

    pub fn thumb_cluster(&self) -> &ThumbCluster {
        &self.thumb
    }

    pub fn outline(&self) -> &ShellOutline {
        &self.outline
    }

    /// Alle Switch-Aussparungen: erst die Matrix, dann der Daumen-Cluster.
    pub fn key_placements(&self) -> Vec<KeyPlacement> {
        let mut placements = self.matrix.switch_holes();
        placements.extend(self.thumb.switch_holes());
        placements
    }

    pub fn geometry(&self) -> LayoutGeometry {
        LayoutGeometry {
            placements: self.key_placements(),
            outline: self.outline.polygon().to_vec(),
        }
    }

    /// Geometrie der anderen Hand, gespiegelt an `x = axis_x`.
    pub fn mirrored(&self, axis_x: f64) -> LayoutGeometry {
        self.geometry().mirrored(axis_x)
    }
}
