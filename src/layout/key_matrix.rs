//! Rechteckige Tastenmatrix mit Spalten-Versatz.

use super::{KeyKind, KeyPlacement};
use crate::shared::LayoutOptions;
use glam::DVec2;

/// Raster aus `rows × columns` Tasten; jede Spalte ist um `stagger[col]` Raster verschoben.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMatrix {
    rows: usize,
    columns: usize,
    keycap: DVec2,
    pitch: DVec2,
    column_stagger: Vec<f64>,
    shell_offset: f64,
    panel_width: f64,
    panel_height: f64,
}

impl KeyMatrix {
    pub fn new(options: &LayoutOptions) -> Self {
        Self {
            rows: options.rows,
            columns: options.columns,
            keycap: options.keycap(),
            pitch: options.pitch(),
            column_stagger: options.column_stagger.clone(),
            shell_offset: options.shell_offset,
            panel_width: options.panel_width,
            panel_height: options.panel_height,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Position einer Taste: untere linke Ecke der Keycap, mit `center` deren Mitte.
    ///
    /// Spalten ohne Stagger-Eintrag werden nicht verschoben.
    pub fn key_position(&self, row: usize, col: usize, center: bool) -> DVec2 {
        let stagger = self.column_stagger.get(col).copied().unwrap_or(0.0);
        let base = DVec2::splat(self.shell_offset)
            + DVec2::new(col as f64 * self.pitch.x, (row as f64 + stagger) * self.pitch.y);
        if center {
            base + self.keycap / 2.0
        } else {
            base
        }
    }

    fn last_column(&self) -> usize {
        self.columns.saturating_sub(1)
    }

    /// Oberkante des Controller-Panels (über der obersten Taste der letzten Spalte).
    ///
    /// Eine leere Matrix verhält sich wie eine einzelne Taste am Ursprung.
    pub fn panel_top(&self) -> f64 {
        self.key_position(self.rows.saturating_sub(1), self.last_column(), false).y
            + self.keycap.y
            + self.shell_offset
    }

    /// Linke Kante des Panels: rechts neben der letzten Spalte.
    pub fn panel_left(&self) -> f64 {
        self.key_position(0, self.last_column(), false).x + self.keycap.x
    }

    pub fn panel_right(&self) -> f64 {
        self.panel_left() + self.panel_width
    }

    pub fn panel_width(&self) -> f64 {
        self.panel_width
    }

    pub fn panel_height(&self) -> f64 {
        self.panel_height
    }

    /// Switch-Aussparungen aller Tasten, zeilenweise von unten.
    pub fn switch_holes(&self) -> Vec<KeyPlacement> {
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |col| (row, col)))
            .map(|(row, col)| KeyPlacement {
                position: self.key_position(row, col, true),
                angle: 0.0,
                kind: KeyKind::Matrix { row, col },
            })
            .collect()
    }
}
