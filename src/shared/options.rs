//! Zentrale Konfiguration für das Tastatur-Layout.
//!
//! `LayoutOptions` enthält alle Maße, aus denen das Layout berechnet wird.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::DVec2;
use keycurve_engine::{Handle, Knot};
use serde::{Deserialize, Serialize};

// ── Tasten ──────────────────────────────────────────────────────────

/// Keycap-Größe (Breite, Höhe) in mm.
pub const KEYCAP_SIZE: [f64; 2] = [18.0, 17.0];
/// Abstand zwischen benachbarten Keycaps in der Matrix.
pub const KEYCAP_DIST: [f64; 2] = [1.0, 1.0];
/// Größe der Switch-Aussparung.
pub const SWITCH_HOLE_SIZE: [f64; 2] = [13.7, 13.7];

// ── Matrix ──────────────────────────────────────────────────────────

pub const ROWS: usize = 4;
pub const COLUMNS: usize = 6;
/// Vertikaler Versatz je Spalte in Vielfachen des Tastenrasters.
pub const COLUMN_STAGGER: [f64; COLUMNS] = [0.0, 0.0, 0.25, 0.5, 0.25, 0.15];

// ── Daumen-Cluster ─────────────────────────────────────────────────

pub const THUMB_KEY_COUNT: usize = 4;
/// Abstand zwischen den Keycaps entlang der Daumen-Kurve.
pub const THUMB_KEYCAP_SPACING: f64 = 1.0;
/// Verschiebung der (skalierten) Daumen-Kurve.
pub const THUMB_POSITION: [f64; 2] = [77.0, -14.0];

// ── Gehäuse ─────────────────────────────────────────────────────────

/// Rand um Keycaps und Daumen-Cluster.
pub const SHELL_OFFSET: f64 = 1.0;
/// Breite des Controller-Panels rechts der Matrix.
pub const PANEL_WIDTH: f64 = 24.0;
pub const PANEL_HEIGHT: f64 = 92.0;

// ── Kurven ──────────────────────────────────────────────────────────

/// Parameter-Schrittweite beim Sampling.
pub const PRECISION: f64 = 0.01;
/// Punkte näher als dieser Abstand werden im Umriss zusammengefasst.
pub const DEDUP_TOLERANCE: f64 = 1e-6;

/// Standard-Wegpunkte der Daumen-Kurve (vor Skalierung).
pub fn default_thumb_curve() -> Vec<Knot> {
    vec![
        Knot::new(
            DVec2::new(0.0, 0.0),
            Handle::Sharp,
            Handle::Polar {
                radius: 3.0,
                angle_deg: -5.0,
            },
        ),
        Knot::new(
            DVec2::new(7.0, -4.0),
            Handle::Polar {
                radius: 3.0,
                angle_deg: 125.0,
            },
            Handle::Sharp,
        ),
    ]
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle Maße des Layouts.
/// Wird per `load_from_file`/`save_to_file` als TOML gelesen und geschrieben.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutOptions {
    // ── Tasten ──────────────────────────────────────────────────
    /// Keycap-Größe (Breite, Höhe)
    pub keycap_size: [f64; 2],
    /// Abstand zwischen Keycaps in der Matrix
    pub keycap_dist: [f64; 2],
    /// Größe der Switch-Aussparung
    pub switch_hole_size: [f64; 2],

    // ── Matrix ──────────────────────────────────────────────────
    pub rows: usize,
    pub columns: usize,
    /// Versatz je Spalte (Länge muss `columns` entsprechen)
    pub column_stagger: Vec<f64>,

    // ── Daumen-Cluster ──────────────────────────────────────────
    pub thumb_key_count: usize,
    pub thumb_keycap_spacing: f64,
    pub thumb_position: [f64; 2],

    // ── Gehäuse ─────────────────────────────────────────────────
    pub shell_offset: f64,
    pub panel_width: f64,
    pub panel_height: f64,

    // ── Kurven ──────────────────────────────────────────────────
    /// Parameter-Schrittweite beim Sampling
    pub precision: f64,
    /// Toleranz für das Zusammenfassen doppelter Umriss-Punkte
    #[serde(default = "default_dedup_tolerance")]
    pub dedup_tolerance: f64,

    // ── Daumen-Kurve (als letztes: TOML-Tabellen-Array) ─────────
    /// Form der Daumen-Kurve; wird auf die Ziellänge skaliert
    #[serde(default = "default_thumb_curve")]
    pub thumb_curve: Vec<Knot>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            keycap_size: KEYCAP_SIZE,
            keycap_dist: KEYCAP_DIST,
            switch_hole_size: SWITCH_HOLE_SIZE,

            rows: ROWS,
            columns: COLUMNS,
            column_stagger: COLUMN_STAGGER.to_vec(),

            thumb_key_count: THUMB_KEY_COUNT,
            thumb_keycap_spacing: THUMB_KEYCAP_SPACING,
            thumb_position: THUMB_POSITION,

            shell_offset: SHELL_OFFSET,
            panel_width: PANEL_WIDTH,
            panel_height: PANEL_HEIGHT,

            precision: PRECISION,
            dedup_tolerance: DEDUP_TOLERANCE,

            thumb_curve: default_thumb_curve(),
        }
    }
}

/// Serde-Default für `dedup_tolerance` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_dedup_tolerance() -> f64 {
    DEDUP_TOLERANCE
}

impl LayoutOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    pub fn keycap(&self) -> DVec2 {
        DVec2::from(self.keycap_size)
    }

    pub fn switch_hole(&self) -> DVec2 {
        DVec2::from(self.switch_hole_size)
    }

    /// Rastermaß der Matrix: Keycap plus Abstand.
    pub fn pitch(&self) -> DVec2 {
        self.keycap() + DVec2::from(self.keycap_dist)
    }

    /// Gewünschte Länge der Daumen-Kurve: `(N - 1) · (Keycap-Breite + Abstand)`.
    pub fn thumb_target_length(&self) -> f64 {
        self.thumb_key_count.saturating_sub(1) as f64
            * (self.keycap_size[0] + self.thumb_keycap_spacing)
    }

    /// Prüft die Optionen auf Konsistenz, bevor ein Layout gebaut wird.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.rows > 0 && self.columns > 0,
            "Matrix braucht mindestens eine Zeile und Spalte ({}×{})",
            self.rows,
            self.columns
        );
        anyhow::ensure!(
            self.column_stagger.len() == self.columns,
            "column_stagger hat {} Einträge, erwartet {}",
            self.column_stagger.len(),
            self.columns
        );
        anyhow::ensure!(
            self.columns >= 4,
            "Umriss braucht mindestens 4 Spalten, konfiguriert: {}",
            self.columns
        );
        anyhow::ensure!(
            self.thumb_key_count >= 2,
            "Daumen-Cluster braucht mindestens 2 Tasten, konfiguriert: {}",
            self.thumb_key_count
        );
        anyhow::ensure!(
            self.thumb_curve.len() >= 2,
            "Daumen-Kurve braucht mindestens 2 Knoten"
        );
        anyhow::ensure!(
            self.keycap_size.iter().all(|v| *v > 0.0),
            "Keycap-Größe muss positiv sein: {:?}",
            self.keycap_size
        );
        Ok(())
    }
}
