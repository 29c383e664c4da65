//! Fehlertypen der Kurven-Engine.

use crate::curve::Closure;

/// Alle Fehler, die beim Aufbau, Sampling oder Verteilen einer Kurve auftreten.
///
/// Jeder Fehler bricht die aktuelle Layout-Berechnung vollständig ab;
/// es gibt kein Teilergebnis. Gleiche Eingabe liefert immer denselben Fehler.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Länge der Wegpunkt-Folge passt nicht zum Anker/Handle/Handle-Muster
    #[error("ungültige Wegpunkt-Anzahl {count} für {closure} Kurve")]
    InvalidWaypointCount { count: usize, closure: Closure },

    /// Anker an Handle-Position oder Handle an Anker-Position
    #[error("Wegpunkt an Index {index} steht an falscher Position (Anker erwartet bei Index % 3 == 0)")]
    MisplacedWaypoint { index: usize },

    /// Unbekannte oder fehlerhafte Handle-Direktive
    #[error("ungültige Handle-Direktive: {directive:?}")]
    InvalidDirective { directive: String },

    /// Kubisches Segment braucht genau 4 Punkte
    #[error("kubisches Segment braucht 4 Punkte, erhalten: {count}")]
    InvalidSegment { count: usize },

    /// Sampling-Schrittweite ist nicht positiv oder nicht endlich
    #[error("ungültige Sampling-Präzision {precision}")]
    InvalidPrecision { precision: f64 },

    /// Verteilung mit count < 1 oder nicht-positiver Ziellänge
    #[error("Verteilung nicht möglich: count={count}, Ziellänge={target_length}")]
    DegenerateRedistribution { count: usize, target_length: f64 },

    /// Polyline hat zu wenige Samples für die angeforderte Verteilung
    #[error("Polyline enthält zu wenige Punkte")]
    EmptyPolyline,
}

/// Ergebnis-Alias der Engine.
pub type Result<T> = std::result::Result<T, CurveError>;
