//! Kurven-Engine für parametrische Tastatur-Layouts.
//!
//! Wandelt kompakte Wegpunkt-Beschreibungen (Anker + Handle-Direktiven) in
//! stückweise kubische Bézier-Kurven, sampelt diese mit fester Parameter-Schrittweite
//! und verteilt Anker-Frames gleichmäßig nach Bogenlänge.
//!
//! Aufgeteilt in (Blätter zuerst):
//! - `handle`      : Handle-Direktiven (SHARP/RELATIVE/POLAR) auflösen
//! - `bezier`      : Einzelnes kubisches Segment
//! - `sampler`     : Gleichmäßiges Parameter-Sampling, `SampledPolyline`
//! - `curve`       : Stückweise Kurve (offen/geschlossen)
//! - `redistribute`: Arc-Length-Verteilung mit Richtungs-Frames

pub mod bezier;
pub mod curve;
pub mod error;
pub mod handle;
pub mod redistribute;
pub mod sampler;

pub use bezier::{build_segment, CubicSegment};
pub use curve::{build_curve, Closure, Curve, CurveSegment};
pub use error::{CurveError, Result};
pub use handle::{
    resolve_handle, resolve_handles, Handle, Knot, ResolvedWaypoints, Waypoint, WaypointSequence,
};
pub use redistribute::{redistribute, AnchorFrame};
pub use sampler::{sample_iter, sample_segment, Sample, SampledPolyline};

/// Punkt bzw. Vektor in der Ebene (f64, damit Endpunkte exakt bleiben).
pub type Point2 = glam::DVec2;
