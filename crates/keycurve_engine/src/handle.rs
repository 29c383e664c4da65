//! Handle-Direktiven und ihre Auflösung zu absoluten Kontrollpunkten.
//!
//! Eine Wegpunkt-Folge wechselt Anker und Handles ab:
//! `Anker, Handle, Handle, Anker, Handle, Handle, …`.
//! Das erste Handle nach einem Anker bezieht sich auf diesen Anker, das zweite
//! auf den folgenden Anker (bei geschlossenen Kurven modulo Länge).

use crate::curve::Closure;
use crate::error::{CurveError, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Beschreibung eines Bézier-Handles relativ zu seinem Referenz-Anker.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "HandleRepr", into = "HandleRepr")]
pub enum Handle {
    /// Absolute Position
    Explicit(DVec2),
    /// Handle fällt auf den Anker (scharfe Ecke)
    #[default]
    Sharp,
    /// Anker + (dx, dy), nicht rotiert
    Relative(DVec2),
    /// Anker + Polarvektor, Winkel in Grad
    Polar { radius: f64, angle_deg: f64 },
}

impl Handle {
    /// Löst das Handle gegen seinen Referenz-Anker auf.
    pub fn resolve(self, reference: DVec2) -> DVec2 {
        match self {
            Handle::Explicit(p) => p,
            Handle::Sharp => reference,
            Handle::Relative(delta) => reference + delta,
            Handle::Polar { radius, angle_deg } => {
                reference + DVec2::from_angle(angle_deg.to_radians()) * radius
            }
        }
    }

    /// `true` wenn das Handle die Kurve nicht krümmt (Gerade bleibt Gerade).
    ///
    /// Nur SHARP und explizite Handles exakt auf dem Anker zählen; RELATIVE(0, 0)
    /// oder POLAR(0, _) gelten als nicht-trivial.
    fn keeps_trivial(self, reference: DVec2) -> bool {
        match self {
            Handle::Sharp => true,
            Handle::Explicit(p) => p == reference,
            Handle::Relative(_) | Handle::Polar { .. } => false,
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Explicit(p) => write!(f, "[{}, {}]", p.x, p.y),
            Handle::Sharp => write!(f, "SHARP"),
            Handle::Relative(d) => write!(f, "RELATIVE {} {}", d.x, d.y),
            Handle::Polar { radius, angle_deg } => write!(f, "POLAR {} {}", radius, angle_deg),
        }
    }
}

impl FromStr for Handle {
    type Err = CurveError;

    /// Parst `SHARP`, `RELATIVE dx dy` oder `POLAR r winkel` (Tag ohne Groß-/Kleinschreibung).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CurveError::InvalidDirective {
            directive: s.to_string(),
        };
        let mut parts = s.split_whitespace();
        let tag = parts.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let args = parts
            .map(|p| p.parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;

        match (tag.as_str(), args.as_slice()) {
            ("SHARP", []) => Ok(Handle::Sharp),
            ("RELATIVE", [dx, dy]) => Ok(Handle::Relative(DVec2::new(*dx, *dy))),
            ("POLAR", [radius, angle_deg]) => Ok(Handle::Polar {
                radius: *radius,
                angle_deg: *angle_deg,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Serde-Darstellung: `[x, y]` für explizite Punkte, sonst Direktiven-String.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HandleRepr {
    Point([f64; 2]),
    Directive(String),
}

impl TryFrom<HandleRepr> for Handle {
    type Error = CurveError;

    fn try_from(repr: HandleRepr) -> Result<Self> {
        match repr {
            HandleRepr::Point([x, y]) => Ok(Handle::Explicit(DVec2::new(x, y))),
            HandleRepr::Directive(s) => s.parse(),
        }
    }
}

impl From<Handle> for HandleRepr {
    fn from(handle: Handle) -> Self {
        match handle {
            Handle::Explicit(p) => HandleRepr::Point([p.x, p.y]),
            other => HandleRepr::Directive(other.to_string()),
        }
    }
}

/// Element einer positionalen Wegpunkt-Folge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waypoint {
    Anchor(DVec2),
    Handle(Handle),
}

impl From<DVec2> for Waypoint {
    fn from(p: DVec2) -> Self {
        Waypoint::Anchor(p)
    }
}

impl From<Handle> for Waypoint {
    fn from(h: Handle) -> Self {
        Waypoint::Handle(h)
    }
}

/// Deklarativer Wegpunkt: ein Anker mit eingehendem und ausgehendem Handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    /// Position, durch die die Kurve läuft
    pub anchor: DVec2,
    /// Handle des Segments, das in diesem Anker endet
    #[serde(default)]
    pub before: Handle,
    /// Handle des Segments, das in diesem Anker beginnt
    #[serde(default)]
    pub after: Handle,
}

impl Knot {
    /// Anker mit zwei SHARP-Handles (Ecke).
    pub fn corner(anchor: DVec2) -> Self {
        Self {
            anchor,
            before: Handle::Sharp,
            after: Handle::Sharp,
        }
    }

    pub fn new(anchor: DVec2, before: Handle, after: Handle) -> Self {
        Self {
            anchor,
            before,
            after,
        }
    }
}

/// Positionale Wegpunkt-Folge zusammen mit ihrer Geschlossenheit.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointSequence {
    waypoints: Vec<Waypoint>,
    closure: Closure,
}

impl WaypointSequence {
    pub fn new(waypoints: Vec<Waypoint>, closure: Closure) -> Self {
        Self { waypoints, closure }
    }

    /// Flacht deklarative Knoten zur positionalen Folge ab.
    ///
    /// Offen: `before` des ersten und `after` des letzten Knotens werden ignoriert.
    /// Geschlossen: das letzte Segment läuft zurück zum ersten Knoten.
    pub fn from_knots(knots: &[Knot], closure: Closure) -> Self {
        let n = knots.len();
        let mut waypoints = Vec::with_capacity(n * 3);
        for (i, knot) in knots.iter().enumerate() {
            waypoints.push(Waypoint::Anchor(knot.anchor));
            let next = match closure {
                Closure::Open if i + 1 == n => break,
                Closure::Open => &knots[i + 1],
                Closure::Closed => &knots[(i + 1) % n],
            };
            waypoints.push(Waypoint::Handle(knot.after));
            waypoints.push(Waypoint::Handle(next.before));
        }
        Self { waypoints, closure }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }
}

/// Ergebnis der Handle-Auflösung.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWaypoints {
    /// Absolute Punkte, gleiche Länge wie die Eingabe
    pub points: Vec<DVec2>,
    /// `true` wenn alle Handles auf ihren Ankern liegen (nur Geraden)
    pub trivial: bool,
}

/// Löst ein einzelnes Handle gegen seinen Referenz-Anker auf.
pub fn resolve_handle(handle: Handle, reference: DVec2) -> DVec2 {
    handle.resolve(reference)
}

/// Löst alle Handles einer Wegpunkt-Folge zu absoluten Punkten auf.
///
/// - Index % 3 == 0: Anker, unverändert übernommen
/// - Index % 3 == 1: Referenz ist der vorherige Anker
/// - Index % 3 == 2: Referenz ist der nächste Anker (modulo Länge)
pub fn resolve_handles(waypoints: &[Waypoint]) -> Result<ResolvedWaypoints> {
    let len = waypoints.len();
    let mut trivial = true;

    let points = waypoints
        .iter()
        .enumerate()
        .map(|(i, waypoint)| match (i % 3, waypoint) {
            (0, Waypoint::Anchor(p)) => Ok(*p),
            (0, Waypoint::Handle(_)) | (_, Waypoint::Anchor(_)) => {
                Err(CurveError::MisplacedWaypoint { index: i })
            }
            (slot, Waypoint::Handle(handle)) => {
                let ref_index = if slot == 1 { i - 1 } else { (i + 1) % len };
                let reference = anchor_at(waypoints, ref_index)?;
                if !handle.keeps_trivial(reference) {
                    trivial = false;
                }
                Ok(handle.resolve(reference))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedWaypoints { points, trivial })
}

fn anchor_at(waypoints: &[Waypoint], index: usize) -> Result<DVec2> {
    match waypoints[index] {
        Waypoint::Anchor(p) => Ok(p),
        Waypoint::Handle(_) => Err(CurveError::MisplacedWaypoint { index }),
    }
}
