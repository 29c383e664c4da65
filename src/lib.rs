//! KeyCurve Library.
//! Layout-Berechnung für Split-Tastaturen, exportiert für Tests und Wiederverwendung.
//!
//! Die Kurven-Geometrie liegt im Crate `keycurve_engine`; hier werden daraus
//! Tastenmatrix, Daumen-Cluster und Gehäuse-Umriss zusammengesetzt.

pub mod layout;
pub mod shared;

pub use keycurve_engine as engine;
pub use layout::{
    KeyKind, KeyMatrix, KeyPlacement, Layout, LayoutGeometry, ShellOutline, ThumbCluster,
};
pub use shared::LayoutOptions;
