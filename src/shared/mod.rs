//! Geteilte Typen für alle Layout-Module.
//!
//! Enthält die serialisierbaren Optionen samt ihren Standardwerten.

pub mod options;

pub use options::LayoutOptions;
pub use options::PRECISION;
