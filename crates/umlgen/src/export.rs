//! Export of laid-out class diagrams.
//!
//! This module provides the [`Exporter`] trait, the last stage of a
//! generation pass:
//!
//! ```text
//! Diagram
//!     ↓ sizing
//! Box sizes + canvas
//!     ↓ layout
//! Placed class boxes (Layout)
//!     ↓ export (this module)
//! Byte sink
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: streaming SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. The first failed write aborts the
//! pass; nothing written before it is rolled back. [`Error`] converts into
//! [`UmlgenError::Export`] at the crate boundary.
//!
//! [`UmlgenError::Export`]: crate::UmlgenError::Export

/// SVG export backend.
pub mod svg;

use crate::{layout::Layout, semantic::Diagram};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Writes the diagram with its placed boxes to the backend's sink.
    ///
    /// `layout` must come from the same `diagram`: boxes are looked up by
    /// class index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &Diagram, layout: &Layout) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
