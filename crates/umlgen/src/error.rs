//! Error types for umlgen operations.
//!
//! This module provides the main error type [`UmlgenError`] which wraps
//! the error conditions of every stage of a generation pass.

use std::io;

use thiserror::Error;

use umlgen_core::semantic::ModelError;

use crate::{export, layout};

/// The main error type for umlgen operations.
#[derive(Debug, Error)]
pub enum UmlgenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid diagram JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid diagram: {0}")]
    Model(#[from] ModelError),

    #[error("Layout error: {0}")]
    Layout(#[from] layout::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<export::Error> for UmlgenError {
    fn from(error: export::Error) -> Self {
        match error {
            export::Error::Io(err) => Self::Io(err),
            err @ export::Error::Render(_) => Self::Export(Box::new(err)),
        }
    }
}

impl UmlgenError {
    /// Returns true for errors caused by the input diagram rather than the
    /// environment: undecodable documents, bad class indices and canvases
    /// too small for the boxes.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Decode(_) | Self::Model(_) => true,
            Self::Layout(err) => err.is_invalid_space(),
            Self::Io(_) | Self::Export(_) | Self::Config(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use umlgen_core::geometry::BoxSize;

    use super::*;

    #[test]
    fn test_export_io_maps_to_io() {
        let err: UmlgenError = export::Error::Io(io::Error::other("closed")).into();
        assert!(matches!(err, UmlgenError::Io(_)));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_render_maps_to_export() {
        let err: UmlgenError = export::Error::Render("bad color".to_string()).into();
        assert!(matches!(err, UmlgenError::Export(_)));
        assert_eq!(err.to_string(), "Export error: Render error: bad color");
    }

    #[test]
    fn test_invalid_input_classification() {
        let model: UmlgenError = ModelError::InvalidInteraction {
            interaction: 0,
            index: 4,
            class_count: 2,
        }
        .into();
        assert!(model.is_invalid_input());

        let space: UmlgenError = layout::Error::InsufficientArea {
            required: 9,
            available: 4,
        }
        .into();
        assert!(space.is_invalid_input());

        let exhausted: UmlgenError = layout::Error::AttemptsExhausted { attempts: 10 }.into();
        assert!(!exhausted.is_invalid_input());

        let too_large: UmlgenError = layout::Error::BoxTooLarge {
            index: 1,
            size: BoxSize::new(3, 2),
            canvas: layout::Canvas::new(4, 4),
        }
        .into();
        assert!(too_large.is_invalid_input());
    }
}
