//! Error adapter for converting UmlgenError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use umlgen::{UmlgenError, layout};

/// Adapter rendering a [`UmlgenError`] as a miette diagnostic.
///
/// Every variant gets a stable `umlgen::*` code; variants the user can fix
/// from the command line also carry a help line.
pub struct ErrorAdapter<'a>(pub &'a UmlgenError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            UmlgenError::Io(_) => "umlgen::io",
            UmlgenError::Decode(_) => "umlgen::decode",
            UmlgenError::Model(_) => "umlgen::model",
            UmlgenError::Layout(_) => "umlgen::layout",
            UmlgenError::Export(_) => "umlgen::export",
            UmlgenError::Config(_) => "umlgen::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            UmlgenError::Decode(err) if err.line() > 0 => format!(
                "check the JSON document near line {}, column {}",
                err.line(),
                err.column()
            ),
            UmlgenError::Model(_) => {
                "interaction indices are zero-based positions in `classes`".to_string()
            }
            UmlgenError::Layout(layout::Error::AttemptsExhausted { .. }) => {
                "raise `layout.max_attempts` or use `engine = \"grid\"`".to_string()
            }
            UmlgenError::Layout(_) => {
                "raise `layout.canvas_padding` in the configuration".to_string()
            }
            UmlgenError::Config(_) => "pass a valid TOML file with `--config`".to_string(),
            UmlgenError::Io(_) | UmlgenError::Decode(_) | UmlgenError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
