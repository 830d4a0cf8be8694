//! CLI logic for the umlgen class diagram renderer.
//!
//! This module contains the core CLI logic: it reads a JSON diagram from a
//! file or stdin and writes the rendered SVG to a file or stdout, or serves
//! the same pipeline over HTTP.

pub mod config;
pub mod error_adapter;
pub mod serve;

mod args;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
};

use log::info;

use umlgen::{DiagramBuilder, UmlgenError};

/// Run the umlgen CLI application
///
/// With `--serve` this blocks serving HTTP requests. Otherwise the input
/// is processed through the umlgen pipeline once and the resulting SVG is
/// written to the output.
///
/// # Errors
///
/// Returns `UmlgenError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Decoding and validation errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), UmlgenError> {
    let cli_config = config::load_config(args.config.as_ref())?;

    if let Some(addr) = &args.serve {
        return serve::serve(addr, cli_config);
    }

    info!(
        input_path:? = args.input,
        output_path:? = args.output;
        "Processing diagram"
    );

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().lock().read_to_string(&mut source)?;
            source
        }
    };

    let builder = DiagramBuilder::new(cli_config.app);
    let diagram = builder.parse(&source)?;
    let seed = DiagramBuilder::resolve_seed(&diagram, args.seed);
    info!(seed; "Seed selected");

    match &args.output {
        Some(path) => {
            let sink = BufWriter::new(File::create(path)?);
            builder.render_to(&diagram, Some(seed), sink)?.flush()?;
            info!(output_file = path; "SVG exported successfully");
        }
        None => {
            let sink = BufWriter::new(io::stdout().lock());
            builder.render_to(&diagram, Some(seed), sink)?.flush()?;
        }
    }

    Ok(())
}
