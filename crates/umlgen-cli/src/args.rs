//! Command-line argument definitions for the umlgen CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, seeding, logging verbosity and the HTTP surface.

use clap::Parser;

/// Command-line arguments for the umlgen diagram renderer
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON diagram; reads stdin when omitted
    #[arg(help = "Path to the input file (stdin when omitted)")]
    pub input: Option<String>,

    /// Path to the output SVG file; writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the seed stored in the diagram
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Serve `POST /` on this address instead of rendering once
    #[arg(long, value_name = "ADDR", conflicts_with_all = ["input", "output", "seed"])]
    pub serve: Option<String>,
}
