//! Command-line argument definitions for the HyperColl CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, text measurement and logging verbosity.

use clap::{Parser, ValueEnum};

/// How label text is measured and outlined.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMode {
    /// Shape text with the installed system fonts
    #[default]
    Fonts,
    /// Use fixed-width metrics; output does not depend on installed fonts
    Heuristic,
}

/// Command-line arguments for the HyperColl diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input dataset (TOML)
    #[arg(help = "Path to the input dataset")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Text measurement mode
    #[arg(long, value_enum, default_value_t = TextMode::Fonts)]
    pub text: TextMode,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
