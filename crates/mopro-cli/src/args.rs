//! Command-line argument definitions for the Mopro CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the model and output paths, the
//! configuration files, profile selection and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Mopro profile compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the design-model export (TOML)
    #[arg(help = "Path to the model file")]
    pub input: String,

    /// Path to the generated profile; defaults to `<technology> Profile.xml`
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the profile metadata file; defaults to `profile.config` next
    /// to the model
    #[arg(long)]
    pub profile_config: Option<String>,

    /// Name of the profile package to compile when the model holds several
    #[arg(short, long)]
    pub profile_package: Option<String>,

    /// Never prompt; fail when the profile package is ambiguous
    #[arg(long)]
    pub non_interactive: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
