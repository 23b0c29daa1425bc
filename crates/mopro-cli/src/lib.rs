//! Mopro CLI library
//!
//! This module contains the core CLI logic for the Mopro profile compiler.

pub mod error_adapter;
pub mod select;

mod args;
mod config;

pub use args::Args;

use std::{
    io,
    path::{Path, PathBuf},
};

use log::{info, warn};

use mopro::{MoproError, ProfileCompiler, profile_config::ProfileConfig};

/// Run the Mopro CLI application
///
/// This function loads the model, selects its profile package, compiles it
/// and writes the resulting profile document.
///
/// # Errors
///
/// Returns `MoproError` for:
/// - Configuration loading errors
/// - Model loading errors
/// - Profile selection errors
/// - Compilation errors
/// - Persistence errors
pub fn run(args: &Args) -> Result<(), MoproError> {
    info!(input_path = args.input; "Processing model");

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args);
    let non_interactive = app_config.selection().non_interactive();

    let compiler = ProfileCompiler::new(app_config);
    let input = Path::new(&args.input);
    let repository = compiler.load(input)?;

    let package = match compiler.select_profile_package(&repository) {
        Ok(package) => package,
        Err(MoproError::AmbiguousProfilePackage { candidates }) if !non_interactive => {
            warn!(candidates = candidates.join(", "); "Profile package is ambiguous, prompting");
            let packages = compiler.profile_packages(&repository);
            select::prompt_for_package(&packages, io::stdin().lock(), io::stdout())?
        }
        Err(err) => return Err(err),
    };

    let profile_config = match &args.profile_config {
        Some(path) => ProfileConfig::load(Path::new(path)),
        None => ProfileConfig::discover(input),
    };
    profile_config.log_summary();

    let document = compiler.compile(&repository, package, &profile_config)?;

    let output = args
        .output
        .as_ref()
        .map_or_else(|| PathBuf::from(document.default_file_name()), PathBuf::from);
    document.save(&output)?;

    info!(output_file = output.display().to_string(); "Profile exported successfully");

    Ok(())
}
