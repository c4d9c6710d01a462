//! CLI logic for the SCg to SCs translator.
//!
//! This module contains the core CLI logic: load configuration, read the
//! graph document, translate it and write the SCs file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use sctext::{ScsError, Translator};

/// Run the SCText CLI application
///
/// This function processes the input graph document through the
/// translator and writes the resulting SCs text to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ScsError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed graph documents
/// - Invalid graphs
pub fn run(args: &Args) -> Result<(), ScsError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let translator = Translator::new(app_config);
    let graph = translator.parse(&source)?;
    let scs = translator.translate(&graph)?;

    fs::write(&args.output, scs)?;

    info!(output_file = args.output; "SCs exported successfully");

    Ok(())
}
