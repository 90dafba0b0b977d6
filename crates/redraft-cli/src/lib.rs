//! Redraft CLI library
//!
//! This module contains the core CLI logic for the Redraft diagram editor.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write as _};

use log::info;

use redraft::{DiagramEditor, EditReport, RedraftError};

/// Run the Redraft CLI application
///
/// This function reads the diagram and the edit script, applies the edits,
/// and writes the edited diagram to the output file, or to stdout when no
/// output path is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `RedraftError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Edit script decode errors
///
/// Edits that cannot be applied are not errors; they are listed in the
/// returned [`EditReport`].
pub fn run(args: &Args) -> Result<EditReport, RedraftError> {
    info!(
        input_path = args.input,
        edits_path = args.edits;
        "Editing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let diagram = fs::read_to_string(&args.input)?;
    let edits = fs::read_to_string(&args.edits)?;

    let editor = DiagramEditor::new(app_config);
    let script = editor.parse_edits(&edits)?;
    let report = editor.apply_with_report(&diagram, &script);

    match &args.output {
        Some(output) => {
            fs::write(output, report.text())?;
            info!(output_file = output; "Edited diagram written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.text().as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(report)
}
