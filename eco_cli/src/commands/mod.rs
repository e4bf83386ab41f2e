pub mod convert;
pub mod energy;
pub mod eval;
pub mod site;
pub mod water;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use eco_core::Outcome;
use serde::Serialize;

use crate::output;
use crate::OutputFormat;

/// Exit code for a blank or unparseable required input
pub const EXIT_INCOMPLETE: u8 = 2;

/// Print an outcome and map it to an exit code.
///
/// Text output of an incomplete outcome goes to stderr so stdout stays empty,
/// matching a form that keeps its previous (here: no) result.
pub fn finish<T, F>(outcome: &Outcome<T>, format: OutputFormat, render_text: F) -> Result<ExitCode>
where
    T: Serialize,
    F: FnOnce(&mut dyn Write, &T) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Json => output::json::write_json(&mut handle, outcome)?,
        OutputFormat::Text => match outcome {
            Outcome::Computed(result) => render_text(&mut handle, result)?,
            Outcome::Incomplete => {
                eprintln!("Incomplete input: a required value is blank or not a number");
            }
        },
    }

    Ok(exit_code(outcome))
}

pub fn exit_code<T>(outcome: &Outcome<T>) -> ExitCode {
    match outcome {
        Outcome::Computed(_) => ExitCode::SUCCESS,
        Outcome::Incomplete => ExitCode::from(EXIT_INCOMPLETE),
    }
}
