//! Interactive country picker.
//!
//! Kept separate from clap parsing: clap handles flags, the picker provides
//! the `--pick` prompt on stdin.

use std::io::{self, BufRead, Write};

use crate::data::Dataset;
use crate::error::AppError;

/// Prompt on stdin/stdout for a country from the dataset.
///
/// Behavior:
/// - list the sorted country names
/// - accept either a number (from the list) or an exact name
/// - `q` cancels
pub fn prompt_for_country(dataset: &Dataset) -> Result<String, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    pick_country(dataset, &mut stdin.lock(), &mut stdout.lock())
}

/// Picker loop over arbitrary streams.
pub fn pick_country<R: BufRead, W: Write>(
    dataset: &Dataset,
    input: &mut R,
    output: &mut W,
) -> Result<String, AppError> {
    let countries = dataset.countries();
    if countries.is_empty() {
        return Err(AppError::new(3, "The dataset has no countries to choose from."));
    }

    let io_err = |e: io::Error| AppError::new(4, format!("Failed to write prompt: {e}"));

    writeln!(output, "{} countr{}:", countries.len(), if countries.len() == 1 { "y" } else { "ies" })
        .map_err(io_err)?;
    for (idx, name) in countries.iter().enumerate() {
        writeln!(output, "{:>3}) {name}", idx + 1).map_err(io_err)?;
    }

    loop {
        write!(
            output,
            "Select a country by number (1-{}) or name (q to quit): ",
            countries.len()
        )
        .map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(4, format!("Failed to read input: {e}")))?;

        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Pass a country with `-c <NAME>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=countries.len()).contains(&choice) {
                return Ok(countries[choice - 1].clone());
            }
            writeln!(
                output,
                "Invalid choice: {choice}. Enter a number between 1 and {}.",
                countries.len()
            )
            .map_err(io_err)?;
            continue;
        }

        if dataset.get(line).is_some() {
            return Ok(line.to_string());
        }
        writeln!(output, "Unknown country: {line}").map_err(io_err)?;
    }
}
