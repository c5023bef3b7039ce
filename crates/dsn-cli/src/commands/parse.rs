use dsn_core::error::DsnError;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), DsnError> {
    let parsed = dsn_core::parsing::parse_file(&input_file)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json).map_err(|source| DsnError::Io {
                path: path.clone(),
                source,
            })?;
            eprintln!(
                "Parsed {} employee(s) from {} line(s), written to {}",
                parsed.employees.len(),
                parsed.line_count,
                path.display()
            );
            if parsed.unrecognized_lines > 0 {
                eprintln!(
                    "  {} line(s) not recognized as declaration fields",
                    parsed.unrecognized_lines
                );
            }
            if parsed.dropped_lines > 0 {
                eprintln!("  {} field line(s) dropped", parsed.dropped_lines);
            }
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => output::table::print_parse(&parsed),
        },
    }

    Ok(())
}
