pub mod builtin;
pub mod schema;

use crate::error::DsnError;
use crate::parsing::values::parse_date;
use schema::AnalysisOptions;
use std::path::Path;

/// Load analysis options from a JSON file.
pub fn load_options(path: &Path) -> Result<AnalysisOptions, DsnError> {
    let content = std::fs::read_to_string(path).map_err(|e| DsnError::OptionsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_options(&content, path)
}

/// Parse analysis options from a JSON string read from `source`.
pub fn parse_options(json: &str, source: &Path) -> Result<AnalysisOptions, DsnError> {
    let options: AnalysisOptions =
        serde_json::from_str(json).map_err(|e| DsnError::OptionsLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse analysis options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<AnalysisOptions, DsnError> {
    let options: AnalysisOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

/// Check the reference date and every type code.
pub fn validate_options(options: &AnalysisOptions) -> Result<(), DsnError> {
    if let Some(ref date) = options.reference_date {
        if parse_date(date).is_none() {
            return Err(DsnError::InvalidReferenceDate(date.clone()));
        }
    }

    if let Some(ref types) = options.remuneration_types {
        for code in types {
            if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DsnError::InvalidOptions(format!(
                    "remuneration type '{}' is not a 3-digit code",
                    code
                )));
            }
        }
    }

    Ok(())
}
