use crate::error::DsnError;
use crate::options::schema::AnalysisOptions;

const ALL_JSON: &str = include_str!("../../../../presets/all.json");
const RETABLI_JSON: &str = include_str!("../../../../presets/retabli.json");
const BRUT_JSON: &str = include_str!("../../../../presets/brut.json");

/// Available predefined option sets.
pub const PRESETS: &[&str] = &["all", "retabli", "brut"];

/// Preset applied when the caller names none.
pub const DEFAULT_PRESET: &str = "retabli";

/// Load a predefined option set by name.
pub fn load_preset(name: &str) -> Result<AnalysisOptions, DsnError> {
    let json = match name {
        "all" => ALL_JSON,
        "retabli" => RETABLI_JSON,
        "brut" => BRUT_JSON,
        _ => {
            return Err(DsnError::InvalidOptions(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    Ok(serde_json::from_str(json)?)
}
