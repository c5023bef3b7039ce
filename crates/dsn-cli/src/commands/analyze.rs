use dsn_core::error::DsnError;
use dsn_core::options::builtin::{self, DEFAULT_PRESET};
use dsn_core::options::schema::AnalysisOptions;
use std::path::PathBuf;
use tracing::info;

use crate::output;

/// Declarations accepted in one analysis.
pub const MAX_FILES: usize = 12;

pub struct AnalyzeArgs {
    pub input_files: Vec<PathBuf>,
    pub preset: Option<String>,
    pub options: Option<PathBuf>,
    pub types: Vec<String>,
    pub reference_date: Option<String>,
    pub output: String,
    pub show_employees: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), DsnError> {
    if args.input_files.len() > MAX_FILES {
        return Err(DsnError::InvalidOptions(format!(
            "at most {} declarations can be analysed together ({} given)",
            MAX_FILES,
            args.input_files.len()
        )));
    }

    let options = build_options(&args)?;
    let batch = dsn_core::analyze_files(&args.input_files, &options)?;

    for (path, err) in &batch.failures {
        eprintln!("warning: skipped {}: {}", path.display(), err);
    }

    match args.output.as_str() {
        "json" => output::json::print(&batch.result)?,
        _ => output::table::print_analysis(&batch.result, &options, args.show_employees),
    }

    Ok(())
}

/// Option file or preset first, then command-line overrides.
fn build_options(args: &AnalyzeArgs) -> Result<AnalysisOptions, DsnError> {
    let mut options = match (&args.options, &args.preset) {
        (Some(path), _) => dsn_core::options::load_options(path)?,
        (None, Some(name)) => builtin::load_preset(name)?,
        (None, None) => builtin::load_preset(DEFAULT_PRESET)?,
    };

    if !args.types.is_empty() {
        options.remuneration_types = Some(args.types.iter().cloned().collect());
    }
    if let Some(ref date) = args.reference_date {
        options.reference_date = Some(date.clone());
    }

    dsn_core::options::validate_options(&options)?;
    info!(
        options = ?options.name,
        types = ?options.type_filter(),
        reference_date = ?options.reference_date,
        "analysis options resolved"
    );
    Ok(options)
}
