pub mod classify;
pub mod decoding;
pub mod error;
pub mod indicators;
pub mod model;
pub mod options;
pub mod parsing;
pub mod report;

use error::DsnError;
use model::ParseResult;
use options::schema::AnalysisOptions;
use report::AnalysisResult;
use std::path::PathBuf;
use tracing::warn;

/// Main API entry point: analyse one parsed declaration.
pub fn analyze(parse: ParseResult, options: &AnalysisOptions) -> Result<AnalysisResult, DsnError> {
    crate::options::validate_options(options)?;
    report::build_single(parse, options)
}

/// Analyse declarations from several periods.
///
/// Declarations are ordered by period end before comparison, so input order
/// does not matter. A single declaration is analysed as in [`analyze`].
pub fn analyze_periods(
    periods: Vec<ParseResult>,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, DsnError> {
    crate::options::validate_options(options)?;
    report::build_multi(periods, options)
}

/// Decode, parse and analyse one declaration held in memory.
pub fn analyze_bytes(bytes: &[u8], options: &AnalysisOptions) -> Result<AnalysisResult, DsnError> {
    analyze(parsing::parse_bytes(bytes), options)
}

/// Outcome of analysing a batch of files where some may be unreadable.
#[derive(Debug)]
pub struct BatchAnalysis {
    pub result: AnalysisResult,
    /// Files that could not be read, with the reason.
    pub failures: Vec<(PathBuf, DsnError)>,
}

/// Parse every file concurrently and analyse the readable ones together.
///
/// Unreadable files are set aside in [`BatchAnalysis::failures`]. When no file
/// can be read, the first failure is returned as the error.
pub fn analyze_files(
    paths: &[PathBuf],
    options: &AnalysisOptions,
) -> Result<BatchAnalysis, DsnError> {
    crate::options::validate_options(options)?;

    let mut periods = Vec::new();
    let mut failures = Vec::new();
    for (path, outcome) in parsing::parse_files(paths) {
        match outcome {
            Ok(parse) => periods.push(parse),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping declaration");
                failures.push((path, e));
            }
        }
    }

    if periods.is_empty() {
        return Err(match failures.into_iter().next() {
            Some((_, first)) => first,
            None => DsnError::NoDeclarations,
        });
    }

    let result = analyze_periods(periods, options)?;
    Ok(BatchAnalysis { result, failures })
}
