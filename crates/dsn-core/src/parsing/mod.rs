pub mod builder;
pub mod tokenizer;
pub mod values;

use crate::decoding;
use crate::error::DsnError;
use crate::model::ParseResult;
use builder::RecordBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fold the lines of one declaration into a ParseResult.
///
/// Strictly sequential: line order decides which employee and which
/// period each field belongs to.
pub fn parse_text(text: &str) -> ParseResult {
    let mut builder = RecordBuilder::new();
    for line in text.lines() {
        builder.feed_raw(line);
    }
    builder.finish()
}

/// Detect the encoding, decode lossily, then parse.
pub fn parse_bytes(bytes: &[u8]) -> ParseResult {
    let (text, encoding) = decoding::decode(bytes);
    debug!(encoding = encoding.name(), bytes = bytes.len(), "decoded declaration");
    let mut result = parse_text(&text);
    result.encoding = encoding.name().to_string();
    result
}

/// Read and parse one declaration file.
pub fn parse_file(path: &Path) -> Result<ParseResult, DsnError> {
    let bytes = std::fs::read(path).map_err(|source| DsnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let result = parse_bytes(&bytes);
    info!(
        file = %path.display(),
        lines = result.line_count,
        employees = result.employees.len(),
        "parsed declaration"
    );
    Ok(result)
}

/// Parse several files concurrently, one independent builder per file.
///
/// Results come back in input order; a failing file does not affect the others.
pub fn parse_files(paths: &[PathBuf]) -> Vec<(PathBuf, Result<ParseResult, DsnError>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), parse_file(path)))
        .collect()
}
