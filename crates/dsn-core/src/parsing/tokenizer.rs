use crate::model::DeclarationLine;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static DELIMITED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(S\d{2}\.G\d{2}\.\d{2}\.\d{3}),(.*)$").expect("valid regex"));

static FIXED_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(S\d{2}G\d{2}\d{2}\d{3})(.*)$").expect("valid regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(S\d{2}\.G\d{2}\.\d{2}\.\d{3})[ \t]+(.*)$").expect("valid regex"));

static CANONICAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S\d{2}\.G\d{2}\.\d{2}\.\d{3}$").expect("valid regex"));

/// Segment boundaries of an undotted 11-character field code
/// (structure, group, sub-group, field number).
const FIXED_SEGMENTS: [(usize, usize); 4] = [(0, 3), (3, 6), (6, 8), (8, 11)];

/// The line syntaxes a declaration may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineForm {
    /// `S21.G00.30.001,'value'`
    Delimited,
    /// `S21G0030001value`
    FixedPosition,
    /// `S21.G00.30.001   value`
    Whitespace,
}

/// Trial order; the first grammar that matches wins.
pub const GRAMMARS: [LineForm; 3] = [
    LineForm::Delimited,
    LineForm::FixedPosition,
    LineForm::Whitespace,
];

impl LineForm {
    fn try_match(self, line: &str) -> Option<DeclarationLine> {
        match self {
            LineForm::Delimited => {
                let caps = DELIMITED.captures(line)?;
                Some(DeclarationLine {
                    code: caps[1].to_string(),
                    value: strip_quotes(caps[2].trim()).to_string(),
                })
            }
            LineForm::FixedPosition => {
                let caps = FIXED_POSITION.captures(line)?;
                let code = dotted_code(&caps[1])?;
                Some(DeclarationLine {
                    code,
                    value: caps[2].trim().to_string(),
                })
            }
            LineForm::Whitespace => {
                let caps = WHITESPACE.captures(line)?;
                Some(DeclarationLine {
                    code: caps[1].to_string(),
                    value: caps[2].trim().to_string(),
                })
            }
        }
    }
}

/// Tokenize one physical line, reporting which syntax matched.
pub fn classify_line(line: &str) -> Option<(LineForm, DeclarationLine)> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    GRAMMARS
        .iter()
        .find_map(|form| form.try_match(line).map(|parsed| (*form, parsed)))
}

/// Tokenize one physical line into a canonical `(code, value)` pair.
///
/// Lines matching none of the grammars (blank, comments, garbage) yield None.
pub fn tokenize(line: &str) -> Option<DeclarationLine> {
    classify_line(line).map(|(_, parsed)| parsed)
}

/// Rebuild `S21.G00.30.001` from `S21G0030001`.
fn dotted_code(raw: &str) -> Option<String> {
    let segments: Vec<&str> = FIXED_SEGMENTS
        .iter()
        .map(|&(start, end)| raw.get(start..end))
        .collect::<Option<_>>()?;
    let code = segments.join(".");
    CANONICAL_CODE.is_match(&code).then_some(code)
}

/// Remove one layer of surrounding single quotes.
fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
