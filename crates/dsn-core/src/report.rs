use crate::classify::remuneration::remuneration_label;
use crate::error::DsnError;
use crate::indicators::engine::{compute_multi, compute_single, sort_by_period_end, IndicatorSet};
use crate::indicators::evolution;
use crate::indicators::outcome::ComparisonWindow;
use crate::indicators::overview::{age_pyramid, sex_overview, PyramidRow, SexOverview};
use crate::model::{Company, DeclarationLine, Employee, ParseResult};
use crate::options::schema::AnalysisOptions;
use crate::parsing::values::{format_date, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Parse statistics of the analysed declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSummary {
    pub line_count: usize,
    pub field_code_count: usize,
    pub employee_count: usize,
    pub unrecognized_lines: usize,
    pub dropped_lines: usize,
    pub encoding: String,
    pub company: Company,
}

impl From<&ParseResult> for ParseSummary {
    fn from(parse: &ParseResult) -> Self {
        ParseSummary {
            line_count: parse.line_count,
            field_code_count: parse.field_code_count(),
            employee_count: parse.employees.len(),
            unrecognized_lines: parse.unrecognized_lines,
            dropped_lines: parse.dropped_lines,
            encoding: parse.encoding.clone(),
            company: parse.company.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemunerationType {
    pub code: String,
    pub label: String,
}

/// Where the effective reference date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    Options,
    Declaration,
    Today,
}

/// Everything one analysis produced. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Statistics of the analysed (last, in multi-period mode) declaration.
    pub summary: ParseSummary,
    pub periods_analyzed: usize,
    /// First and last period ends compared; None for a single declaration.
    pub window: Option<ComparisonWindow>,
    /// `DDMMYYYY`.
    pub reference_date: String,
    pub reference_source: ReferenceSource,
    pub indicators: IndicatorSet,
    pub points: u32,
    pub max_points: u32,
    pub overview: SexOverview,
    pub age_pyramid: Vec<PyramidRow>,
    /// Distinct type codes seen across every analysed declaration.
    pub remuneration_types: Vec<RemunerationType>,
    pub employees: Vec<Employee>,
    pub fields: BTreeMap<String, Vec<DeclarationLine>>,
    pub raw_preview: Vec<String>,
}

/// Pick the reference date: options first, then the declaration, then today.
///
/// An invalid date in the options is an error; an invalid date in the
/// declaration is skipped.
pub fn resolve_reference_date(
    explicit: Option<&str>,
    declared: Option<&str>,
) -> Result<(NaiveDate, ReferenceSource), DsnError> {
    if let Some(raw) = explicit {
        let date =
            parse_date(raw).ok_or_else(|| DsnError::InvalidReferenceDate(raw.to_string()))?;
        return Ok((date, ReferenceSource::Options));
    }
    if let Some(date) = declared.and_then(parse_date) {
        return Ok((date, ReferenceSource::Declaration));
    }
    let today = chrono::Local::now().date_naive();
    warn!(
        declared = ?declared,
        today = %today,
        "no usable reference date, ages are computed against today"
    );
    Ok((today, ReferenceSource::Today))
}

fn observed_types<'a>(periods: impl IntoIterator<Item = &'a ParseResult>) -> Vec<RemunerationType> {
    let codes: BTreeSet<&str> = periods
        .into_iter()
        .flat_map(|p| &p.employees)
        .flat_map(|e| &e.remunerations)
        .filter_map(|r| r.type_code())
        .collect();
    codes
        .into_iter()
        .map(|code| RemunerationType {
            code: code.to_string(),
            label: remuneration_label(code),
        })
        .collect()
}

struct Assembly {
    periods_analyzed: usize,
    window: Option<ComparisonWindow>,
    reference: (NaiveDate, ReferenceSource),
    indicators: IndicatorSet,
    remuneration_types: Vec<RemunerationType>,
}

fn assemble(latest: ParseResult, parts: Assembly, options: &AnalysisOptions) -> AnalysisResult {
    let types = options.type_filter();
    let (reference, reference_source) = parts.reference;
    let overview = sex_overview(&latest, types);
    let pyramid = age_pyramid(&latest, reference);
    let result = AnalysisResult {
        summary: ParseSummary::from(&latest),
        periods_analyzed: parts.periods_analyzed,
        window: parts.window,
        reference_date: format_date(reference),
        reference_source,
        points: parts.indicators.points(),
        max_points: parts.indicators.max_points(),
        indicators: parts.indicators,
        overview,
        age_pyramid: pyramid,
        remuneration_types: parts.remuneration_types,
        employees: latest.employees,
        fields: latest.fields,
        raw_preview: latest.raw_preview,
    };
    info!(
        periods = result.periods_analyzed,
        employees = result.summary.employee_count,
        points = result.points,
        max_points = result.max_points,
        "analysis complete"
    );
    result
}

/// Analyse one declaration.
pub fn build_single(
    mut parse: ParseResult,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, DsnError> {
    let reference = resolve_reference_date(
        options.reference_date.as_deref(),
        parse.default_reference_date.as_deref(),
    )?;
    parse.assign_age_brackets(reference.0);
    let indicators = compute_single(&parse, options.type_filter());
    let remuneration_types = observed_types([&parse]);
    Ok(assemble(
        parse,
        Assembly {
            periods_analyzed: 1,
            window: None,
            reference,
            indicators,
            remuneration_types,
        },
        options,
    ))
}

/// Analyse declarations from several periods, in any order.
pub fn build_multi(
    mut periods: Vec<ParseResult>,
    options: &AnalysisOptions,
) -> Result<AnalysisResult, DsnError> {
    if periods.len() < 2 {
        return match periods.pop() {
            Some(only) => build_single(only, options),
            None => Err(DsnError::NoDeclarations),
        };
    }

    sort_by_period_end(&mut periods);
    let declared = periods
        .last()
        .and_then(|p| p.default_reference_date.clone());
    let reference =
        resolve_reference_date(options.reference_date.as_deref(), declared.as_deref())?;
    for period in &mut periods {
        period.assign_age_brackets(reference.0);
    }

    let indicators =
        compute_multi(&periods, options.type_filter()).ok_or(DsnError::NoDeclarations)?;
    let remuneration_types = observed_types(&periods);
    let periods_analyzed = periods.len();
    let window = match (periods.first(), periods.last()) {
        (Some(first), Some(last)) => Some(evolution::window(first, last)),
        _ => None,
    };
    let latest = periods.pop().ok_or(DsnError::NoDeclarations)?;

    Ok(assemble(
        latest,
        Assembly {
            periods_analyzed,
            window,
            reference,
            indicators,
            remuneration_types,
        },
        options,
    ))
}
