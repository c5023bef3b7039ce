use crate::classify::age;
use crate::parsing::values::parse_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One tokenized declaration line: canonical dotted field code and its raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationLine {
    pub code: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Decode an explicit sex code (`1` male, `2` female).
    pub fn from_code(code: &str) -> Option<Sex> {
        match code.trim() {
            "1" => Some(Sex::Male),
            "2" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Infer sex from the leading digit of a national identifier.
    pub fn from_nir(nir: &str) -> Option<Sex> {
        match nir.trim().chars().next() {
            Some('1') => Some(Sex::Male),
            Some('2') => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Men"),
            Sex::Female => write!(f, "Women"),
        }
    }
}

/// Socio-professional category, declared in ascending hierarchical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocioCategory {
    Worker,
    Clerical,
    Supervisor,
    Executive,
    SeniorExecutive,
}

impl fmt::Display for SocioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocioCategory::Worker => write!(f, "Workers"),
            SocioCategory::Clerical => write!(f, "Clerical employees"),
            SocioCategory::Supervisor => write!(f, "Technicians and supervisors"),
            SocioCategory::Executive => write!(f, "Engineers and executives"),
            SocioCategory::SeniorExecutive => write!(f, "Senior executives"),
        }
    }
}

/// Coarse age bracket used by the equality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "<30")]
    Under30,
    #[serde(rename = "30-39")]
    From30To39,
    #[serde(rename = "40-49")]
    From40To49,
    #[serde(rename = "50+")]
    From50,
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgeBracket::Under30 => "<30",
            AgeBracket::From30To39 => "30-39",
            AgeBracket::From40To49 => "40-49",
            AgeBracket::From50 => "50+",
        };
        write!(f, "{label}")
    }
}

/// The reporting-period context open while lines are read.
///
/// Dates are kept as declared (`DDMMYYYY`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: Option<String>,
    pub end: Option<String>,
    pub type_code: Option<String>,
    pub type_label: Option<String>,
}

impl Period {
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.as_deref().and_then(parse_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemunerationEvent {
    pub amount: Decimal,
    /// Copy of the period that was open when the amount line was read.
    pub period: Period,
}

impl RemunerationEvent {
    pub fn type_code(&self) -> Option<&str> {
        self.period.type_code.as_deref()
    }

    pub fn type_label(&self) -> Option<&str> {
        self.period.type_label.as_deref()
    }

    fn matches(&self, types: Option<&BTreeSet<String>>) -> bool {
        match types {
            None => true,
            Some(allowed) => self.type_code().is_some_and(|c| allowed.contains(c)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Employee {
    pub nir: String,
    pub payroll_id: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub birth_date: Option<String>,
    pub sex: Option<Sex>,
    pub status_code: Option<String>,
    /// Derived from `status_code`; `None` when the code is not mapped.
    pub category: Option<SocioCategory>,
    /// Derived from `birth_date` and the reference date; reset on every recomputation.
    pub age_bracket: Option<AgeBracket>,
    pub pension_status: Option<String>,
    pub conventional_status: Option<String>,
    pub qualification: Option<String>,
    pub agreement_position: Option<String>,
    pub remunerations: Vec<RemunerationEvent>,
}

impl Employee {
    pub fn new(nir: &str) -> Self {
        Employee {
            nir: nir.to_string(),
            sex: Sex::from_nir(nir),
            ..Default::default()
        }
    }

    /// Payroll identifier when declared, national identifier otherwise.
    pub fn key(&self) -> &str {
        self.payroll_id.as_deref().unwrap_or(&self.nir)
    }

    /// Sum of remuneration amounts whose type passes the optional allow-list.
    ///
    /// Saturates instead of overflowing; the record builder never keeps
    /// amounts that would reach the bound.
    pub fn total_remuneration(&self, types: Option<&BTreeSet<String>>) -> Decimal {
        self.remunerations
            .iter()
            .filter(|r| r.matches(types))
            .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub siret: Option<String>,
    pub legal_name: Option<String>,
}

/// Everything reconstructed from one declaration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub company: Company,
    pub employees: Vec<Employee>,
    /// Non-empty physical lines read, recognized or not.
    pub line_count: usize,
    /// Non-empty lines that matched no line syntax.
    pub unrecognized_lines: usize,
    /// Recognized lines that could not be applied (orphans, malformed amounts).
    pub dropped_lines: usize,
    /// Field code -> every line declared with that code, in file order.
    pub fields: BTreeMap<String, Vec<DeclarationLine>>,
    /// Leading raw lines kept for display.
    pub raw_preview: Vec<String>,
    /// First period end seen in the file.
    pub default_reference_date: Option<String>,
    /// Period context as it stood after the last line.
    pub last_period: Period,
    pub encoding: String,
}

impl ParseResult {
    pub fn field_code_count(&self) -> usize {
        self.fields.len()
    }

    /// Period end used to order declarations in multi-period analysis.
    pub fn period_end(&self) -> Option<NaiveDate> {
        self.last_period.end_date()
    }

    /// Recompute every employee's age bracket against `reference`.
    pub fn assign_age_brackets(&mut self, reference: NaiveDate) {
        for employee in &mut self.employees {
            employee.age_bracket = employee
                .birth_date
                .as_deref()
                .and_then(parse_date)
                .and_then(|birth| age::index_bracket(birth, reference));
        }
    }
}
