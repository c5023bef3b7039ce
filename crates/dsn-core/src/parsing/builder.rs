use crate::classify::category::category_for_status;
use crate::classify::remuneration::remuneration_label;
use crate::model::{DeclarationLine, Employee, ParseResult, Period, RemunerationEvent, Sex};
use crate::parsing::tokenizer::tokenize;
use crate::parsing::values::parse_amount;
use rust_decimal::Decimal;
use tracing::{debug, trace};

/// Number of raw lines kept in `ParseResult::raw_preview`.
pub const PREVIEW_LINES: usize = 100;

/// Field codes the builder acts on.
pub mod codes {
    pub const COMPANY_SIRET: &str = "S21.G00.06.001";
    pub const COMPANY_NAME: &str = "S21.G00.11.001";
    pub const NIR: &str = "S21.G00.30.001";
    pub const LAST_NAME: &str = "S21.G00.30.002";
    pub const FIRST_NAME: &str = "S21.G00.30.004";
    pub const SEX: &str = "S21.G00.30.005";
    pub const BIRTH_DATE: &str = "S21.G00.30.006";
    pub const PAYROLL_ID: &str = "S21.G00.30.019";
    pub const BIRTH_DATE_ALT: &str = "S21.G00.30.020";
    pub const STATUS: &str = "S21.G00.40.002";
    pub const PENSION_STATUS: &str = "S21.G00.40.003";
    pub const CONVENTIONAL_STATUS: &str = "S21.G00.40.007";
    pub const QUALIFICATION: &str = "S21.G00.40.008";
    pub const AGREEMENT_POSITION: &str = "S21.G00.40.041";
    pub const PERIOD_START: &str = "S21.G00.51.001";
    pub const PERIOD_END: &str = "S21.G00.51.002";
    pub const REMUNERATION_TYPE: &str = "S21.G00.51.011";
    pub const REMUNERATION_AMOUNT: &str = "S21.G00.51.013";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    CompanySiret,
    CompanyName,
    StartEmployee,
    LastName,
    FirstName,
    Sex,
    BirthDate,
    PayrollId,
    Status,
    PensionStatus,
    ConventionalStatus,
    Qualification,
    AgreementPosition,
    PeriodStart,
    PeriodEnd,
    RemunerationType,
    RemunerationAmount,
}

const FIELD_ACTIONS: [(&str, Action); 18] = [
    (codes::COMPANY_SIRET, Action::CompanySiret),
    (codes::COMPANY_NAME, Action::CompanyName),
    (codes::NIR, Action::StartEmployee),
    (codes::LAST_NAME, Action::LastName),
    (codes::FIRST_NAME, Action::FirstName),
    (codes::SEX, Action::Sex),
    (codes::BIRTH_DATE, Action::BirthDate),
    (codes::PAYROLL_ID, Action::PayrollId),
    (codes::BIRTH_DATE_ALT, Action::BirthDate),
    (codes::STATUS, Action::Status),
    (codes::PENSION_STATUS, Action::PensionStatus),
    (codes::CONVENTIONAL_STATUS, Action::ConventionalStatus),
    (codes::QUALIFICATION, Action::Qualification),
    (codes::AGREEMENT_POSITION, Action::AgreementPosition),
    (codes::PERIOD_START, Action::PeriodStart),
    (codes::PERIOD_END, Action::PeriodEnd),
    (codes::REMUNERATION_TYPE, Action::RemunerationType),
    (codes::REMUNERATION_AMOUNT, Action::RemunerationAmount),
];

/// Whether `amount` keeps every filtered total of `employee` representable.
///
/// Bounded by the sum of magnitudes, so no subset of amounts can overflow.
fn fits_totals(employee: &Employee, amount: Decimal) -> bool {
    employee
        .remunerations
        .iter()
        .try_fold(amount.abs(), |acc, r| acc.checked_add(r.amount.abs()))
        .is_some()
}

fn action_for(code: &str) -> Option<Action> {
    FIELD_ACTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, action)| *action)
}

/// Rebuilds company, employees and remunerations from the ordered lines of one file.
///
/// Employee-scoped fields always apply to the most recently started employee,
/// and every amount snapshots the period context open at that moment.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    result: ParseResult,
    period: Period,
    cursor: Option<usize>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one physical line: counted, previewed, tokenized, then applied.
    pub fn feed_raw(&mut self, raw: &str) {
        let raw = raw.trim_end_matches(&['\r', '\n'][..]);
        if raw.is_empty() {
            return;
        }
        self.result.line_count += 1;
        if self.result.raw_preview.len() < PREVIEW_LINES {
            self.result.raw_preview.push(raw.to_string());
        }
        match tokenize(raw) {
            Some(line) => self.feed(line),
            None => {
                trace!(line = raw, "unrecognized line ignored");
                self.result.unrecognized_lines += 1;
            }
        }
    }

    /// Apply one tokenized line.
    pub fn feed(&mut self, line: DeclarationLine) {
        if let Some(action) = action_for(&line.code) {
            self.apply(action, &line);
        }
        self.result
            .fields
            .entry(line.code.clone())
            .or_default()
            .push(line);
    }

    pub fn finish(mut self) -> ParseResult {
        self.result.last_period = self.period;
        self.result
    }

    fn apply(&mut self, action: Action, line: &DeclarationLine) {
        let value = line.value.as_str();
        match action {
            Action::CompanySiret => self.result.company.siret = Some(value.to_string()),
            Action::CompanyName => self.result.company.legal_name = Some(value.to_string()),
            Action::StartEmployee => {
                self.result.employees.push(Employee::new(value));
                self.cursor = Some(self.result.employees.len() - 1);
            }
            Action::PeriodStart => self.period.start = Some(value.to_string()),
            Action::PeriodEnd => {
                self.period.end = Some(value.to_string());
                if self.result.default_reference_date.is_none() {
                    self.result.default_reference_date = Some(value.to_string());
                }
            }
            Action::RemunerationType => {
                self.period.type_code = Some(value.to_string());
                self.period.type_label = Some(remuneration_label(value));
            }
            _ => self.apply_to_employee(action, line),
        }
    }

    fn apply_to_employee(&mut self, action: Action, line: &DeclarationLine) {
        let value = line.value.as_str();
        let Some(employee) = self.cursor.and_then(|i| self.result.employees.get_mut(i)) else {
            debug!(code = %line.code, "field line before any employee dropped");
            self.result.dropped_lines += 1;
            return;
        };

        match action {
            Action::LastName => employee.last_name = Some(value.to_string()),
            Action::FirstName => employee.first_name = Some(value.to_string()),
            Action::Sex => {
                let explicit = Sex::from_code(value);
                let inferred = Sex::from_nir(&employee.nir);
                if inferred.is_some() && explicit != inferred {
                    debug!(
                        nir = %employee.nir,
                        code = value,
                        "explicit sex code disagrees with national identifier"
                    );
                }
                employee.sex = explicit;
            }
            Action::BirthDate => employee.birth_date = Some(value.to_string()),
            Action::PayrollId => employee.payroll_id = Some(value.to_string()),
            Action::Status => {
                employee.status_code = Some(value.to_string());
                employee.category = category_for_status(value);
            }
            Action::PensionStatus => employee.pension_status = Some(value.to_string()),
            Action::ConventionalStatus => employee.conventional_status = Some(value.to_string()),
            Action::Qualification => employee.qualification = Some(value.to_string()),
            Action::AgreementPosition => employee.agreement_position = Some(value.to_string()),
            Action::RemunerationAmount => match parse_amount(value) {
                Some(amount) if fits_totals(employee, amount) => {
                    employee.remunerations.push(RemunerationEvent {
                        amount,
                        period: self.period.clone(),
                    })
                }
                Some(_) => {
                    debug!(nir = %employee.nir, value, "remuneration amount overflows totals, dropped");
                    self.result.dropped_lines += 1;
                }
                None => {
                    debug!(value, "malformed remuneration amount dropped");
                    self.result.dropped_lines += 1;
                }
            },
            Action::CompanySiret
            | Action::CompanyName
            | Action::StartEmployee
            | Action::PeriodStart
            | Action::PeriodEnd
            | Action::RemunerationType => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SocioCategory;
    use rust_decimal_macros::dec;

    fn build(lines: &[&str]) -> ParseResult {
        let mut builder = RecordBuilder::new();
        for line in lines {
            builder.feed_raw(line);
        }
        builder.finish()
    }

    #[test]
    fn test_employee_started_by_nir() {
        let parse = build(&["S21.G00.30.001,'123456789012345'", "S21.G00.30.002,DUPONT"]);
        assert_eq!(parse.employees.len(), 1);
        let e = &parse.employees[0];
        assert_eq!(e.nir, "123456789012345");
        assert_eq!(e.sex, Some(Sex::Male));
        assert_eq!(e.last_name.as_deref(), Some("DUPONT"));
    }

    #[test]
    fn test_fields_attach_to_last_employee() {
        let parse = build(&[
            "S21.G00.30.001,1111",
            "S21.G00.30.002,FIRST",
            "S21.G00.30.001,2222",
            "S21.G00.30.002,SECOND",
            "S21.G00.30.019,M2",
        ]);
        assert_eq!(parse.employees.len(), 2);
        assert_eq!(parse.employees[0].last_name.as_deref(), Some("FIRST"));
        assert_eq!(parse.employees[0].payroll_id, None);
        assert_eq!(parse.employees[1].last_name.as_deref(), Some("SECOND"));
        assert_eq!(parse.employees[1].payroll_id.as_deref(), Some("M2"));
        assert_eq!(parse.employees[1].sex, Some(Sex::Female));
    }

    #[test]
    fn test_orphan_field_dropped() {
        let parse = build(&["S21.G00.30.002,NOBODY", "S21.G00.51.013,1000"]);
        assert!(parse.employees.is_empty());
        assert_eq!(parse.dropped_lines, 2);
        assert_eq!(parse.fields["S21.G00.30.002"].len(), 1);
    }

    #[test]
    fn test_explicit_sex_overrides_nir() {
        let parse = build(&["S21.G00.30.001,1850775", "S21.G00.30.005,2"]);
        assert_eq!(parse.employees[0].sex, Some(Sex::Female));
    }

    #[test]
    fn test_unknown_sex() {
        let parse = build(&["S21.G00.30.001,7850775"]);
        assert_eq!(parse.employees[0].sex, None);
    }

    #[test]
    fn test_status_derives_category() {
        let parse = build(&[
            "S21.G00.30.001,1",
            "S21.G00.40.002,04",
            "S21.G00.30.001,2",
            "S21.G00.40.002,01",
        ]);
        assert_eq!(parse.employees[0].category, Some(SocioCategory::Executive));
        assert_eq!(parse.employees[1].status_code.as_deref(), Some("01"));
        assert_eq!(parse.employees[1].category, None);
    }

    #[test]
    fn test_amount_snapshots_period() {
        let parse = build(&[
            "S21.G00.30.001,1",
            "S21.G00.51.001,01012024",
            "S21.G00.51.002,31012024",
            "S21.G00.51.011,003",
            "S21.G00.51.013,2500,50",
            "S21.G00.51.011,099",
            "S21.G00.51.013,100",
        ]);
        let events = &parse.employees[0].remunerations;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].amount, dec!(2500.50));
        assert_eq!(events[0].type_code(), Some("003"));
        assert_eq!(events[0].type_label(), Some("Salaire rétabli - reconstitué"));
        assert_eq!(events[0].period.start.as_deref(), Some("01012024"));
        assert_eq!(events[0].period.end.as_deref(), Some("31012024"));
        assert_eq!(events[1].type_code(), Some("099"));
        assert_eq!(events[1].type_label(), Some("Type 099"));
    }

    #[test]
    fn test_later_period_does_not_rewrite_events() {
        let parse = build(&[
            "S21.G00.30.001,1",
            "S21.G00.51.002,31012024",
            "S21.G00.51.013,1000",
            "S21.G00.51.002,29022024",
        ]);
        let events = &parse.employees[0].remunerations;
        assert_eq!(events[0].period.end.as_deref(), Some("31012024"));
        assert_eq!(parse.last_period.end.as_deref(), Some("29022024"));
    }

    #[test]
    fn test_first_period_end_is_default_reference() {
        let parse = build(&["S21.G00.51.002,31012024", "S21.G00.51.002,29022024"]);
        assert_eq!(parse.default_reference_date.as_deref(), Some("31012024"));
    }

    #[test]
    fn test_malformed_amount_dropped() {
        let parse = build(&[
            "S21.G00.30.001,1",
            "S21.G00.51.013,2000",
            "S21.G00.51.013,abc",
        ]);
        let e = &parse.employees[0];
        assert_eq!(e.remunerations.len(), 1);
        assert_eq!(e.total_remuneration(None), dec!(2000));
        assert_eq!(parse.dropped_lines, 1);
    }

    #[test]
    fn test_overflowing_amount_dropped() {
        let parse = build(&[
            "S21.G00.30.001,1850775123456",
            "S21.G00.51.013,79228162514264337593543950335",
            "S21.G00.51.013,79228162514264337593543950335",
            "S21.G00.51.013,-1",
        ]);
        let e = &parse.employees[0];
        assert_eq!(e.remunerations.len(), 1);
        assert_eq!(e.total_remuneration(None), Decimal::MAX);
        assert_eq!(parse.dropped_lines, 2);
    }

    #[test]
    fn test_company_fields_overwrite() {
        let parse = build(&[
            "S21.G00.06.001,11111111100011",
            "S21.G00.11.001,OLD NAME",
            "S21.G00.11.001,ACME SAS",
        ]);
        assert_eq!(parse.company.siret.as_deref(), Some("11111111100011"));
        assert_eq!(parse.company.legal_name.as_deref(), Some("ACME SAS"));
    }

    #[test]
    fn test_counts_and_index() {
        let parse = build(&[
            "S10.G00.00.001,LOGICIEL",
            "",
            "garbage",
            "S21.G00.30.001,1",
            "S21.G00.30.001,2",
        ]);
        assert_eq!(parse.line_count, 4);
        assert_eq!(parse.unrecognized_lines, 1);
        assert_eq!(parse.field_code_count(), 2);
        assert_eq!(parse.fields["S21.G00.30.001"].len(), 2);
        assert_eq!(parse.raw_preview.len(), 4);
    }

    #[test]
    fn test_every_field_action_code_is_unique() {
        let mut seen: Vec<&str> = FIELD_ACTIONS.iter().map(|(c, _)| *c).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), FIELD_ACTIONS.len());
    }
}
