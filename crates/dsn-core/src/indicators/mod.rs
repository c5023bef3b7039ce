//! The five gender pay equality indicators and their supporting figures.

pub mod engine;
pub mod equality;
pub mod evolution;
pub mod outcome;
pub mod overview;
pub mod scoring;
pub mod top_earners;

pub use engine::{compute_multi, compute_single, IndicatorSet};
pub use outcome::{IndicatorDetail, IndicatorKind, IndicatorResult};

#[cfg(test)]
pub(crate) mod testing {
    use crate::model::{
        AgeBracket, Employee, ParseResult, Period, RemunerationEvent, Sex, SocioCategory,
    };
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

    /// An employee with a unique identifier and a single type `003` amount.
    pub fn employee(
        sex: Sex,
        category: Option<SocioCategory>,
        age_bracket: Option<AgeBracket>,
        total: Decimal,
    ) -> Employee {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let digit = match sex {
            Sex::Male => '1',
            Sex::Female => '2',
        };
        let mut e = Employee::new(&format!("{digit}{id:012}"));
        e.payroll_id = Some(format!("P{id}"));
        e.category = category;
        e.age_bracket = age_bracket;
        e.remunerations.push(RemunerationEvent {
            amount: total,
            period: Period {
                type_code: Some("003".into()),
                ..Default::default()
            },
        });
        e
    }

    pub fn parse_of(employees: Vec<Employee>) -> ParseResult {
        ParseResult {
            employees,
            ..Default::default()
        }
    }
}
