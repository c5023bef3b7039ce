//! Indicators 2 and 3: compare the first and last declarations of a batch.
//!
//! Employees are joined on payroll identifier; those without one, or with an
//! unknown sex in either declaration, are left out.

use crate::classify::category::is_promotion;
use crate::indicators::outcome::{
    ComparisonWindow, IndicatorDetail, IndicatorKind, IndicatorResult, RateGapDetail,
};
use crate::indicators::scoring::{score_gap, PROMOTION_GAP_SCALE, RAISE_GAP_SCALE};
use crate::model::{Employee, ParseResult, Sex};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// A remuneration must grow by strictly more than this ratio to count as a raise.
pub const RAISE_THRESHOLD: Decimal = Decimal::from_parts(105, 0, 0, false, 2);

#[derive(Default)]
struct Tally {
    matched_men: usize,
    matched_women: usize,
    events_men: usize,
    events_women: usize,
}

impl Tally {
    fn record(&mut self, sex: Sex, event: bool) {
        match sex {
            Sex::Male => {
                self.matched_men += 1;
                self.events_men += usize::from(event);
            }
            Sex::Female => {
                self.matched_women += 1;
                self.events_women += usize::from(event);
            }
        }
    }
}

fn rate(events: usize, matched: usize) -> Decimal {
    if matched == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(events) / Decimal::from(matched) * Decimal::ONE_HUNDRED
}

/// Employees keyed by payroll identifier; a repeated identifier keeps the last one.
fn by_payroll_id(parse: &ParseResult) -> BTreeMap<&str, &Employee> {
    parse
        .employees
        .iter()
        .filter(|e| e.sex.is_some())
        .filter_map(|e| e.payroll_id.as_deref().map(|id| (id, e)))
        .collect()
}

pub fn window(first: &ParseResult, last: &ParseResult) -> ComparisonWindow {
    ComparisonWindow {
        from: first.last_period.end.clone(),
        to: last.last_period.end.clone(),
    }
}

fn finish(
    kind: IndicatorKind,
    scale: &[(u32, u32)],
    tally: Tally,
    window: ComparisonWindow,
) -> IndicatorResult {
    let rate_men = rate(tally.events_men, tally.matched_men);
    let rate_women = rate(tally.events_women, tally.matched_women);
    let gap = (rate_men - rate_women).abs();
    let detail = IndicatorDetail::RateGap(RateGapDetail {
        rate_men_pct: rate_men.round_dp(2),
        rate_women_pct: rate_women.round_dp(2),
        gap_pct: gap.round_dp(2),
        events_men: tally.events_men,
        events_women: tally.events_women,
        matched_men: tally.matched_men,
        matched_women: tally.matched_women,
        window,
    });

    if tally.matched_men == 0 || tally.matched_women == 0 {
        return IndicatorResult::not_computable(
            kind,
            "Needs employees of both sexes present in the first and last declarations",
        )
        .with_detail(detail);
    }
    IndicatorResult::scored(kind, score_gap(scale, gap), detail)
}

/// Indicator 2: raise rate gap between the first and last period.
pub fn raise_gap(
    first: &ParseResult,
    last: &ParseResult,
    types: Option<&BTreeSet<String>>,
) -> IndicatorResult {
    let later = by_payroll_id(last);
    let mut tally = Tally::default();

    for (id, before) in by_payroll_id(first) {
        let Some(after) = later.get(id) else {
            continue;
        };
        let (Some(sex), start, end) = (
            before.sex,
            before.total_remuneration(types),
            after.total_remuneration(types),
        ) else {
            continue;
        };
        if start <= Decimal::ZERO || end <= Decimal::ZERO {
            continue;
        }
        // past the bound no later total can exceed it
        let raised = start
            .checked_mul(RAISE_THRESHOLD)
            .is_some_and(|floor| end > floor);
        tally.record(sex, raised);
    }

    finish(
        IndicatorKind::RaiseGap,
        &RAISE_GAP_SCALE,
        tally,
        window(first, last),
    )
}

/// Indicator 3: promotion rate gap between the first and last period.
pub fn promotion_gap(first: &ParseResult, last: &ParseResult) -> IndicatorResult {
    let later = by_payroll_id(last);
    let mut tally = Tally::default();

    for (id, before) in by_payroll_id(first) {
        let Some(after) = later.get(id) else {
            continue;
        };
        let (Some(sex), Some(from), Some(to)) = (before.sex, before.category, after.category)
        else {
            continue;
        };
        tally.record(sex, is_promotion(from, to));
    }

    finish(
        IndicatorKind::PromotionGap,
        &PROMOTION_GAP_SCALE,
        tally,
        window(first, last),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::{employee, parse_of};
    use crate::model::SocioCategory;
    use rust_decimal_macros::dec;

    fn staff(id: &str, sex: Sex, category: Option<SocioCategory>, pay: Decimal) -> Employee {
        let mut e = employee(sex, category, None, pay);
        e.payroll_id = Some(id.to_string());
        e
    }

    fn detail(result: &IndicatorResult) -> &RateGapDetail {
        match &result.detail {
            IndicatorDetail::RateGap(d) => d,
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_raise_strictly_above_five_percent() {
        let first = parse_of(vec![
            staff("A", Sex::Male, None, dec!(1000)),
            staff("B", Sex::Male, None, dec!(1000)),
            staff("C", Sex::Female, None, dec!(1000)),
            staff("D", Sex::Female, None, dec!(1000)),
        ]);
        let last = parse_of(vec![
            staff("A", Sex::Male, None, dec!(1050)),
            staff("B", Sex::Male, None, dec!(1050.01)),
            staff("C", Sex::Female, None, dec!(1100)),
            staff("D", Sex::Female, None, dec!(1200)),
        ]);
        let result = raise_gap(&first, &last, None);
        let d = detail(&result);
        assert_eq!(d.events_men, 1);
        assert_eq!(d.events_women, 2);
        assert_eq!(d.rate_men_pct, dec!(50));
        assert_eq!(d.rate_women_pct, dec!(100));
        assert_eq!(d.gap_pct, dec!(50));
        assert_eq!(result.score, Some(0));
    }

    #[test]
    fn test_raise_requires_positive_totals_and_payroll_id() {
        let mut no_id = employee(Sex::Male, None, None, dec!(1000));
        no_id.payroll_id = None;
        let first = parse_of(vec![
            staff("A", Sex::Male, None, dec!(0)),
            staff("B", Sex::Male, None, dec!(1000)),
            staff("C", Sex::Female, None, dec!(1000)),
            no_id.clone(),
        ]);
        let mut raised = no_id;
        raised.remunerations[0].amount = dec!(5000);
        let last = parse_of(vec![
            staff("A", Sex::Male, None, dec!(2000)),
            staff("B", Sex::Male, None, dec!(1000)),
            staff("C", Sex::Female, None, dec!(1000)),
            raised,
        ]);
        let result = raise_gap(&first, &last, None);
        let d = detail(&result);
        assert_eq!(d.matched_men, 1);
        assert_eq!(d.matched_women, 1);
        assert_eq!(d.events_men, 0);
        assert_eq!(result.score, Some(20));
    }

    #[test]
    fn test_raise_near_decimal_bound() {
        let first = parse_of(vec![
            staff("A", Sex::Male, None, Decimal::MAX),
            staff("B", Sex::Female, None, dec!(1000)),
        ]);
        let last = parse_of(vec![
            staff("A", Sex::Male, None, Decimal::MAX),
            staff("B", Sex::Female, None, dec!(1000)),
        ]);
        let result = raise_gap(&first, &last, None);
        let d = detail(&result);
        assert_eq!((d.events_men, d.matched_men), (0, 1));
        assert_eq!(result.score, Some(20));
    }

    #[test]
    fn test_promotion_upward_only() {
        let first = parse_of(vec![
            staff("A", Sex::Male, Some(SocioCategory::Worker), dec!(1)),
            staff("B", Sex::Male, Some(SocioCategory::Executive), dec!(1)),
            staff("C", Sex::Female, Some(SocioCategory::Clerical), dec!(1)),
        ]);
        let last = parse_of(vec![
            staff("A", Sex::Male, Some(SocioCategory::Executive), dec!(1)),
            staff("B", Sex::Male, Some(SocioCategory::Worker), dec!(1)),
            staff("C", Sex::Female, Some(SocioCategory::Clerical), dec!(1)),
        ]);
        let result = promotion_gap(&first, &last);
        let d = detail(&result);
        assert_eq!(d.events_men, 1);
        assert_eq!(d.matched_men, 2);
        assert_eq!(d.events_women, 0);
        assert_eq!(d.gap_pct, dec!(50));
        assert_eq!(result.max_score, 15);
        assert_eq!(result.score, Some(0));
    }

    #[test]
    fn test_promotion_skips_unknown_category() {
        let first = parse_of(vec![
            staff("A", Sex::Male, None, dec!(1)),
            staff("B", Sex::Female, Some(SocioCategory::Worker), dec!(1)),
        ]);
        let last = parse_of(vec![
            staff("A", Sex::Male, Some(SocioCategory::Executive), dec!(1)),
            staff("B", Sex::Female, Some(SocioCategory::Worker), dec!(1)),
        ]);
        let result = promotion_gap(&first, &last);
        assert!(!result.computable);
        assert_eq!(result.score, None);
        assert_eq!(detail(&result).matched_men, 0);
    }

    #[test]
    fn test_window_uses_period_ends() {
        let mut first = parse_of(vec![]);
        first.last_period.end = Some("31012024".into());
        let mut last = parse_of(vec![]);
        last.last_period.end = Some("31122024".into());
        assert_eq!(window(&first, &last).to_string(), "31012024 -> 31122024");
    }
}
