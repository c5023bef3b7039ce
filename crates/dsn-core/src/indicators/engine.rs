use crate::indicators::equality::pay_gap;
use crate::indicators::evolution::{promotion_gap, raise_gap};
use crate::indicators::outcome::{IndicatorKind, IndicatorResult};
use crate::indicators::top_earners::top_earners;
use crate::model::ParseResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// The five indicators of one analysis, in statutory order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub pay_gap: IndicatorResult,
    pub raise_gap: IndicatorResult,
    pub promotion_gap: IndicatorResult,
    pub maternity_return: IndicatorResult,
    pub top_earners: IndicatorResult,
}

impl IndicatorSet {
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorResult> {
        [
            &self.pay_gap,
            &self.raise_gap,
            &self.promotion_gap,
            &self.maternity_return,
            &self.top_earners,
        ]
        .into_iter()
    }

    /// Points earned by the computable indicators.
    pub fn points(&self) -> u32 {
        self.iter()
            .filter(|r| r.computable)
            .filter_map(|r| r.score)
            .sum()
    }

    /// Maximum points of the computable indicators.
    pub fn max_points(&self) -> u32 {
        self.iter()
            .filter(|r| r.computable)
            .map(|r| r.max_score)
            .sum()
    }
}

fn needs_two_periods(kind: IndicatorKind) -> IndicatorResult {
    IndicatorResult::not_computable(
        kind,
        "Needs at least two declarations from different periods",
    )
}

fn maternity_return() -> IndicatorResult {
    IndicatorResult::not_computable(
        IndicatorKind::MaternityReturn,
        "Needs work stoppage data for maternity leave, which declarations parsed here do not carry",
    )
}

/// Indicators for one declaration.
///
/// Age brackets must already be assigned against the reference date.
pub fn compute_single(parse: &ParseResult, types: Option<&BTreeSet<String>>) -> IndicatorSet {
    IndicatorSet {
        pay_gap: pay_gap(parse, types),
        raise_gap: needs_two_periods(IndicatorKind::RaiseGap),
        promotion_gap: needs_two_periods(IndicatorKind::PromotionGap),
        maternity_return: maternity_return(),
        top_earners: top_earners(parse, types),
    }
}

/// Indicators across declarations already ordered by period end.
///
/// Indicators 1 and 5 describe the last declaration; 2 and 3 compare the
/// first with the last. Returns None for an empty slice.
pub fn compute_multi(
    periods: &[ParseResult],
    types: Option<&BTreeSet<String>>,
) -> Option<IndicatorSet> {
    let (first, last) = (periods.first()?, periods.last()?);
    if periods.len() < 2 {
        return Some(compute_single(last, types));
    }
    debug!(
        periods = periods.len(),
        from = ?first.last_period.end,
        to = ?last.last_period.end,
        "comparing declarations"
    );
    Some(IndicatorSet {
        pay_gap: pay_gap(last, types),
        raise_gap: raise_gap(first, last, types),
        promotion_gap: promotion_gap(first, last),
        maternity_return: maternity_return(),
        top_earners: top_earners(last, types),
    })
}

/// Order declarations by period end, oldest first. Undated declarations go
/// last and keep their relative order.
pub fn sort_by_period_end(periods: &mut [ParseResult]) {
    periods.sort_by_key(|p| {
        let end = p.period_end();
        (end.is_none(), end)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::{employee, parse_of};
    use crate::model::{Sex, SocioCategory};
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_period_shapes() {
        let set = compute_single(&parse_of(vec![]), None);
        assert!(!set.raise_gap.computable);
        assert_eq!(set.raise_gap.score, None);
        assert_eq!(set.raise_gap.max_score, 20);
        assert_eq!(set.promotion_gap.max_score, 15);
        assert!(set.promotion_gap.message.is_some());
        assert!(!set.maternity_return.computable);
        assert_eq!(set.maternity_return.max_score, 15);
        assert_eq!(set.top_earners.score, Some(0));
    }

    #[test]
    fn test_points_skip_non_computable() {
        let set = compute_single(&parse_of(vec![]), None);
        assert_eq!(set.points(), 0);
        assert_eq!(set.max_points(), 0);
    }

    #[test]
    fn test_multi_needs_two_periods() {
        assert!(compute_multi(&[], None).is_none());
        let one = compute_multi(&[parse_of(vec![])], None).unwrap();
        assert!(!one.raise_gap.computable);
    }

    #[test]
    fn test_multi_uses_last_period_for_top_earners() {
        let first = parse_of(vec![employee(Sex::Male, None, None, dec!(1000))]);
        let last = parse_of(
            (0..10)
                .map(|i| {
                    let sex = if i < 6 { Sex::Male } else { Sex::Female };
                    employee(sex, Some(SocioCategory::Worker), None, dec!(1000))
                })
                .collect(),
        );
        let set = compute_multi(&[first, last], None).unwrap();
        assert!(set.top_earners.computable);
        assert_eq!(set.top_earners.score, Some(10));
    }

    #[test]
    fn test_sort_by_period_end() {
        let dated = |end: Option<&str>, line_count| {
            let mut p = parse_of(vec![]);
            p.last_period.end = end.map(String::from);
            p.line_count = line_count;
            p
        };
        let mut periods = vec![
            dated(None, 1),
            dated(Some("31122024"), 2),
            dated(Some("31012024"), 3),
            dated(None, 4),
        ];
        sort_by_period_end(&mut periods);
        let order: Vec<usize> = periods.iter().map(|p| p.line_count).collect();
        assert_eq!(order, vec![3, 2, 1, 4]);
    }
}
