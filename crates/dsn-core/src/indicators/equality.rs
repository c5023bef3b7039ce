use crate::indicators::outcome::{
    IndicatorDetail, IndicatorKind, IndicatorResult, PartitionGap, PayGapDetail,
};
use crate::indicators::scoring::{score_gap, PAY_GAP_SCALE};
use crate::model::{AgeBracket, ParseResult, Sex, SocioCategory};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Minimum headcount of each sex for a partition to count.
pub const MIN_PER_SEX: usize = 3;

#[derive(Default)]
struct Partition {
    men: Vec<Decimal>,
    women: Vec<Decimal>,
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return Some(Decimal::ZERO);
    }
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?
        .checked_div(Decimal::from(values.len()))
}

/// `(mean_men - mean_women) / mean_men * 100`, None when out of range.
fn signed_gap(mean_men: Decimal, mean_women: Decimal) -> Option<Decimal> {
    if mean_men.is_zero() {
        return Some(Decimal::ZERO);
    }
    mean_men
        .checked_sub(mean_women)?
        .checked_div(mean_men)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn empty_detail() -> IndicatorDetail {
    IndicatorDetail::PayGap(PayGapDetail {
        average_gap_pct: Decimal::ZERO,
        valid_partitions: 0,
        partitions: Vec::new(),
    })
}

fn out_of_range() -> IndicatorResult {
    IndicatorResult::not_computable(
        IndicatorKind::PayGap,
        "Remuneration figures too large to compare",
    )
    .with_detail(empty_detail())
}

/// Indicator 1: pay gap between men and women within comparable groups.
///
/// Employees need a known sex, category and age bracket plus nonzero filtered
/// remuneration. Partitions short of [`MIN_PER_SEX`] on either side are dropped.
pub fn pay_gap(parse: &ParseResult, types: Option<&BTreeSet<String>>) -> IndicatorResult {
    let mut partitions: BTreeMap<(SocioCategory, AgeBracket), Partition> = BTreeMap::new();

    for employee in &parse.employees {
        let (Some(sex), Some(category), Some(bracket)) =
            (employee.sex, employee.category, employee.age_bracket)
        else {
            continue;
        };
        let total = employee.total_remuneration(types);
        if total <= Decimal::ZERO {
            continue;
        }
        let partition = partitions.entry((category, bracket)).or_default();
        match sex {
            Sex::Male => partition.men.push(total),
            Sex::Female => partition.women.push(total),
        }
    }

    let mut gaps = Vec::new();
    let mut details = Vec::new();
    for ((category, age_bracket), partition) in &partitions {
        if partition.men.len() < MIN_PER_SEX || partition.women.len() < MIN_PER_SEX {
            continue;
        }
        let (Some(mean_men), Some(mean_women)) = (mean(&partition.men), mean(&partition.women))
        else {
            return out_of_range();
        };
        let Some(gap) = signed_gap(mean_men, mean_women) else {
            return out_of_range();
        };
        gaps.push(gap.abs());
        details.push(PartitionGap {
            category: *category,
            age_bracket: *age_bracket,
            men: partition.men.len(),
            women: partition.women.len(),
            mean_men: mean_men.round_dp(2),
            mean_women: mean_women.round_dp(2),
            gap_pct: gap.round_dp(2),
        });
    }

    if gaps.is_empty() {
        return IndicatorResult::not_computable(
            IndicatorKind::PayGap,
            format!(
                "No group has at least {MIN_PER_SEX} men and {MIN_PER_SEX} women with remuneration"
            ),
        )
        .with_detail(empty_detail());
    }

    let Some(average) = mean(&gaps) else {
        return out_of_range();
    };
    IndicatorResult::scored(
        IndicatorKind::PayGap,
        score_gap(&PAY_GAP_SCALE, average),
        IndicatorDetail::PayGap(PayGapDetail {
            average_gap_pct: average.round_dp(2),
            valid_partitions: details.len(),
            partitions: details,
        }),
    )
}
