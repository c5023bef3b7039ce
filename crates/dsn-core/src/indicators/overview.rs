use crate::classify::age::{pyramid_band, PYRAMID_BANDS};
use crate::model::{ParseResult, Sex};
use crate::parsing::values::parse_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Headcount and mean pay per sex across the whole declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SexOverview {
    pub men: usize,
    pub women: usize,
    /// Employees whose sex could not be determined.
    pub unknown: usize,
    pub men_pct: Decimal,
    pub women_pct: Decimal,
    /// Employees with nonzero filtered remuneration, per sex.
    pub paid_men: usize,
    pub paid_women: usize,
    pub mean_pay_men: Option<Decimal>,
    pub mean_pay_women: Option<Decimal>,
    /// `(mean_men - mean_women) / mean_men * 100`, when both means exist.
    pub pay_gap_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidRow {
    pub band: String,
    pub men: usize,
    pub women: usize,
}

fn share(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) / Decimal::from(whole) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// None when nobody is paid or the sum left the representable range.
fn mean(sum: Option<Decimal>, count: usize) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    sum?.checked_div(Decimal::from(count))
}

fn add(sum: Option<Decimal>, total: Decimal) -> Option<Decimal> {
    sum?.checked_add(total)
}

pub fn sex_overview(parse: &ParseResult, types: Option<&BTreeSet<String>>) -> SexOverview {
    let mut overview = SexOverview::default();
    let (mut sum_men, mut sum_women) = (Some(Decimal::ZERO), Some(Decimal::ZERO));

    for employee in &parse.employees {
        let total = employee.total_remuneration(types);
        let paid = total > Decimal::ZERO;
        match employee.sex {
            Some(Sex::Male) => {
                overview.men += 1;
                if paid {
                    overview.paid_men += 1;
                    sum_men = add(sum_men, total);
                }
            }
            Some(Sex::Female) => {
                overview.women += 1;
                if paid {
                    overview.paid_women += 1;
                    sum_women = add(sum_women, total);
                }
            }
            None => overview.unknown += 1,
        }
    }

    let known = overview.men + overview.women;
    overview.men_pct = share(overview.men, known);
    overview.women_pct = share(overview.women, known);

    let mean_men = mean(sum_men, overview.paid_men);
    let mean_women = mean(sum_women, overview.paid_women);
    overview.pay_gap_pct = match (mean_men, mean_women) {
        (Some(m), Some(w)) if !m.is_zero() => m
            .checked_sub(w)
            .and_then(|d| d.checked_div(m))
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .map(|gap| gap.round_dp(2)),
        _ => None,
    };
    overview.mean_pay_men = mean_men.map(|m| m.round_dp(2));
    overview.mean_pay_women = mean_women.map(|w| w.round_dp(2));
    overview
}

/// Headcount per sex in every five-year band, youngest first. Bands with no
/// one are still listed.
pub fn age_pyramid(parse: &ParseResult, reference: NaiveDate) -> Vec<PyramidRow> {
    let mut rows: Vec<PyramidRow> = PYRAMID_BANDS
        .iter()
        .map(|(_, band)| PyramidRow {
            band: band.to_string(),
            men: 0,
            women: 0,
        })
        .collect();

    for employee in &parse.employees {
        let Some(sex) = employee.sex else { continue };
        let Some(band) = employee
            .birth_date
            .as_deref()
            .and_then(parse_date)
            .and_then(|birth| pyramid_band(birth, reference))
        else {
            continue;
        };
        if let Some(row) = rows.iter_mut().find(|r| r.band == band) {
            match sex {
                Sex::Male => row.men += 1,
                Sex::Female => row.women += 1,
            }
        }
    }
    rows
}
