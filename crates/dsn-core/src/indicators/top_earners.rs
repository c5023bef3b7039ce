use crate::indicators::outcome::{
    IndicatorDetail, IndicatorKind, IndicatorResult, RankedEmployee, TopEarnersDetail,
};
use crate::indicators::scoring::score_top_earners;
use crate::model::{ParseResult, Sex};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

pub const TOP_SIZE: usize = 10;

/// Indicator 5: how many of the ten highest paid belong to the sex that is
/// under-represented across the whole company.
pub fn top_earners(parse: &ParseResult, types: Option<&BTreeSet<String>>) -> IndicatorResult {
    let mut ranked: Vec<RankedEmployee> = parse
        .employees
        .iter()
        .filter_map(|e| {
            let sex = e.sex?;
            let total = e.total_remuneration(types);
            (total > Decimal::ZERO).then(|| RankedEmployee {
                key: e.key().to_string(),
                last_name: e.last_name.clone(),
                first_name: e.first_name.clone(),
                sex,
                category: e.category,
                total,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(TOP_SIZE);

    let company_men = count_sex(parse, Sex::Male);
    let company_women = count_sex(parse, Sex::Female);

    if ranked.len() < TOP_SIZE {
        let found = ranked.len();
        return IndicatorResult {
            kind: IndicatorKind::TopEarners,
            score: Some(0),
            max_score: IndicatorKind::TopEarners.max_score(),
            computable: false,
            message: Some(format!(
                "Fewer than {TOP_SIZE} employees with remuneration ({found} found)"
            )),
            detail: IndicatorDetail::TopEarners(TopEarnersDetail {
                top: ranked,
                men_in_top: 0,
                women_in_top: 0,
                minority_sex: None,
                minority_in_top: 0,
                company_men,
                company_women,
            }),
        };
    }

    let men_in_top = ranked.iter().filter(|r| r.sex == Sex::Male).count();
    let women_in_top = ranked.len() - men_in_top;
    let minority_sex = if company_women < company_men {
        Sex::Female
    } else {
        Sex::Male
    };
    let minority_in_top = match minority_sex {
        Sex::Male => men_in_top,
        Sex::Female => women_in_top,
    };

    IndicatorResult::scored(
        IndicatorKind::TopEarners,
        score_top_earners(minority_in_top),
        IndicatorDetail::TopEarners(TopEarnersDetail {
            top: ranked,
            men_in_top,
            women_in_top,
            minority_sex: Some(minority_sex),
            minority_in_top,
            company_men,
            company_women,
        }),
    )
}

fn count_sex(parse: &ParseResult, sex: Sex) -> usize {
    parse.employees.iter().filter(|e| e.sex == Some(sex)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testing::{employee, parse_of};
    use crate::model::{Employee, SocioCategory};

    fn paid(sex: Sex, amount: i64) -> Employee {
        employee(sex, Some(SocioCategory::Worker), None, Decimal::from(amount))
    }

    fn detail(result: &IndicatorResult) -> &TopEarnersDetail {
        match &result.detail {
            IndicatorDetail::TopEarners(d) => d,
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_fewer_than_ten() {
        let employees = (0..9).map(|i| paid(Sex::Male, 1000 + i)).collect();
        let result = top_earners(&parse_of(employees), None);
        assert_eq!(result.score, Some(0));
        assert_eq!(result.max_score, 10);
        assert!(!result.computable);
        assert!(result.message.as_deref().unwrap().contains("9 found"));
    }

    #[test]
    fn test_unpaid_not_ranked() {
        let mut employees: Vec<Employee> = (0..9).map(|i| paid(Sex::Male, 1000 + i)).collect();
        employees.push(paid(Sex::Female, 0));
        let result = top_earners(&parse_of(employees), None);
        assert!(!result.computable);
    }

    #[test]
    fn test_exactly_ten_minority_three() {
        // company: 7 men, 3 women -> women are the minority
        let mut employees: Vec<Employee> = (0..7).map(|i| paid(Sex::Male, 3000 + i)).collect();
        employees.extend((0..3).map(|i| paid(Sex::Female, 2000 + i)));
        let result = top_earners(&parse_of(employees), None);
        let d = detail(&result);
        assert!(result.computable);
        assert_eq!(d.minority_sex, Some(Sex::Female));
        assert_eq!(d.minority_in_top, 3);
        assert_eq!(result.score, Some(5));
    }

    #[test]
    fn test_minority_is_company_wide() {
        // company: 12 women, 8 men -> men are the minority even though
        // the top 10 is mostly men
        let mut employees: Vec<Employee> = (0..8).map(|i| paid(Sex::Male, 5000 + i)).collect();
        employees.extend((0..12).map(|i| paid(Sex::Female, 1000 + i)));
        let result = top_earners(&parse_of(employees), None);
        let d = detail(&result);
        assert_eq!(d.minority_sex, Some(Sex::Male));
        assert_eq!(d.men_in_top, 8);
        assert_eq!(d.women_in_top, 2);
        assert_eq!(d.minority_in_top, 8);
        assert_eq!(result.score, Some(10));
        assert_eq!(d.top.len(), 10);
        assert!(d.top.windows(2).all(|w| w[0].total >= w[1].total));
    }

    #[test]
    fn test_tie_defaults_minority_to_men() {
        let mut employees: Vec<Employee> = (0..5).map(|i| paid(Sex::Male, 1000 + i)).collect();
        employees.extend((0..5).map(|i| paid(Sex::Female, 2000 + i)));
        let result = top_earners(&parse_of(employees), None);
        let d = detail(&result);
        assert_eq!(d.minority_sex, Some(Sex::Male));
        assert_eq!(d.minority_in_top, 5);
        assert_eq!(result.score, Some(10));
    }
}
