//! Official score scales. Each scale is `(inclusive upper bound, points)`
//! read top to bottom; values past the last bound score 0.

use rust_decimal::Decimal;

/// Indicator 1: average pay gap (%) -> points out of 40.
pub const PAY_GAP_SCALE: [(u32, u32); 20] = [
    (0, 40),
    (1, 39),
    (2, 38),
    (3, 37),
    (4, 35),
    (5, 33),
    (6, 31),
    (7, 29),
    (8, 27),
    (9, 25),
    (10, 23),
    (11, 21),
    (12, 19),
    (13, 17),
    (14, 14),
    (15, 11),
    (16, 8),
    (17, 5),
    (18, 2),
    (19, 1),
];

/// Indicator 2: raise rate gap (points) -> points out of 20.
pub const RAISE_GAP_SCALE: [(u32, u32); 3] = [(2, 20), (3, 10), (5, 5)];

/// Indicator 3: promotion rate gap (points) -> points out of 15.
pub const PROMOTION_GAP_SCALE: [(u32, u32); 3] = [(2, 15), (3, 10), (5, 5)];

/// Indicator 5: `(minimum under-represented count in the top 10, points)`.
pub const TOP_EARNERS_SCALE: [(usize, u32); 2] = [(4, 10), (2, 5)];

/// Look up a gap on a scale.
pub fn score_gap(scale: &[(u32, u32)], gap: Decimal) -> u32 {
    scale
        .iter()
        .find(|(upper, _)| gap <= Decimal::from(*upper))
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub fn score_top_earners(minority_count: usize) -> u32 {
    TOP_EARNERS_SCALE
        .iter()
        .find(|(min, _)| minority_count >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pay_gap_boundaries() {
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(0)), 40);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(0.01)), 39);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(1.0)), 39);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(1.01)), 38);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(3.5)), 35);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(14)), 14);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(19)), 1);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(19.001)), 0);
        assert_eq!(score_gap(&PAY_GAP_SCALE, dec!(45)), 0);
    }

    #[test]
    fn test_pay_gap_scale_is_monotonic() {
        assert!(PAY_GAP_SCALE
            .windows(2)
            .all(|w| w[0].0 < w[1].0 && w[0].1 > w[1].1));
    }

    #[test]
    fn test_raise_scale() {
        assert_eq!(score_gap(&RAISE_GAP_SCALE, dec!(2)), 20);
        assert_eq!(score_gap(&RAISE_GAP_SCALE, dec!(2.5)), 10);
        assert_eq!(score_gap(&RAISE_GAP_SCALE, dec!(4)), 5);
        assert_eq!(score_gap(&RAISE_GAP_SCALE, dec!(5.01)), 0);
    }

    #[test]
    fn test_promotion_scale() {
        assert_eq!(score_gap(&PROMOTION_GAP_SCALE, dec!(0)), 15);
        assert_eq!(score_gap(&PROMOTION_GAP_SCALE, dec!(3)), 10);
        assert_eq!(score_gap(&PROMOTION_GAP_SCALE, dec!(5)), 5);
        assert_eq!(score_gap(&PROMOTION_GAP_SCALE, dec!(50)), 0);
    }

    #[test]
    fn test_top_earners_scale() {
        assert_eq!(score_top_earners(5), 10);
        assert_eq!(score_top_earners(4), 10);
        assert_eq!(score_top_earners(3), 5);
        assert_eq!(score_top_earners(2), 5);
        assert_eq!(score_top_earners(1), 0);
        assert_eq!(score_top_earners(0), 0);
    }
}
