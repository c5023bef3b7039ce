use crate::model::{AgeBracket, Sex, SocioCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five statutory indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    PayGap,
    RaiseGap,
    PromotionGap,
    MaternityReturn,
    TopEarners,
}

impl IndicatorKind {
    pub fn number(self) -> u8 {
        match self {
            IndicatorKind::PayGap => 1,
            IndicatorKind::RaiseGap => 2,
            IndicatorKind::PromotionGap => 3,
            IndicatorKind::MaternityReturn => 4,
            IndicatorKind::TopEarners => 5,
        }
    }

    pub fn max_score(self) -> u32 {
        match self {
            IndicatorKind::PayGap => 40,
            IndicatorKind::RaiseGap => 20,
            IndicatorKind::PromotionGap => 15,
            IndicatorKind::MaternityReturn => 15,
            IndicatorKind::TopEarners => 10,
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            IndicatorKind::PayGap => "Pay gap",
            IndicatorKind::RaiseGap => "Individual raise rate gap",
            IndicatorKind::PromotionGap => "Promotion rate gap",
            IndicatorKind::MaternityReturn => "Raises on return from maternity leave",
            IndicatorKind::TopEarners => "Under-represented sex among the 10 highest paid",
        };
        write!(f, "{title}")
    }
}

/// Outcome of one indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub kind: IndicatorKind,
    /// None when the indicator could not be computed.
    pub score: Option<u32>,
    pub max_score: u32,
    pub computable: bool,
    /// Why the indicator is not computable, or a caveat on its score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub detail: IndicatorDetail,
}

impl IndicatorResult {
    pub fn scored(kind: IndicatorKind, score: u32, detail: IndicatorDetail) -> Self {
        IndicatorResult {
            kind,
            score: Some(score),
            max_score: kind.max_score(),
            computable: true,
            message: None,
            detail,
        }
    }

    pub fn not_computable(kind: IndicatorKind, message: impl Into<String>) -> Self {
        IndicatorResult {
            kind,
            score: None,
            max_score: kind.max_score(),
            computable: false,
            message: Some(message.into()),
            detail: IndicatorDetail::None,
        }
    }

    pub fn with_detail(mut self, detail: IndicatorDetail) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorDetail {
    None,
    PayGap(PayGapDetail),
    RateGap(RateGapDetail),
    TopEarners(TopEarnersDetail),
}

/// Male/female comparison inside one (category, age bracket) partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionGap {
    pub category: SocioCategory,
    pub age_bracket: AgeBracket,
    pub men: usize,
    pub women: usize,
    pub mean_men: Decimal,
    pub mean_women: Decimal,
    /// `(mean_men - mean_women) / mean_men * 100`, signed.
    pub gap_pct: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayGapDetail {
    /// Mean of the absolute partition gaps.
    pub average_gap_pct: Decimal,
    pub valid_partitions: usize,
    /// Valid partitions sorted by category then age bracket.
    pub partitions: Vec<PartitionGap>,
}

/// The two period ends compared in multi-period mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonWindow {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl fmt::Display for ComparisonWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.from.as_deref().unwrap_or("N/A"),
            self.to.as_deref().unwrap_or("N/A")
        )
    }
}

/// Per-sex event rates (raises or promotions) between two periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateGapDetail {
    pub rate_men_pct: Decimal,
    pub rate_women_pct: Decimal,
    pub gap_pct: Decimal,
    pub events_men: usize,
    pub events_women: usize,
    pub matched_men: usize,
    pub matched_women: usize,
    pub window: ComparisonWindow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEmployee {
    pub key: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub sex: Sex,
    pub category: Option<SocioCategory>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopEarnersDetail {
    pub top: Vec<RankedEmployee>,
    pub men_in_top: usize,
    pub women_in_top: usize,
    /// Sex with fewer employees company-wide.
    pub minority_sex: Option<Sex>,
    pub minority_in_top: usize,
    pub company_men: usize,
    pub company_women: usize,
}
