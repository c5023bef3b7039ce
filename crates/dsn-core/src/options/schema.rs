use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Caller-supplied settings for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `DDMMYYYY`; when absent the declarations supply one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,
    /// Remuneration type codes counted in totals; absent means all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remuneration_types: Option<BTreeSet<String>>,
}

impl AnalysisOptions {
    /// The allow-list to apply, treating an empty set as no filter.
    pub fn type_filter(&self) -> Option<&BTreeSet<String>> {
        self.remuneration_types.as_ref().filter(|t| !t.is_empty())
    }

    pub fn with_reference_date(mut self, date: impl Into<String>) -> Self {
        self.reference_date = Some(date.into());
        self
    }

    pub fn with_types<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remuneration_types = Some(codes.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_type_set_is_no_filter() {
        let opts = AnalysisOptions::default().with_types(Vec::<String>::new());
        assert!(opts.remuneration_types.is_some());
        assert!(opts.type_filter().is_none());
    }

    #[test]
    fn test_type_filter() {
        let opts = AnalysisOptions::default().with_types(["003"]);
        assert!(opts.type_filter().unwrap().contains("003"));
    }
}
