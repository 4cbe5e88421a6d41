//! Sample analytics datasets
//!
//! Every report reads from one immutable [`Datasets`] value built once at
//! startup, either from the built-in sample literals or from a JSON file of
//! the same shape.

pub mod channels;
pub mod cross_sell;
pub mod duration;
pub mod products;
pub mod satisfaction;
pub mod tiers;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::DatasetError;

pub use channels::{ChannelMetric, ChannelTrendPoint, CommunicationData};
pub use cross_sell::{
    CrossSellData, CustomerSegment, Level, ProductPenetration, RevenueOpportunity,
};
pub use duration::{DurationBucket, DurationData, ProductMix};
pub use products::{ProductCombination, ProductCountCategory, ProductsData};
pub use satisfaction::{NpsTrendPoint, SatisfactionData, StarRating};
pub use tiers::{ContributionData, CustomerTier, TopContributor};

/// Customers in the sample book
pub const TOTAL_CUSTOMERS: u64 = 8_000;

/// Percentages are stated to one decimal, so sums may drift by this much
const PERCENT_TOLERANCE: f64 = 0.15;

/// A violated dataset invariant
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetIssue {
    pub dataset: &'static str,
    pub message: String,
}

impl std::fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.dataset, self.message)
    }
}

/// All report datasets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datasets {
    pub contribution: ContributionData,
    pub cross_sell: CrossSellData,
    pub satisfaction: SatisfactionData,
    pub duration: DurationData,
    pub communication: CommunicationData,
    pub products: ProductsData,
}

impl Datasets {
    /// The built-in sample data
    pub fn builtin() -> Self {
        Datasets {
            contribution: ContributionData::sample(),
            cross_sell: CrossSellData::sample(),
            satisfaction: SatisfactionData::sample(),
            duration: DurationData::sample(),
            communication: CommunicationData::sample(),
            products: ProductsData::sample(),
        }
    }

    /// Load datasets from a JSON file
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let data = fs::read_to_string(path).map_err(|e| DatasetError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let datasets: Datasets =
            serde_json::from_str(&data).map_err(|e| DatasetError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded datasets from file");
        Ok(datasets)
    }

    /// Load from `path` when given, otherwise use the built-in data
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, DatasetError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Check the count and percentage invariants of every dataset
    ///
    /// The render never depends on these holding; callers decide whether to
    /// warn or fail.
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        issues.extend(self.contribution.validate());
        issues.extend(self.cross_sell.validate());
        issues.extend(self.satisfaction.validate());
        issues.extend(self.duration.validate());
        issues.extend(self.communication.validate());
        issues.extend(self.products.validate());
        issues
    }
}

impl Default for Datasets {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Sum customer counts wide enough that loaded data cannot overflow
pub(crate) fn sum_counts(counts: impl Iterator<Item = u64>) -> u128 {
    counts.map(u128::from).sum()
}

/// Record an issue when bucket counts do not add up to the stated total
pub(crate) fn check_total(
    issues: &mut Vec<DatasetIssue>,
    dataset: &'static str,
    what: &str,
    counts: impl Iterator<Item = u64>,
    expected: u64,
) {
    let sum = sum_counts(counts);
    if sum != u128::from(expected) {
        issues.push(DatasetIssue {
            dataset,
            message: format!("{} sum to {} but the stated total is {}", what, sum, expected),
        });
    }
}

/// Record an issue when percentages do not add up to ~100
pub(crate) fn check_percentages(
    issues: &mut Vec<DatasetIssue>,
    dataset: &'static str,
    what: &str,
    percentages: impl Iterator<Item = f64>,
) {
    let sum: f64 = percentages.sum();
    if (sum - 100.0).abs() > PERCENT_TOLERANCE {
        issues.push(DatasetIssue {
            dataset,
            message: format!("{} sum to {:.1}%", what, sum),
        });
    }
}

/// Record an issue when a stated share disagrees with `part / whole`
pub(crate) fn check_share(
    issues: &mut Vec<DatasetIssue>,
    dataset: &'static str,
    what: &str,
    stated: f64,
    part: f64,
    whole: f64,
) {
    if whole <= 0.0 {
        return;
    }
    let actual = part / whole * 100.0;
    if (stated - actual).abs() > PERCENT_TOLERANCE {
        issues.push(DatasetIssue {
            dataset,
            message: format!("{} is stated as {:.1}% but computes to {:.1}%", what, stated, actual),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_is_consistent() {
        let issues = Datasets::builtin().validate();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[test]
    fn test_tampered_counts_are_reported() {
        let mut datasets = Datasets::builtin();
        datasets.satisfaction.ratings[0].customers += 10;
        let issues = datasets.validate();
        assert!(issues.iter().any(|issue| issue.dataset == "satisfaction"));
        assert!(issues.iter().all(|issue| issue.dataset == "satisfaction"));
    }

    #[test]
    fn test_huge_counts_are_reported_not_overflowed() {
        let mut datasets = Datasets::builtin();
        datasets.duration.buckets[0].customers = u64::MAX;
        datasets.satisfaction.ratings[0].customers = u64::MAX;
        datasets.products.categories[0].customers = u64::MAX;
        datasets.communication.channels[0].customers = u64::MAX;
        datasets.cross_sell.products[0].current_customers = u64::MAX;

        let issues = datasets.validate();
        for dataset in ["duration", "satisfaction", "products", "communication", "cross_sell"] {
            assert!(
                issues.iter().any(|issue| issue.dataset == dataset),
                "no issue for {}: {:?}",
                dataset,
                issues
            );
        }
        // The other four duration buckets hold 6,400 customers
        let wide_sum = (u128::from(u64::MAX) + 6_400).to_string();
        assert!(issues.iter().any(|issue| issue.message.contains(&wide_sum)));
    }

    #[test]
    fn test_sum_counts_is_wide() {
        assert_eq!(
            sum_counts([u64::MAX, u64::MAX].into_iter()),
            2 * u128::from(u64::MAX)
        );
    }

    #[test]
    fn test_load_round_trips_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Datasets::builtin()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = Datasets::load(file.path()).unwrap();
        assert_eq!(loaded.contribution.tiers.len(), 4);
        assert_eq!(loaded.duration.total_customers, TOTAL_CUSTOMERS);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Datasets::load(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::ParseFailed { .. }));

        let err = Datasets::load(Path::new("/definitely/missing.json")).unwrap_err();
        assert!(matches!(err, DatasetError::LoadFailed { .. }));
    }
}
