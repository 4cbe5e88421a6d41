//! Customers bucketed by length of relationship

use serde::{Deserialize, Serialize};

use super::{check_percentages, check_total, sum_counts, DatasetIssue, TOTAL_CUSTOMERS};

const DATASET: &str = "duration";

/// Buckets starting at this many years count as long tenure
pub const LONG_TENURE_YEARS: u32 = 5;

/// How many customers in a bucket hold one, two, or three or more products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMix {
    pub one: u64,
    pub two: u64,
    pub three_plus: u64,
}

impl ProductMix {
    pub const LABELS: [&'static str; 3] = ["1 Product", "2 Products", "3+ Products"];

    pub fn total(&self) -> u128 {
        sum_counts(self.as_array().into_iter())
    }

    pub fn as_array(&self) -> [u64; 3] {
        [self.one, self.two, self.three_plus]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationBucket {
    pub range: String,
    /// Lower bound of the bucket in whole years
    pub min_years: u32,
    pub customers: u64,
    pub percent: f64,
    pub avg_premium: f64,
    pub avg_products: f64,
    pub product_mix: ProductMix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationData {
    pub total_customers: u64,
    pub buckets: Vec<DurationBucket>,
}

impl DurationData {
    pub fn sample() -> Self {
        let bucket = |range: &str,
                      min_years: u32,
                      customers: u64,
                      percent: f64,
                      avg_premium: f64,
                      avg_products: f64,
                      mix: [u64; 3]| DurationBucket {
            range: range.to_string(),
            min_years,
            customers,
            percent,
            avg_premium,
            avg_products,
            product_mix: ProductMix {
                one: mix[0],
                two: mix[1],
                three_plus: mix[2],
            },
        };

        DurationData {
            total_customers: TOTAL_CUSTOMERS,
            buckets: vec![
                bucket("< 1 year", 0, 1_600, 20.0, 18_000.0, 1.2, [1_320, 240, 40]),
                bucket("1-3 years", 1, 2_400, 30.0, 32_000.0, 1.6, [1_440, 720, 240]),
                bucket("3-5 years", 3, 1_800, 22.5, 48_000.0, 2.1, [720, 630, 450]),
                bucket("5-10 years", 5, 1_400, 17.5, 76_000.0, 2.8, [280, 490, 630]),
                bucket("10+ years", 10, 800, 10.0, 125_000.0, 3.6, [80, 200, 520]),
            ],
        }
    }

    /// Share of customers in buckets from five years up, percent
    pub fn long_tenure_percent(&self) -> f64 {
        self.buckets
            .iter()
            .filter(|b| b.min_years >= LONG_TENURE_YEARS)
            .map(|b| b.percent)
            .sum()
    }

    /// Customer-weighted average product count
    pub fn average_products(&self) -> f64 {
        let customers = sum_counts(self.buckets.iter().map(|b| b.customers));
        if customers == 0 {
            return 0.0;
        }
        let weighted: f64 = self
            .buckets
            .iter()
            .map(|b| b.avg_products * b.customers as f64)
            .sum();
        weighted / customers as f64
    }

    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        check_total(
            &mut issues,
            DATASET,
            "bucket customer counts",
            self.buckets.iter().map(|b| b.customers),
            self.total_customers,
        );
        check_percentages(
            &mut issues,
            DATASET,
            "bucket shares",
            self.buckets.iter().map(|b| b.percent),
        );
        if self
            .buckets
            .windows(2)
            .any(|pair| pair[0].min_years >= pair[1].min_years)
        {
            issues.push(DatasetIssue {
                dataset: DATASET,
                message: "bucket start years are not in ascending order".to_string(),
            });
        }
        for bucket in &self.buckets {
            if bucket.product_mix.total() != u128::from(bucket.customers) {
                issues.push(DatasetIssue {
                    dataset: DATASET,
                    message: format!(
                        "product mix of '{}' sums to {} but the bucket has {} customers",
                        bucket.range,
                        bucket.product_mix.total(),
                        bucket.customers
                    ),
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_sum_to_base() {
        let data = DurationData::sample();
        assert_eq!(data.buckets.len(), 5);
        assert_eq!(data.buckets.iter().map(|b| b.customers).sum::<u64>(), 8_000);
    }

    #[test]
    fn test_product_mix_matches_bucket() {
        let data = DurationData::sample();
        for bucket in &data.buckets {
            assert_eq!(bucket.product_mix.total(), u128::from(bucket.customers), "{}", bucket.range);
        }
    }

    #[test]
    fn test_long_tenure_share() {
        let data = DurationData::sample();
        assert!((data.long_tenure_percent() - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_long_tenure_ignores_range_labels() {
        let mut data = DurationData::sample();
        for bucket in &mut data.buckets {
            bucket.range = format!("Band from {}", bucket.min_years);
        }
        assert!((data.long_tenure_percent() - 27.5).abs() < 1e-9);

        data.buckets.swap(0, 1);
        assert!(data
            .validate()
            .iter()
            .any(|issue| issue.message.contains("ascending")));
    }

    #[test]
    fn test_average_products() {
        let data = DurationData::sample();
        // (1.2*1600 + 1.6*2400 + 2.1*1800 + 2.8*1400 + 3.6*800) / 8000
        assert!((data.average_products() - 2.0425).abs() < 1e-9);
    }
}
