//! Customer satisfaction by star rating, and the derived NPS

use serde::{Deserialize, Serialize};

use super::{check_percentages, check_total, sum_counts, DatasetIssue, TOTAL_CUSTOMERS};

const DATASET: &str = "satisfaction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRating {
    /// 1 to 5
    pub stars: u8,
    pub customers: u64,
    pub percent: f64,
    pub avg_spend: f64,
    pub label: String,
    pub retention_rate: f64,
}

impl StarRating {
    pub fn is_promoter(&self) -> bool {
        self.stars >= 5
    }

    pub fn is_detractor(&self) -> bool {
        self.stars <= 3
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpsTrendPoint {
    pub month: String,
    pub nps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionData {
    pub total_customers: u64,
    pub ratings: Vec<StarRating>,
    pub nps_trend: Vec<NpsTrendPoint>,
}

impl SatisfactionData {
    pub fn sample() -> Self {
        let rating = |stars: u8,
                      customers: u64,
                      percent: f64,
                      avg_spend: f64,
                      label: &str,
                      retention_rate: f64| StarRating {
            stars,
            customers,
            percent,
            avg_spend,
            label: label.to_string(),
            retention_rate,
        };

        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let scores = [2.0, 3.5, 4.0, 3.0, 5.5, 6.0, 7.5, 7.0, 8.5, 9.0, 9.5, 10.0];

        SatisfactionData {
            total_customers: TOTAL_CUSTOMERS,
            ratings: vec![
                rating(5, 3_200, 40.0, 68_000.0, "Very Satisfied", 95.5),
                rating(4, 2_400, 30.0, 52_000.0, "Satisfied", 88.0),
                rating(3, 1_200, 15.0, 38_000.0, "Neutral", 72.5),
                rating(2, 720, 9.0, 27_000.0, "Dissatisfied", 54.0),
                rating(1, 480, 6.0, 19_000.0, "Very Dissatisfied", 31.5),
            ],
            nps_trend: months
                .iter()
                .zip(scores.iter())
                .map(|(month, nps)| NpsTrendPoint {
                    month: month.to_string(),
                    nps: *nps,
                })
                .collect(),
        }
    }

    fn rated_customers(&self) -> u128 {
        sum_counts(self.ratings.iter().map(|r| r.customers))
    }

    fn share_where(&self, predicate: impl Fn(&StarRating) -> bool) -> f64 {
        let total = self.rated_customers();
        if total == 0 {
            return 0.0;
        }
        let matching = sum_counts(
            self.ratings
                .iter()
                .filter(|r| predicate(*r))
                .map(|r| r.customers),
        );
        matching as f64 / total as f64 * 100.0
    }

    /// Share of 5-star customers, percent
    pub fn promoter_percent(&self) -> f64 {
        self.share_where(StarRating::is_promoter)
    }

    /// Share of customers rating 3 stars or fewer, percent
    pub fn detractor_percent(&self) -> f64 {
        self.share_where(StarRating::is_detractor)
    }

    /// Net Promoter Score: promoters minus detractors
    pub fn nps(&self) -> f64 {
        self.promoter_percent() - self.detractor_percent()
    }

    pub fn average_rating(&self) -> f64 {
        let total = self.rated_customers();
        if total == 0 {
            return 0.0;
        }
        let weighted: u128 = self
            .ratings
            .iter()
            .map(|r| u128::from(r.stars) * u128::from(r.customers))
            .sum();
        weighted as f64 / total as f64
    }

    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        check_total(
            &mut issues,
            DATASET,
            "rating customer counts",
            self.ratings.iter().map(|r| r.customers),
            self.total_customers,
        );
        check_percentages(
            &mut issues,
            DATASET,
            "rating shares",
            self.ratings.iter().map(|r| r.percent),
        );
        if let Some(bad) = self.ratings.iter().find(|r| !(1..=5).contains(&r.stars)) {
            issues.push(DatasetIssue {
                dataset: DATASET,
                message: format!("rating with {} stars is outside 1-5", bad.stars),
            });
        }
        issues
    }
}
