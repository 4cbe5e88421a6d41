//! Communication channels and monthly touchpoint volumes

use serde::{Deserialize, Serialize};

use super::{check_percentages, check_total, sum_counts, DatasetIssue, TOTAL_CUSTOMERS};

const DATASET: &str = "communication";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetric {
    pub channel: String,
    /// Customers whose preferred channel this is
    pub customers: u64,
    pub preference_percent: f64,
    pub engagement_rate: f64,
    pub response_rate: f64,
    /// Out of 5
    pub satisfaction: f64,
    pub cost_per_contact: f64,
}

/// Touchpoints in one month, one volume per channel in channel order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelTrendPoint {
    pub month: String,
    pub volumes: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationData {
    pub total_customers: u64,
    pub channels: Vec<ChannelMetric>,
    pub monthly_touchpoints: Vec<ChannelTrendPoint>,
}

impl CommunicationData {
    pub fn sample() -> Self {
        let channel = |name: &str,
                       customers: u64,
                       preference_percent: f64,
                       engagement_rate: f64,
                       response_rate: f64,
                       satisfaction: f64,
                       cost_per_contact: f64| ChannelMetric {
            channel: name.to_string(),
            customers,
            preference_percent,
            engagement_rate,
            response_rate,
            satisfaction,
            cost_per_contact,
        };

        let month = |name: &str, volumes: [u64; 5]| ChannelTrendPoint {
            month: name.to_string(),
            volumes: volumes.to_vec(),
        };

        CommunicationData {
            total_customers: TOTAL_CUSTOMERS,
            channels: vec![
                channel("Mobile App", 2_400, 30.0, 68.5, 42.0, 4.4, 12.0),
                channel("Email", 1_840, 23.0, 34.2, 18.5, 3.8, 3.0),
                channel("WhatsApp", 1_600, 20.0, 72.8, 55.3, 4.5, 5.0),
                channel("Branch Visit", 1_200, 15.0, 81.0, 76.4, 4.1, 420.0),
                channel("Call Centre", 960, 12.0, 58.6, 64.2, 3.6, 85.0),
            ],
            monthly_touchpoints: vec![
                month("Jul", [5_200, 4_100, 2_900, 1_350, 2_050]),
                month("Aug", [5_650, 4_050, 3_300, 1_300, 1_980]),
                month("Sep", [6_100, 3_900, 3_750, 1_280, 1_900]),
                month("Oct", [6_800, 3_850, 4_200, 1_240, 1_820]),
                month("Nov", [7_300, 3_700, 4_650, 1_210, 1_760]),
                month("Dec", [7_900, 3_650, 5_100, 1_180, 1_700]),
            ],
        }
    }

    /// Channel with the largest preference share
    pub fn top_channel(&self) -> Option<&ChannelMetric> {
        self.channels
            .iter()
            .max_by(|a, b| a.preference_percent.total_cmp(&b.preference_percent))
    }

    /// Preference-weighted engagement rate
    pub fn weighted_engagement(&self) -> f64 {
        self.weighted(|c| c.engagement_rate)
    }

    /// Preference-weighted satisfaction score
    pub fn weighted_satisfaction(&self) -> f64 {
        self.weighted(|c| c.satisfaction)
    }

    fn weighted(&self, metric: impl Fn(&ChannelMetric) -> f64) -> f64 {
        let customers = sum_counts(self.channels.iter().map(|c| c.customers));
        if customers == 0 {
            return 0.0;
        }
        self.channels
            .iter()
            .map(|c| metric(c) * c.customers as f64)
            .sum::<f64>()
            / customers as f64
    }

    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        check_total(
            &mut issues,
            DATASET,
            "channel customer counts",
            self.channels.iter().map(|c| c.customers),
            self.total_customers,
        );
        check_percentages(
            &mut issues,
            DATASET,
            "channel preferences",
            self.channels.iter().map(|c| c.preference_percent),
        );
        for point in &self.monthly_touchpoints {
            if point.volumes.len() != self.channels.len() {
                issues.push(DatasetIssue {
                    dataset: DATASET,
                    message: format!(
                        "{} has {} volumes for {} channels",
                        point.month,
                        point.volumes.len(),
                        self.channels.len()
                    ),
                });
            }
        }
        issues
    }
}
