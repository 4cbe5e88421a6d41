//! Report filters and the full-view payload handed to the surrounding UI

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::view::chart::ChartSpec;

/// Filter selection made by the enclosing application
///
/// The view only displays these; the sample datasets are not filtered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default)]
    pub report_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub value_unit: String,
}

impl ReportFilters {
    /// Short `key: value` pairs for the filters that are set
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut parts = Vec::new();
        if let Some(entity) = &self.entity {
            parts.push(("Entity", entity.clone()));
        }
        if let Some(business_type) = &self.business_type {
            parts.push(("Business", business_type.clone()));
        }
        if let Some(location) = &self.location {
            parts.push(("Location", location.clone()));
        }
        if let Some(duration) = &self.duration {
            parts.push(("Period", duration.clone()));
        }
        parts
    }

    /// Fill unset fields from `other`, keeping values already present
    pub fn merged_with(&self, other: &ReportFilters) -> ReportFilters {
        ReportFilters {
            entity: self.entity.clone().or_else(|| other.entity.clone()),
            report_type: if self.report_type.is_empty() {
                other.report_type.clone()
            } else {
                self.report_type.clone()
            },
            business_type: self
                .business_type
                .clone()
                .or_else(|| other.business_type.clone()),
            location: self.location.clone().or_else(|| other.location.clone()),
            duration: self.duration.clone().or_else(|| other.duration.clone()),
            value_unit: if self.value_unit.is_empty() {
                other.value_unit.clone()
            } else {
                self.value_unit.clone()
            },
        }
    }
}

/// Request to show one chart in a full-screen view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullViewRequest {
    pub filters: ReportFilters,
    pub chart: ChartSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    pub generated_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_skips_unset() {
        let filters = ReportFilters {
            entity: Some("North Zone".into()),
            location: Some("Pune".into()),
            ..Default::default()
        };
        let summary = filters.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0], ("Entity", "North Zone".to_string()));
        assert_eq!(summary[1], ("Location", "Pune".to_string()));
    }

    #[test]
    fn test_merge_prefers_self() {
        let cli = ReportFilters {
            location: Some("Mumbai".into()),
            value_unit: "Lakh".into(),
            ..Default::default()
        };
        let saved = ReportFilters {
            location: Some("Delhi".into()),
            business_type: Some("Retail".into()),
            value_unit: "Crore".into(),
            ..Default::default()
        };
        let merged = cli.merged_with(&saved);
        assert_eq!(merged.location.as_deref(), Some("Mumbai"));
        assert_eq!(merged.business_type.as_deref(), Some("Retail"));
        assert_eq!(merged.value_unit, "Lakh");
    }

    #[test]
    fn test_filters_json_omits_empty_options() {
        let filters = ReportFilters {
            report_type: "Duration of Relationship".into(),
            value_unit: "Crore".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&filters).unwrap();
        assert!(!json.contains("entity"));
        assert!(json.contains("\"report_type\":\"Duration of Relationship\""));
    }
}
