//! Report view: turns a report type, a value unit and the datasets into a
//! fixed layout of stat cards, charts, tables and insights

pub mod chart;
mod channels;
mod contribution;
mod cross_sell;
mod duration;
mod products;
mod satisfaction;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::data::Datasets;
use crate::error::{DatasetError, Result};
use crate::filters::{FullViewRequest, ReportFilters};
use crate::format::ValueUnit;
use crate::report::ReportKind;

pub use chart::{ChartKind, ChartPoint, ChartSpec};

/// Inputs handed to the view by the surrounding application
#[derive(Debug, Clone, Default)]
pub struct ReportProps {
    pub value_unit: String,
    pub selected_report_type: String,
    pub current_filters: Option<ReportFilters>,
}

/// Render-time options derived from the props and local state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub unit: ValueUnit,
    /// Split the duration chart by product count
    pub show_products: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            unit: ValueUnit::default(),
            show_products: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StatCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A breakdown table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Panel {
    pub fn new<S: Into<String>>(title: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Cell lookup by row label (first column) and column name
    pub fn cell(&self, row_label: &str, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(row_label))
            .and_then(|row| row.get(col))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    pub kind: ReportKind,
    pub title: String,
    pub subtitle: String,
    pub unit: ValueUnit,
    pub stats: Vec<StatCard>,
    pub charts: Vec<ChartSpec>,
    pub panels: Vec<Panel>,
    pub insights: Vec<String>,
}

impl ReportPage {
    pub(crate) fn new(kind: ReportKind, subtitle: &str, unit: ValueUnit) -> Self {
        Self {
            title: kind.title().to_string(),
            kind,
            subtitle: subtitle.to_string(),
            unit,
            stats: Vec::new(),
            charts: Vec::new(),
            panels: Vec::new(),
            insights: Vec::new(),
        }
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }

    pub fn chart(&self, title: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.title == title)
    }
}

/// Output of a render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportLayout {
    Page(ReportPage),
    /// The requested report type has no layout
    Placeholder { requested: String, message: String },
}

impl ReportLayout {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ReportLayout::Placeholder { .. })
    }

    pub fn page(&self) -> Option<&ReportPage> {
        match self {
            ReportLayout::Page(page) => Some(page),
            ReportLayout::Placeholder { .. } => None,
        }
    }

    pub fn charts(&self) -> &[ChartSpec] {
        match self {
            ReportLayout::Page(page) => &page.charts,
            ReportLayout::Placeholder { .. } => &[],
        }
    }
}

/// The report view component
pub struct ReportView<'a> {
    datasets: &'a Datasets,
    kind: ReportKind,
    options: ViewOptions,
    filters: ReportFilters,
}

impl<'a> ReportView<'a> {
    pub fn new(datasets: &'a Datasets, props: &ReportProps) -> Self {
        let kind = ReportKind::parse(&props.selected_report_type);
        let unit = ValueUnit::from_label(&props.value_unit);
        let filters = props.current_filters.clone().unwrap_or_else(|| ReportFilters {
            report_type: props.selected_report_type.clone(),
            value_unit: props.value_unit.clone(),
            ..Default::default()
        });

        Self {
            datasets,
            kind,
            options: ViewOptions {
                unit,
                ..Default::default()
            },
            filters,
        }
    }

    pub fn with_show_products(mut self, show_products: bool) -> Self {
        self.options.show_products = show_products;
        self
    }

    pub fn kind(&self) -> &ReportKind {
        &self.kind
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    pub fn filters(&self) -> &ReportFilters {
        &self.filters
    }

    /// Build the layout for the selected report
    ///
    /// Unknown report types yield [`ReportLayout::Placeholder`]. Errors only
    /// come from formatting non-finite values out of a loaded dataset.
    pub fn render(&self) -> Result<ReportLayout> {
        let unit = self.options.unit;
        let page = match &self.kind {
            ReportKind::DurationOfRelationship => {
                duration::build(&self.datasets.duration, unit, self.options.show_products)?
            }
            ReportKind::CustomerSatisfaction => {
                satisfaction::build(&self.datasets.satisfaction, unit)?
            }
            ReportKind::PremiumContribution => {
                contribution::build(&self.datasets.contribution, unit)?
            }
            ReportKind::CommunicationTouchpoints => {
                channels::build(&self.datasets.communication, unit)?
            }
            ReportKind::CrossSellPotential => cross_sell::build(&self.datasets.cross_sell, unit)?,
            ReportKind::ProductsPurchased => products::build(&self.datasets.products, unit)?,
            ReportKind::Unsupported(requested) => {
                tracing::debug!(report = %requested, "no layout for report type");
                return Ok(ReportLayout::Placeholder {
                    requested: requested.clone(),
                    message: format!("The '{}' report is not implemented yet.", requested),
                });
            }
        };

        tracing::trace!(
            report = %page.title,
            charts = page.charts.len(),
            panels = page.panels.len(),
            "built report layout"
        );
        Ok(ReportLayout::Page(page))
    }

    /// Payload for showing one chart full screen
    pub fn full_view_request(&self, chart_index: usize) -> Result<FullViewRequest> {
        let layout = self.render()?;
        let charts = layout.charts();
        let chart = charts
            .get(chart_index)
            .cloned()
            .ok_or_else(|| DatasetError::ChartOutOfRange {
                report: self.kind.title().to_string(),
                index: chart_index,
                available: charts.len(),
            })?;

        Ok(FullViewRequest {
            filters: self.filters.clone(),
            chart_type: Some(chart.kind.label().to_string()),
            chart,
            generated_at: Local::now(),
        })
    }

    /// Full-view payloads for every chart of the report
    pub fn full_view_requests(&self) -> Result<Vec<FullViewRequest>> {
        let count = self.render()?.charts().len();
        (0..count).map(|index| self.full_view_request(index)).collect()
    }
}
