//! Renderer-independent chart description
//!
//! Layout builders emit [`ChartSpec`] values; the terminal UI, the text
//! printer and the JSON export each draw them their own way.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Pie,
    Bar,
    /// One segment per series, stacked per point
    StackedBar,
    Area,
    /// Each point carries `[x, y]`
    Scatter,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::StackedBar => "stacked-bar",
            ChartKind::Area => "area",
            ChartKind::Scatter => "scatter",
        }
    }
}

/// One category (bar, slice, month or scatter dot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    /// One value per series; `[x, y]` for scatter charts
    pub values: Vec<f64>,
    /// Formatted headline value shown next to the point
    pub display: String,
    /// Lines shown when the point is selected
    pub tooltip: Vec<String>,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, values: Vec<f64>, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values,
            display: display.into(),
            tooltip: Vec::new(),
        }
    }

    pub fn with_tooltip(mut self, lines: Vec<String>) -> Self {
        self.tooltip = lines;
        self
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<String>,
    pub points: Vec<ChartPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            title: title.into(),
            kind,
            series: Vec::new(),
            points: Vec::new(),
            x_label: None,
            y_label: None,
        }
    }

    pub fn with_series<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.series = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    pub fn push(&mut self, point: ChartPoint) {
        self.points.push(point);
    }

    /// Per-point sums across series
    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(ChartPoint::total).collect()
    }

    /// Largest per-point sum, or 0 for an empty chart
    pub fn max_total(&self) -> f64 {
        self.points
            .iter()
            .map(ChartPoint::total)
            .fold(0.0, f64::max)
    }

    /// Largest single value of one series
    pub fn series_max(&self, series: usize) -> f64 {
        self.points
            .iter()
            .filter_map(|p| p.values.get(series).copied())
            .fold(0.0, f64::max)
    }

    /// `(min, max)` across every value in the chart
    pub fn value_bounds(&self) -> (f64, f64) {
        let mut values = self.points.iter().flat_map(|p| p.values.iter().copied());
        match values.next() {
            Some(first) => values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))),
            None => (0.0, 0.0),
        }
    }

    pub fn tooltip(&self, index: usize) -> Option<&[String]> {
        self.points.get(index).map(|p| p.tooltip.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked() -> ChartSpec {
        let mut chart = ChartSpec::new("Customers", ChartKind::StackedBar).with_series(["a", "b"]);
        chart.push(ChartPoint::new("x", vec![1.0, 2.0], "3"));
        chart.push(ChartPoint::new("y", vec![4.0, 0.5], "4.5"));
        chart
    }

    #[test]
    fn test_totals() {
        let chart = stacked();
        assert_eq!(chart.totals(), vec![3.0, 4.5]);
        assert_eq!(chart.max_total(), 4.5);
        assert_eq!(chart.series_max(1), 2.0);
        assert_eq!(chart.value_bounds(), (0.5, 4.0));
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartSpec::new("Empty", ChartKind::Bar);
        assert_eq!(chart.max_total(), 0.0);
        assert_eq!(chart.value_bounds(), (0.0, 0.0));
        assert!(chart.tooltip(0).is_none());
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ChartKind::StackedBar).unwrap();
        assert_eq!(json, "\"stacked-bar\"");
    }
}
