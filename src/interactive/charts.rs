//! Draws a [`ChartSpec`] with ratatui widgets
//!
//! Pie and stacked bars are drawn as lines of colored blocks, plain bars use
//! `BarChart`, area and scatter charts use `Chart` with braille markers.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::format::{create_bar, pad_str, truncate_str};
use crate::view::{ChartKind, ChartSpec};

use super::utils::{series_color, value_color};

/// Resolution of the integer bar values handed to `BarChart`
const BAR_SCALE: f64 = 1000.0;

pub fn render_chart(f: &mut Frame, chart: &ChartSpec, selected: Option<usize>, area: Rect, focused: bool) {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} [{}] ", chart.title, chart.kind.label()))
        .border_style(Style::default().fg(border));

    if chart.points.is_empty() {
        let empty = Paragraph::new(Span::styled("No data", Style::default().fg(Color::Gray)))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    match chart.kind {
        ChartKind::Pie => render_share_bars(f, chart, selected, area, block),
        ChartKind::Bar => render_bars(f, chart, selected, area, block),
        ChartKind::StackedBar => render_stacked(f, chart, selected, area, block),
        ChartKind::Area => render_area(f, chart, selected, area, block),
        ChartKind::Scatter => render_scatter(f, chart, selected, area, block),
    }
}

fn label_width(chart: &ChartSpec, area: Rect) -> usize {
    let longest = chart
        .points
        .iter()
        .map(|p| unicode_width::UnicodeWidthStr::width(p.label.as_str()))
        .max()
        .unwrap_or(0);
    longest.min(area.width as usize / 3).max(4)
}

fn row_style(index: usize, selected: Option<usize>) -> Style {
    if selected == Some(index) {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
    }
}

/// Pie charts as one proportional bar per slice
fn render_share_bars(f: &mut Frame, chart: &ChartSpec, selected: Option<usize>, area: Rect, block: Block) {
    let total: f64 = chart.totals().iter().sum();
    let label_w = label_width(chart, area);
    let bar_w = (area.width as usize).saturating_sub(label_w + 14).max(1);

    let lines: Vec<Line> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            Line::from(vec![
                Span::styled(pad_str(&point.label, label_w), row_style(i, selected)),
                Span::raw(" "),
                Span::styled(
                    create_bar(point.total(), total, bar_w),
                    Style::default().fg(series_color(i)),
                ),
                Span::raw(" "),
                Span::styled(point.display.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_bars(f: &mut Frame, chart: &ChartSpec, selected: Option<usize>, area: Rect, block: Block) {
    let max = chart
        .points
        .iter()
        .map(|p| p.total().abs())
        .fold(0.0, f64::max);
    let count = chart.points.len() as u16;
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width / count.max(1)).saturating_sub(1).clamp(1, 12);

    let bars: Vec<Bar> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let value = point.total();
            let scaled = if max > 0.0 {
                (value.abs() / max * BAR_SCALE).round() as u64
            } else {
                0
            };
            let color = if value < 0.0 { value_color(value) } else { series_color(0) };
            let mut style = Style::default().fg(color);
            if selected == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Bar::default()
                .value(scaled)
                .text_value(point.display.clone())
                .label(Line::from(truncate_str(&point.label, bar_width as usize)))
                .style(style)
        })
        .collect();

    let widget = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(BAR_SCALE as u64);

    f.render_widget(widget, area);
}

/// One line per point with a colored segment per series
fn render_stacked(f: &mut Frame, chart: &ChartSpec, selected: Option<usize>, area: Rect, block: Block) {
    let max = chart.max_total();
    let label_w = label_width(chart, area);
    let bar_w = (area.width as usize).saturating_sub(label_w + 12).max(1);

    let mut lines: Vec<Line> = chart
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let mut spans = vec![
                Span::styled(pad_str(&point.label, label_w), row_style(i, selected)),
                Span::raw(" "),
            ];
            let mut used = 0;
            for (series, value) in point.values.iter().enumerate() {
                let cells = if max > 0.0 {
                    (value / max * bar_w as f64).round() as usize
                } else {
                    0
                };
                let cells = cells.min(bar_w - used);
                used += cells;
                spans.push(Span::styled(
                    "█".repeat(cells),
                    Style::default().fg(series_color(series)),
                ));
            }
            spans.push(Span::raw(" ".repeat(bar_w - used + 1)));
            spans.push(Span::styled(
                point.display.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(legend(&chart.series));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn legend(series: &[String]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, name) in series.iter().enumerate() {
        spans.push(Span::styled("■ ", Style::default().fg(series_color(i))));
        spans.push(Span::raw(format!("{}  ", name)));
    }
    Line::from(spans)
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    let mid = (lo + hi) / 2.0;
    vec![
        Span::raw(compact(lo)),
        Span::raw(compact(mid)),
        Span::raw(compact(hi)),
    ]
}

/// Short axis tick such as `1.2M` or `45.0`
fn compact(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.1}", value)
    }
}

fn padded_bounds(lo: f64, hi: f64) -> [f64; 2] {
    let lo = lo.min(0.0);
    let span = (hi - lo).abs().max(1.0);
    [lo, hi + span * 0.1]
}

fn render_area(f: &mut Frame, chart: &ChartSpec, selected: Option<usize>, area: Rect, block: Block) {
    let series_count = chart.series.len().max(1);
    let series_points: Vec<Vec<(f64, f64)>> = (0..series_count)
        .map(|s| {
            chart
                .points
                .iter()
                .enumerate()
                .filter_map(|(x, p)| p.values.get(s).map(|&y| (x as f64, y)))
                .collect()
        })
        .collect();
    let marker_points: Vec<(f64, f64)> = selected
        .and_then(|i| chart.points.get(i).map(|p| (i, p)))
        .map(|(i, p)| p.values.iter().map(|&y| (i as f64, y)).collect())
        .unwrap_or_default();

    let mut datasets: Vec<Dataset> = series_points
        .iter()
        .enumerate()
        .map(|(s, data)| {
            Dataset::default()
                .name(chart.series.get(s).cloned().unwrap_or_default())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(s)))
                .data(data)
        })
        .collect();
    if !marker_points.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&marker_points),
        );
    }

    let (lo, hi) = chart.value_bounds();
    let y_bounds = padded_bounds(lo, hi);
    let last = chart.points.len().saturating_sub(1);
    let x_labels: Vec<Span> = [0, last / 2, last]
        .iter()
        .filter_map(|&i| chart.points.get(i))
        .map(|p| Span::raw(p.label.clone()))
        .collect();

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(chart.x_label.clone().unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_label.clone().unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds[0], y_bounds[1])),
        );

    f.render_widget(widget, area);
}

fn render_scatter(f: &mut Frame, chart: &ChartSpec, selected: Option<usize>, area: Rect, block: Block) {
    let points: Vec<(f64, f64)> = chart
        .points
        .iter()
        .filter_map(|p| match p.values.as_slice() {
            [x, y, ..] => Some((*x, *y)),
            _ => None,
        })
        .collect();
    let highlighted: Vec<(f64, f64)> = selected
        .and_then(|i| points.get(i).copied())
        .into_iter()
        .collect();

    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));
    let x_bounds = padded_bounds(x_lo, x_hi);
    let y_bounds = padded_bounds(y_lo, y_hi);

    let mut datasets = vec![Dataset::default()
        .name(chart.series.first().cloned().unwrap_or_default())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(series_color(0)))
        .data(&points)];
    if !highlighted.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&highlighted),
        );
    }

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(chart.x_label.clone().unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds[0], x_bounds[1])),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_label.clone().unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds[0], y_bounds[1])),
        );

    f.render_widget(widget, area);
}

/// `(min, max)` of the values, `(0, 0)` when there are none
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_ticks() {
        assert_eq!(compact(1_300_000.0), "1.3M");
        assert_eq!(compact(45_000.0), "45.0k");
        assert_eq!(compact(-12.5), "-12.5");
    }

    #[test]
    fn test_bounds_include_zero() {
        assert_eq!(padded_bounds(5.0, 15.0), [0.0, 16.5]);
        let [lo, hi] = padded_bounds(-2.0, 8.0);
        assert_eq!(lo, -2.0);
        assert!(hi > 8.0);
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(bounds(std::iter::empty()), (0.0, 0.0));
        assert_eq!(bounds([3.0, 1.0].into_iter()), (1.0, 3.0));
    }
}
