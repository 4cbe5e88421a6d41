//! Plain-text rendering of a report layout for the `show` command

use std::io::{self, Write};

use crate::filters::ReportFilters;
use crate::format::{create_bar, pad_str};
use crate::view::{ChartKind, ChartSpec, Panel, ReportLayout, ReportPage};

const RULE_WIDTH: usize = 70;
const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 22;
const MAX_COLUMN_WIDTH: usize = 24;

/// Print a layout to stdout
pub fn print_layout(layout: &ReportLayout, filters: &ReportFilters) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_layout(&mut out, layout, filters)
}

pub fn write_layout<W: Write>(
    out: &mut W,
    layout: &ReportLayout,
    filters: &ReportFilters,
) -> io::Result<()> {
    match layout {
        ReportLayout::Page(page) => write_page(out, page, filters),
        ReportLayout::Placeholder { requested, message } => {
            writeln!(out, "\n=== {} ===", requested)?;
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
            writeln!(out, "💡 {}", message)?;
            Ok(())
        }
    }
}

fn write_page<W: Write>(out: &mut W, page: &ReportPage, filters: &ReportFilters) -> io::Result<()> {
    writeln!(out, "\n=== {} ===", page.title.to_uppercase())?;
    writeln!(out, "{}", page.subtitle)?;

    let mut context = vec![format!("Unit: {}", page.unit)];
    context.extend(
        filters
            .summary()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value)),
    );
    writeln!(out, "{}", context.join("  |  "))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for stat in &page.stats {
        match &stat.detail {
            Some(detail) => writeln!(
                out,
                "{} {:<16} ({})",
                pad_str(&stat.label, 28),
                stat.value,
                detail
            )?,
            None => writeln!(out, "{} {}", pad_str(&stat.label, 28), stat.value)?,
        }
    }

    for chart in &page.charts {
        write_chart(out, chart)?;
    }

    for panel in &page.panels {
        write_panel(out, panel)?;
    }

    if !page.insights.is_empty() {
        writeln!(out, "\nKey Insights")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for insight in &page.insights {
            writeln!(out, "  • {}", insight)?;
        }
    }

    Ok(())
}

fn write_chart<W: Write>(out: &mut W, chart: &ChartSpec) -> io::Result<()> {
    writeln!(out, "\n{} [{}]", chart.title, chart.kind.label())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    match chart.kind {
        ChartKind::Scatter => {
            let x = chart.x_label.as_deref().unwrap_or("x");
            let y = chart.y_label.as_deref().unwrap_or("y");
            for point in &chart.points {
                let (px, py) = match point.values.as_slice() {
                    [px, py, ..] => (*px, *py),
                    _ => continue,
                };
                writeln!(
                    out,
                    "{} {} {:.1}  {} {:.1}  {}",
                    pad_str(&point.label, LABEL_WIDTH),
                    x,
                    px,
                    y,
                    py,
                    point.display
                )?;
            }
        }
        ChartKind::Pie => {
            let total: f64 = chart.totals().iter().sum();
            for point in &chart.points {
                writeln!(
                    out,
                    "{} {} {}",
                    pad_str(&point.label, LABEL_WIDTH),
                    create_bar(point.total(), total, BAR_WIDTH),
                    point.display
                )?;
            }
        }
        ChartKind::Bar | ChartKind::StackedBar | ChartKind::Area => {
            // Bars scale against the largest magnitude so negative growth still shows
            let max = chart
                .points
                .iter()
                .map(|p| p.total().abs())
                .fold(0.0, f64::max);
            for point in &chart.points {
                writeln!(
                    out,
                    "{} {} {}",
                    pad_str(&point.label, LABEL_WIDTH),
                    create_bar(point.total().abs(), max, BAR_WIDTH),
                    point.display
                )?;
            }
            if chart.kind == ChartKind::StackedBar {
                write_stack_breakdown(out, chart)?;
            }
        }
    }

    Ok(())
}

fn write_stack_breakdown<W: Write>(out: &mut W, chart: &ChartSpec) -> io::Result<()> {
    write!(out, "{}", pad_str("", LABEL_WIDTH))?;
    for name in &chart.series {
        write!(out, " {:>10}", name)?;
    }
    writeln!(out)?;
    for point in &chart.points {
        write!(out, "{}", pad_str(&point.label, LABEL_WIDTH))?;
        for value in &point.values {
            write!(out, " {:>10.0}", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_panel<W: Write>(out: &mut W, panel: &Panel) -> io::Result<()> {
    let widths = column_widths(panel);

    writeln!(out, "\n{}", panel.title)?;
    let header: Vec<String> = panel
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad_str(column, *width))
        .collect();
    writeln!(out, "{}", header.join(" ").trim_end())?;
    writeln!(
        out,
        "{}",
        "-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1))
    )?;

    for row in &panel.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_str(cell, *width))
            .collect();
        writeln!(out, "{}", cells.join(" ").trim_end())?;
    }

    Ok(())
}

fn column_widths(panel: &Panel) -> Vec<usize> {
    use unicode_width::UnicodeWidthStr;

    panel
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            panel
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.width())
                .chain(std::iter::once(column.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}
