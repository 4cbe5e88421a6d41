//! Stat cards, breakdown tables, tooltip and insight panes

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::format::truncate_str;
use crate::view::{Panel, StatCard};

/// Stat cards side by side
pub fn render_stats(f: &mut Frame, stats: &[StatCard], area: Rect) {
    if stats.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = stats
        .iter()
        .map(|_| Constraint::Ratio(1, stats.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (stat, chunk) in stats.iter().zip(chunks.iter()) {
        let width = chunk.width.saturating_sub(2) as usize;
        let mut lines = vec![Line::from(Span::styled(
            truncate_str(&stat.value, width),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))];
        if let Some(detail) = &stat.detail {
            lines.push(Line::from(Span::styled(
                truncate_str(detail, width),
                Style::default().fg(Color::Gray),
            )));
        }

        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", truncate_str(&stat.label, width.saturating_sub(2))))
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(card, *chunk);
    }
}

/// Breakdown tables stacked vertically
pub fn render_panels(f: &mut Frame, panels: &[Panel], area: Rect) {
    if panels.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = panels
        .iter()
        .map(|p| Constraint::Min(p.rows.len() as u16 + 3))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (panel, chunk) in panels.iter().zip(chunks.iter()) {
        render_table(f, panel, *chunk);
    }
}

fn render_table(f: &mut Frame, panel: &Panel, area: Rect) {
    let widths = column_widths(panel, area.width.saturating_sub(2));

    let header = Row::new(
        panel
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| Cell::from(truncate_str(column, *width as usize))),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = panel
        .rows
        .iter()
        .map(|row| {
            Row::new(
                row.iter()
                    .zip(&widths)
                    .map(|(cell, width)| Cell::from(truncate_str(cell, *width as usize))),
            )
        })
        .collect();

    let table = Table::new(rows, widths.iter().map(|w| Constraint::Length(*w)))
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", panel.title))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

/// Natural column widths, shrunk evenly when they do not fit
fn column_widths(panel: &Panel, available: u16) -> Vec<u16> {
    let mut widths: Vec<u16> = panel
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
                .unwrap_or(0) as u16
        })
        .collect();

    let spacing = widths.len().saturating_sub(1) as u16;
    let budget = available.saturating_sub(spacing);
    while widths.iter().sum::<u16>() > budget {
        let Some(widest) = widths.iter_mut().max() else {
            break;
        };
        if *widest <= 4 {
            break;
        }
        *widest -= 1;
    }
    widths
}

/// Tooltip lines for the selected data point
pub fn render_tooltip(f: &mut Frame, tooltip: Option<&[String]>, area: Rect) {
    let lines: Vec<Line> = match tooltip {
        Some(lines) if !lines.is_empty() => lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    Line::from(Span::styled(
                        line.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(line.clone())
                }
            })
            .collect(),
        _ => vec![Line::from(Span::styled(
            "Use ↑/↓ to inspect a data point",
            Style::default().fg(Color::Gray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_insights(f: &mut Frame, insights: &[String], area: Rect) {
    let lines: Vec<Line> = insights
        .iter()
        .map(|insight| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::Green)),
                Span::raw(insight.clone()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Key Insights ")
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_widths_fit_available_space() {
        let mut panel = Panel::new("Tiers", ["Tier", "Customers", "Contribution"]);
        panel.push_row(vec!["High Value".into(), "800".into(), "56.3%".into()]);

        assert_eq!(column_widths(&panel, 80), vec![10, 9, 12]);

        let narrow = column_widths(&panel, 24);
        assert!(narrow.iter().sum::<u16>() + 2 <= 24);
        assert!(narrow.iter().all(|w| *w >= 4));
    }
}
