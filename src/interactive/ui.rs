//! Main UI rendering logic

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::filters::FullViewRequest;
use crate::view::{ReportLayout, ReportPage};

use super::app::{App, AppMode};
use super::charts::render_chart;
use super::panels::{render_insights, render_panels, render_stats, render_tooltip};
use super::utils::{centered_rect, get_message_style};

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Report
            Constraint::Length(5), // Messages
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, app, chunks[0]);

    match (&app.mode, &app.full_view) {
        (AppMode::FullView, Some(request)) => render_full_view(f, app, request, chunks[1]),
        _ => match &app.layout {
            ReportLayout::Page(page) => render_page(f, app, page, chunks[1]),
            ReportLayout::Placeholder { requested, message } => {
                render_placeholder(f, requested, message, chunks[1])
            }
        },
    }

    render_messages(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);

    if app.mode == AppMode::Help {
        render_help(f, size);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.report),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("│ Unit: {} ", app.unit), Style::default().fg(Color::Yellow)),
    ];
    if app.report == crate::report::ReportKind::DurationOfRelationship {
        let split = if app.show_products { "on" } else { "off" };
        spans.push(Span::styled(
            format!("│ Product split: {} ", split),
            Style::default().fg(Color::Yellow),
        ));
    }
    for (key, value) in app.filters.summary() {
        spans.push(Span::styled(
            format!("│ {}: {} ", key, value),
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Customer Insights ")
            .title_alignment(Alignment::Left)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);

    // Clock in the top-right corner of the header border
    let clock = Local::now().format(" %d %b %Y %H:%M ").to_string();
    let width = clock.chars().count() as u16;
    if area.width > width + 2 && area.height > 0 {
        let clock_area = Rect {
            x: area.x + area.width - width - 1,
            y: area.y,
            width,
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(clock, Style::default().fg(Color::Cyan))),
            clock_area,
        );
    }
}

fn render_page(f: &mut Frame, app: &App, page: &ReportPage, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Subtitle
            Constraint::Length(4), // Stat cards
            Constraint::Min(8),    // Charts and tables
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", page.subtitle),
            Style::default().fg(Color::Gray),
        )),
        rows[0],
    );
    render_stats(f, &page.stats, rows[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(columns[0]);

    match page.charts.get(app.selected_chart) {
        Some(chart) => render_chart(f, chart, app.selected_point, left[0], true),
        None => render_placeholder(f, &page.title, "This report has no charts.", left[0]),
    }
    render_tooltip(f, app.current_tooltip(), left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(columns[1]);
    render_panels(f, &page.panels, right[0]);
    render_insights(f, &page.insights, right[1]);
}

fn render_full_view(f: &mut Frame, app: &App, request: &FullViewRequest, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8)])
        .split(area);

    let mut context = vec![
        format!("Report: {}", request.filters.report_type),
        format!("Unit: {}", request.filters.value_unit),
    ];
    context.extend(
        request
            .filters
            .summary()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value)),
    );
    context.push(format!("Opened {}", request.generated_at.format("%H:%M:%S")));
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", context.join("  │  ")),
            Style::default().fg(Color::Gray),
        )),
        rows[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(rows[1]);
    render_chart(f, &request.chart, app.selected_point, columns[0], true);
    render_tooltip(f, app.current_tooltip(), columns[1]);
}

fn render_placeholder(f: &mut Frame, requested: &str, message: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            requested.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Tab to pick a supported report",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Report ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let section = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled("Reports:", section)),
        Line::from("  Tab / Shift+Tab   Next / previous report"),
        Line::from("  u                 Cycle value unit"),
        Line::from("  t                 Toggle product split (Duration)"),
        Line::from(""),
        Line::from(Span::styled("Charts:", section)),
        Line::from("  ←/→               Select chart"),
        Line::from("  ↑/↓               Select data point"),
        Line::from("  f or Enter        Full view of the chart"),
        Line::from("  s                 Save full-view JSON"),
        Line::from(""),
        Line::from(Span::styled("General:", section)),
        Line::from("  ?                 Show this help"),
        Line::from("  Esc               Back / clear selection"),
        Line::from("  q                 Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to return",
            Style::default().fg(Color::Gray),
        )),
    ];

    let popup = centered_rect(56, help_text.len() as u16 + 2, area);
    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    let recent: Vec<_> = app
        .messages
        .iter()
        .rev()
        .filter(|msg| !msg.is_expired())
        .take(3)
        .collect();

    for msg in recent.iter().rev() {
        let style = get_message_style(msg.message_type);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", msg.icon()), style),
            Span::styled(msg.text.as_str(), style),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ready",
            Style::default().fg(Color::Gray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.mode {
        AppMode::Normal => {
            "[Tab] Next report  [Shift+Tab] Prev  [u]nit  [t]oggle products  [←→] Chart  [↑↓] Point  [f]ull view  [s]ave  [?] help  [q]uit"
        }
        AppMode::FullView => "[←→] Chart  [↑↓] Point  [s]ave JSON  [Esc/f] Back",
        AppMode::Help => "[Esc/?] Return",
    };

    let footer = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::Datasets;
    use crate::report::ReportKind;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw_app(app: &App) -> String {
        let backend = TestBackend::new(160, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn app_for(report: &str) -> App {
        let config = Config {
            report_type: report.to_string(),
            ..Default::default()
        };
        App::new(Datasets::builtin(), &config)
    }

    #[test]
    fn test_every_report_draws() {
        for kind in ReportKind::ALL.iter() {
            let mut app = app_for(kind.title());
            let text = draw_app(&app);
            assert!(text.contains(kind.title()), "missing title for {}", kind);
            assert!(text.contains("Key Insights"));

            // every chart of the report draws as well
            let charts = app.layout.charts().len();
            for _ in 0..charts {
                app.handle_event(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE))
                    .unwrap();
                app.handle_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
                    .unwrap();
                draw_app(&app);
            }
        }
    }

    #[test]
    fn test_placeholder_draws() {
        let app = app_for("Nonexistent Report");
        let text = draw_app(&app);
        assert!(text.contains("Nonexistent Report"));
        assert!(text.contains("not implemented"));
    }

    #[test]
    fn test_full_view_and_help_draw() {
        let mut app = app_for("Customer Satisfaction / NPS");
        app.handle_event(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE))
            .unwrap();
        let text = draw_app(&app);
        assert!(text.contains("Rating Distribution"));
        assert!(text.contains("Report: Customer Satisfaction / NPS"));

        app.handle_event(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE))
            .unwrap();
        let text = draw_app(&app);
        assert!(text.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = app_for("Cross-Sell / Upsell Potential");
        let backend = TestBackend::new(20, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
