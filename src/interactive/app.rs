//! Application state and key handling for the interactive UI

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::data::Datasets;
use crate::filters::{FullViewRequest, ReportFilters};
use crate::format::ValueUnit;
use crate::report::ReportKind;
use crate::view::{ChartSpec, ReportLayout, ReportProps, ReportView};

use super::messages::{Message, MESSAGE_HISTORY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Report page with chart and point selection
    Normal,
    Help,
    /// One chart full screen
    FullView,
}

pub struct App {
    pub datasets: Datasets,
    pub report: ReportKind,
    pub unit: ValueUnit,
    pub filters: ReportFilters,
    /// Split the duration chart by product count
    pub show_products: bool,
    pub mode: AppMode,
    /// Index into the layout's charts
    pub selected_chart: usize,
    /// Index into the selected chart's points
    pub selected_point: Option<usize>,
    pub messages: Vec<Message>,
    pub layout: ReportLayout,
    pub full_view: Option<FullViewRequest>,
    export_dir: Option<PathBuf>,
}

impl App {
    pub fn new(datasets: Datasets, config: &Config) -> Self {
        let mut app = App {
            report: ReportKind::parse(&config.report_type),
            unit: ValueUnit::from_label(&config.value_unit),
            filters: config.filters.clone(),
            show_products: config.show_products,
            mode: AppMode::Normal,
            selected_chart: 0,
            selected_point: None,
            messages: Vec::new(),
            layout: ReportLayout::Placeholder {
                requested: String::new(),
                message: String::new(),
            },
            full_view: None,
            export_dir: ProjectDirs::from("com", "custinsight", "custinsight")
                .map(|dirs| dirs.data_dir().join("exports")),
            datasets,
        };

        for issue in app.datasets.validate() {
            tracing::warn!(dataset = issue.dataset, "{}", issue.message);
            app.push_message(Message::warning(issue.to_string()));
        }

        app.refresh();
        app.push_message(Message::info("Press ? for keyboard shortcuts"));
        app
    }

    /// Write full-view exports here instead of the platform data directory
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    fn view(&self) -> ReportView<'_> {
        let props = ReportProps {
            value_unit: self.unit.label().to_string(),
            selected_report_type: self.report.title().to_string(),
            current_filters: Some(ReportFilters {
                report_type: self.report.title().to_string(),
                value_unit: self.unit.label().to_string(),
                ..self.filters.clone()
            }),
        };
        ReportView::new(&self.datasets, &props).with_show_products(self.show_products)
    }

    /// Rebuild the layout after a state change
    ///
    /// A failed render keeps the previous layout on screen.
    pub fn refresh(&mut self) {
        let rendered = self.view().render();
        match rendered {
            Ok(layout) => {
                self.layout = layout;
                let charts = self.layout.charts().len();
                if self.selected_chart >= charts {
                    self.selected_chart = 0;
                }
                self.clamp_point();
            }
            Err(e) => {
                tracing::error!(report = %self.report, error = %e, "render failed");
                self.push_message(Message::error(format!("Could not render report: {}", e)));
            }
        }
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        if self.messages.len() > MESSAGE_HISTORY {
            let excess = self.messages.len() - MESSAGE_HISTORY;
            self.messages.drain(..excess);
        }
    }

    pub fn current_chart(&self) -> Option<&ChartSpec> {
        match self.mode {
            AppMode::FullView => self.full_view.as_ref().map(|request| &request.chart),
            _ => self.layout.charts().get(self.selected_chart),
        }
    }

    pub fn current_tooltip(&self) -> Option<&[String]> {
        let chart = self.current_chart()?;
        chart.tooltip(self.selected_point?)
    }

    /// Returns `Ok(false)` when the app should exit
    pub fn handle_event(&mut self, event: KeyEvent) -> Result<bool> {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Ok(false);
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_mode(event),
            AppMode::Help => self.handle_help_mode(event),
            AppMode::FullView => self.handle_full_view_mode(event),
        }
    }

    fn handle_normal_mode(&mut self, event: KeyEvent) -> Result<bool> {
        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                return Ok(false);
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
            }
            KeyCode::Tab => {
                if event.modifiers.contains(KeyModifiers::SHIFT) {
                    self.switch_report(self.report.previous());
                } else {
                    self.switch_report(self.report.next());
                }
            }
            KeyCode::BackTab => {
                self.switch_report(self.report.previous());
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                self.unit = self.unit.next();
                self.refresh();
                self.push_message(Message::info(format!("Values in {}", self.unit)));
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.toggle_products();
            }
            KeyCode::Left => self.select_chart(-1),
            KeyCode::Right => self.select_chart(1),
            KeyCode::Up => self.select_point(-1),
            KeyCode::Down => self.select_point(1),
            KeyCode::Esc => {
                self.selected_point = None;
            }
            KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Enter => {
                self.open_full_view();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.save_selected_chart()?;
            }
            _ => {}
        }
        Ok(true)
    }

    fn handle_help_mode(&mut self, event: KeyEvent) -> Result<bool> {
        match event.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.mode = AppMode::Normal;
            }
            _ => {}
        }
        Ok(true)
    }

    fn handle_full_view_mode(&mut self, event: KeyEvent) -> Result<bool> {
        match event.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('f') | KeyCode::Char('F') => {
                self.mode = AppMode::Normal;
                self.full_view = None;
            }
            KeyCode::Up => self.select_point(-1),
            KeyCode::Down => self.select_point(1),
            KeyCode::Left => {
                self.select_chart(-1);
                self.open_full_view();
            }
            KeyCode::Right => {
                self.select_chart(1);
                self.open_full_view();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                if let Some(request) = self.full_view.clone() {
                    self.save_request(&request)?;
                }
            }
            KeyCode::Char('?') => {
                self.mode = AppMode::Help;
                self.full_view = None;
            }
            _ => {}
        }
        Ok(true)
    }

    fn switch_report(&mut self, report: ReportKind) {
        tracing::debug!(from = %self.report, to = %report, "switching report");
        self.report = report;
        self.selected_chart = 0;
        self.selected_point = None;
        self.refresh();
    }

    fn toggle_products(&mut self) {
        if self.report != ReportKind::DurationOfRelationship {
            self.push_message(Message::info(
                "The product split only applies to Duration of Relationship",
            ));
            return;
        }

        self.show_products = !self.show_products;
        self.refresh();
        let state = if self.show_products { "by product count" } else { "as totals" };
        self.push_message(Message::info(format!("Customers shown {}", state)));
    }

    fn select_chart(&mut self, step: isize) {
        let count = self.layout.charts().len();
        if count == 0 {
            return;
        }
        self.selected_chart = wrap_index(self.selected_chart, step, count);
        self.selected_point = None;
    }

    fn select_point(&mut self, step: isize) {
        let count = match self.current_chart() {
            Some(chart) => chart.points.len(),
            None => return,
        };
        if count == 0 {
            return;
        }
        self.selected_point = Some(match self.selected_point {
            Some(current) => wrap_index(current, step, count),
            None if step < 0 => count - 1,
            None => 0,
        });
    }

    fn clamp_point(&mut self) {
        let count = self.current_chart().map(|c| c.points.len()).unwrap_or(0);
        if let Some(point) = self.selected_point {
            if point >= count {
                self.selected_point = None;
            }
        }
    }

    /// Hand the selected chart to the full-screen view
    fn open_full_view(&mut self) {
        let request = self.view().full_view_request(self.selected_chart);
        match request {
            Ok(request) => {
                tracing::info!(
                    report = %self.report,
                    chart = %request.chart.title,
                    "opening full view"
                );
                self.full_view = Some(request);
                self.mode = AppMode::FullView;
                self.clamp_point();
            }
            Err(e) => {
                self.push_message(Message::warning(format!("No chart to expand: {}", e)));
            }
        }
    }

    fn save_selected_chart(&mut self) -> Result<()> {
        let request = self.view().full_view_request(self.selected_chart);
        match request {
            Ok(request) => self.save_request(&request),
            Err(e) => {
                self.push_message(Message::warning(format!("Nothing to save: {}", e)));
                Ok(())
            }
        }
    }

    fn save_request(&mut self, request: &FullViewRequest) -> Result<()> {
        let Some(dir) = self.export_dir.clone() else {
            self.push_message(Message::error("No data directory available for exports"));
            return Ok(());
        };

        match write_request(&dir, &self.report, self.selected_chart, request) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "saved full-view payload");
                self.push_message(Message::success(format!("Saved {}", path.display())));
            }
            Err(e) => {
                tracing::error!(error = %e, "could not save full-view payload");
                self.push_message(Message::error(format!("Save failed: {:#}", e)));
            }
        }
        Ok(())
    }
}

fn write_request(
    dir: &std::path::Path,
    report: &ReportKind,
    chart_index: usize,
    request: &FullViewRequest,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let file_name = format!(
        "{}-chart{}-{}.json",
        report.slug(),
        chart_index + 1,
        Local::now().format("%Y%m%d-%H%M%S")
    );
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(request)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn wrap_index(current: usize, step: isize, count: usize) -> usize {
    let count = count as isize;
    ((current as isize + step) % count + count) as usize % count as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Datasets::builtin(), &Config::default())
    }

    #[test]
    fn test_starts_on_configured_report() {
        let app = app();
        assert_eq!(app.report, ReportKind::DurationOfRelationship);
        assert_eq!(app.unit, ValueUnit::Crore);
        assert!(!app.layout.is_placeholder());
    }

    #[test]
    fn test_tab_cycles_reports() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.report, ReportKind::CustomerSatisfaction);
        app.handle_event(key(KeyCode::BackTab)).unwrap();
        app.handle_event(key(KeyCode::BackTab)).unwrap();
        assert_eq!(app.report, ReportKind::ProductsPurchased);
    }

    #[test]
    fn test_unit_cycles() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('u'))).unwrap();
        assert_eq!(app.unit, ValueUnit::Lakh);
        assert_eq!(app.layout.page().unwrap().unit, ValueUnit::Lakh);
    }

    #[test]
    fn test_product_toggle() {
        let mut app = app();
        assert!(app.show_products);
        app.handle_event(key(KeyCode::Char('t'))).unwrap();
        assert!(!app.show_products);
        let chart = &app.layout.charts()[0];
        assert_eq!(chart.series.len(), 1);

        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Char('t'))).unwrap();
        assert!(!app.show_products);
    }

    #[test]
    fn test_chart_and_point_selection_wrap() {
        let mut app = app();
        let charts = app.layout.charts().len();
        app.handle_event(key(KeyCode::Left)).unwrap();
        assert_eq!(app.selected_chart, charts - 1);

        app.handle_event(key(KeyCode::Up)).unwrap();
        let points = app.current_chart().unwrap().points.len();
        assert_eq!(app.selected_point, Some(points - 1));
        app.handle_event(key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_point, Some(0));
        assert!(app.current_tooltip().is_some());
    }

    #[test]
    fn test_full_view_round_trip() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.mode, AppMode::FullView);
        let request = app.full_view.as_ref().unwrap();
        assert_eq!(request.filters.report_type, "Duration of Relationship");
        assert_eq!(request.chart_type.as_deref(), Some("stacked-bar"));

        app.handle_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.full_view.is_none());
    }

    #[test]
    fn test_placeholder_has_no_full_view() {
        let config = Config {
            report_type: "Nonexistent Report".into(),
            ..Default::default()
        };
        let mut app = App::new(Datasets::builtin(), &config);
        assert!(app.layout.is_placeholder());
        app.handle_event(key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.messages.last().unwrap().text.contains("No chart"));

        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.report, ReportKind::DurationOfRelationship);
    }

    #[test]
    fn test_save_writes_json() {
        let dir = TempDir::new().unwrap();
        let mut app = app().with_export_dir(dir.path());
        app.handle_event(key(KeyCode::Char('s'))).unwrap();

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let path = files[0].as_ref().unwrap().path();
        let json = fs::read_to_string(&path).unwrap();
        let request: FullViewRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.chart.title, "Customers by Relationship Duration");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!app.handle_event(key(KeyCode::Char('q'))).unwrap());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!app.handle_event(ctrl_c).unwrap());
    }

    #[test]
    fn test_help_mode() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.mode, AppMode::Help);
        assert!(app.handle_event(key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 3), 2);
        assert_eq!(wrap_index(2, 1, 3), 0);
        assert_eq!(wrap_index(1, 1, 3), 2);
    }
}
