//! Customer insight reports for an insurance book
//!
//! A report type and a value unit select one of a fixed set of layouts built
//! from the sample datasets: stat cards, charts with per-point tooltips,
//! breakdown tables and insights. The layouts are drawn by the terminal UI
//! in [`interactive`], printed as text by [`print`], or exported as JSON.

pub mod config;
pub mod data;
pub mod error;
pub mod filters;
pub mod format;
pub mod interactive;
pub mod logging;
pub mod print;
pub mod report;
pub mod view;

pub use error::{InsightError, Result};
