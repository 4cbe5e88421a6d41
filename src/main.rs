use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use custinsight::config::Config;
use custinsight::data::Datasets;
use custinsight::filters::ReportFilters;
use custinsight::format::ValueUnit;
use custinsight::interactive::{self, App};
use custinsight::logging;
use custinsight::print;
use custinsight::report::ReportKind;
use custinsight::view::{ReportProps, ReportView};

#[derive(Parser)]
#[command(name = "custinsight")]
#[command(about = "Customer insight reports for an insurance book", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    report: ReportArgs,
}

/// Report selection shared by the interactive UI, `show` and `export`
#[derive(Args, Debug, Default, Clone)]
struct ReportArgs {
    /// Report title or slug (see `list`)
    #[arg(short = 'r', long)]
    report: Option<String>,

    /// Value unit: Crore, Lakh, Thousands or Rupees
    #[arg(short = 'u', long)]
    unit: Option<String>,

    /// Dataset JSON file to use instead of the built-in sample data
    #[arg(long)]
    data: Option<PathBuf>,

    /// Split the duration chart by product count
    #[arg(long, conflicts_with = "no_products")]
    products: bool,

    /// Show plain customer totals on the duration chart
    #[arg(long)]
    no_products: bool,

    /// Entity filter shown with the report
    #[arg(long)]
    entity: Option<String>,

    /// Business type filter shown with the report
    #[arg(long)]
    business_type: Option<String>,

    /// Location filter shown with the report
    #[arg(long)]
    location: Option<String>,

    /// Period filter shown with the report
    #[arg(long)]
    duration: Option<String>,
}

impl ReportArgs {
    fn show_products(&self) -> Option<bool> {
        if self.no_products {
            Some(false)
        } else if self.products {
            Some(true)
        } else {
            None
        }
    }

    fn filters(&self) -> ReportFilters {
        ReportFilters {
            entity: self.entity.clone(),
            business_type: self.business_type.clone(),
            location: self.location.clone(),
            duration: self.duration.clone(),
            ..Default::default()
        }
    }

    /// Saved config with these arguments layered on top
    fn apply(&self, mut config: Config) -> Config {
        if let Some(report) = &self.report {
            config.report_type = ReportKind::parse(report).title().to_string();
        }
        if let Some(unit) = &self.unit {
            config.value_unit = unit.clone();
        }
        if let Some(show_products) = self.show_products() {
            config.show_products = show_products;
        }
        if let Some(data) = &self.data {
            config.data_file = Some(data.clone());
        }
        config.filters = self.filters().merged_with(&config.filters);
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print a report as text
    Show {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// List the available report types
    List,
    /// Print full-view payloads for a report's charts as JSON
    Export {
        #[command(flatten)]
        report: ReportArgs,

        /// Chart number, starting at 1 (default: all charts)
        #[arg(short = 'c', long)]
        chart: Option<usize>,
    },
    /// Check the datasets for inconsistent totals and percentages
    Check {
        /// Dataset JSON file to check instead of the built-in sample data
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Show or change the saved defaults
    Config {
        /// Default report title or slug
        #[arg(short = 'r', long)]
        report: Option<String>,

        /// Default value unit
        #[arg(short = 'u', long)]
        unit: Option<String>,

        /// Default dataset JSON file
        #[arg(long)]
        data: Option<PathBuf>,

        /// Split the duration chart by default
        #[arg(long, conflicts_with = "no_products")]
        products: bool,

        /// Show plain totals on the duration chart by default
        #[arg(long)]
        no_products: bool,

        /// Print the saved configuration
        #[arg(short = 's', long)]
        show: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => {
            if let Err(e) = logging::init_with_file("custinsight.log") {
                eprintln!("Warning: file logging unavailable: {}", e);
            }
            let config = cli.report.apply(Config::load()?);
            let datasets = load_datasets(&config)?;
            tracing::info!(report = %config.report_type, unit = %config.value_unit, "starting interactive session");
            interactive::run_interactive(App::new(datasets, &config))
        }
        Some(command) => {
            logging::init();
            run_command(command)
        }
    }
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Show { report } => {
            let config = report.apply(Config::load()?);
            let datasets = load_datasets(&config)?;
            warn_on_issues(&datasets);

            let props = props_for(&config);
            let view = ReportView::new(&datasets, &props).with_show_products(config.show_products);
            let layout = view.render()?;
            print::print_layout(&layout, view.filters())?;
        }
        Commands::List => {
            let config = Config::load()?;
            let default = ReportKind::parse(&config.report_type);
            println!("\n=== REPORT TYPES ===");
            println!("{:<28} {}", "Slug", "Title");
            println!("{}", "-".repeat(70));
            for kind in ReportKind::ALL.iter() {
                let marker = if *kind == default { "  (default)" } else { "" };
                println!("{:<28} {}{}", kind.slug(), kind.title(), marker);
            }
            println!("\nUnits: {}", ValueUnit::ALL.map(|u| u.label()).join(", "));
        }
        Commands::Export { report, chart } => {
            let config = report.apply(Config::load()?);
            let datasets = load_datasets(&config)?;
            warn_on_issues(&datasets);

            let props = props_for(&config);
            let view = ReportView::new(&datasets, &props).with_show_products(config.show_products);
            let json = match chart {
                Some(0) => return Err(anyhow!("Chart numbers start at 1")),
                Some(number) => serde_json::to_string_pretty(&view.full_view_request(number - 1)?)?,
                None => serde_json::to_string_pretty(&view.full_view_requests()?)?,
            };
            println!("{}", json);
        }
        Commands::Check { data } => {
            let config = Config::load()?;
            let path = data.or(config.data_file);
            let datasets = Datasets::load_or_builtin(path.as_deref())?;
            let source = path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in sample data".to_string());

            let issues = datasets.validate();
            if issues.is_empty() {
                println!("✓ All datasets are consistent ({})", source);
            } else {
                println!("\n=== DATASET ISSUES ({}) ===", source);
                println!("{}", "-".repeat(70));
                for issue in &issues {
                    println!("✗ {}", issue);
                }
                return Err(anyhow!("{} dataset issue(s) found", issues.len()));
            }
        }
        Commands::Config {
            report,
            unit,
            data,
            products,
            no_products,
            show,
        } => {
            let mut config = Config::load()?;
            let mut changed = false;

            if let Some(report) = report {
                let kind = ReportKind::parse(&report);
                if !kind.is_supported() {
                    return Err(anyhow!("Unknown report type '{}'. Run `custinsight list`.", report));
                }
                config.report_type = kind.title().to_string();
                changed = true;
            }
            if let Some(unit) = unit {
                config.value_unit = ValueUnit::from_label(&unit).label().to_string();
                changed = true;
            }
            if let Some(data) = data {
                config.data_file = Some(data);
                changed = true;
            }
            if products || no_products {
                config.show_products = products;
                changed = true;
            }

            if changed {
                let path = config.save()?;
                println!("✓ Saved defaults to {}", path.display());
            }
            if show || !changed {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn load_datasets(config: &Config) -> Result<Datasets> {
    Datasets::load_or_builtin(config.data_file.as_deref()).with_context(|| {
        format!(
            "Could not load datasets{}",
            config
                .data_file
                .as_ref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        )
    })
}

fn warn_on_issues(datasets: &Datasets) {
    for issue in datasets.validate() {
        tracing::warn!(dataset = issue.dataset, "{}", issue.message);
    }
}

fn props_for(config: &Config) -> ReportProps {
    let kind = ReportKind::parse(&config.report_type);
    ReportProps {
        value_unit: config.value_unit.clone(),
        selected_report_type: kind.title().to_string(),
        current_filters: Some(ReportFilters {
            report_type: kind.title().to_string(),
            value_unit: ValueUnit::from_label(&config.value_unit).label().to_string(),
            ..config.filters.clone()
        }),
    }
}
