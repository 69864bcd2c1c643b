//! Migration Reporter
//!
//! Generates the migration report of one provisioned infrastructure from the
//! inventory catalog and prints it as JSON.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_migration_report::{HttpCatalogClient, MigrationReport, MigrationReportService};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::{info, warn};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "migration-reporter")]
#[command(about = "Generate migration reports for multi-cloud infrastructures")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the report of one infrastructure
    Generate {
        /// Namespace that owns the infrastructure
        #[arg(long = "ns")]
        ns_id: String,

        /// Infrastructure identifier
        #[arg(long = "infra")]
        infra_id: String,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,

        /// Dump Prometheus metrics to stderr when done
        #[arg(long)]
        metrics: bool,
    },

    /// Show the effective catalog configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    observability::init_metrics();

    match cli.command {
        Commands::Generate {
            ns_id,
            infra_id,
            output,
            compact,
            metrics,
        } => {
            let client = HttpCatalogClient::with_timeout(&config.catalog.url, config.catalog.timeout())
                .wrap_err("Failed to build catalog client")?;
            let service = MigrationReportService::with_options(client, config.report_options());

            let report = service
                .generate(&ns_id, &infra_id)
                .await
                .wrap_err_with(|| format!("Failed to generate report for {}/{}", ns_id, infra_id))?;

            for warning in &report.warnings {
                warn!("{}", warning);
            }

            let json = render(&report, compact)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Report written");
                }
                None => println!("{}", json),
            }

            if metrics {
                eprint!("{}", observability::render_metrics());
            }
        }

        Commands::Config => {
            println!("environment:      {}", config.environment.as_str());
            println!("catalog url:      {}", config.catalog.url);
            println!("fetch timeout:    {}s", config.catalog.timeout_secs);
            println!("max concurrency:  {}", config.catalog.max_concurrency);
            match config.catalog.report_timeout_secs {
                Some(secs) => println!("report timeout:   {}s", secs),
                None => println!("report timeout:   none"),
            }
        }
    }

    Ok(())
}

fn render(report: &MigrationReport, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    Ok(json)
}
