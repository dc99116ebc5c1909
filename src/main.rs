use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use securefleet_dashboard::cache::DatasetCache;
use securefleet_dashboard::executive::{self, trends};
use securefleet_dashboard::export::{self, Format, Table};
use securefleet_dashboard::generator::DEFAULT_SEED;
use securefleet_dashboard::metrics::VehicleFilter;
use securefleet_dashboard::models::{Dataset, VehicleStatus};
use securefleet_dashboard::{metrics, report};

const SEED_ENV: &str = "SECUREFLEET_SEED";

#[derive(Parser)]
#[command(name = "securefleet-dashboard")]
#[command(about = "Mock fleet, supervision and HR data for the SecureFleet control center", long_about = None)]
struct Cli {
    /// Seed for the sample data (falls back to SECUREFLEET_SEED, then 42)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Anchor timestamp (RFC 3339) that generated times count back from
    #[arg(long, global = true)]
    at: Option<String>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FleetFilterArgs {
    /// Only include this vehicle (e.g. VH-005)
    #[arg(long)]
    vehicle: Option<String>,
    /// Only include vehicles in this status
    #[arg(long, value_enum)]
    status: Option<VehicleStatus>,
}

impl From<FleetFilterArgs> for VehicleFilter {
    fn from(args: FleetFilterArgs) -> Self {
        VehicleFilter {
            vehicle_id: args.vehicle,
            status: args.status,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the KPI tiles for every panel
    Summary {
        #[command(flatten)]
        filter: FleetFilterArgs,
    },
    /// Show the most recent alerts
    Alerts {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export one table as CSV or JSON
    Export {
        #[arg(long, value_enum)]
        table: Table,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        #[arg(long)]
        out: Option<PathBuf>,
        // vehicle filters narrow the vehicles table only
        #[command(flatten)]
        filter: FleetFilterArgs,
    },
}

fn resolve_seed(flag: Option<u64>, env_value: Option<String>) -> anyhow::Result<u64> {
    if let Some(seed) = flag {
        return Ok(seed);
    }

    match env_value {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {value:?}")),
        None => Ok(DEFAULT_SEED),
    }
}

fn parse_anchor(value: &str) -> anyhow::Result<NaiveDateTime> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("--at must be an RFC 3339 timestamp, got {value:?}"))?;
    Ok(parsed.naive_utc())
}

fn filtered(data: &Dataset, filter: &VehicleFilter) -> Dataset {
    let mut view = data.clone();
    view.vehicles.retain(|vehicle| filter.matches(vehicle));
    view
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let seed = resolve_seed(cli.seed, std::env::var(SEED_ENV).ok())?;
    let mut cache = match cli.at.as_deref() {
        Some(value) => {
            let anchor = parse_anchor(value)?;
            DatasetCache::new(move || anchor)
        }
        None => DatasetCache::with_system_clock(),
    };
    let data = cache.get_or_generate(seed);

    match cli.command {
        Commands::Summary { filter } => {
            let filter = VehicleFilter::from(filter);
            if filter.is_empty() {
                print_summary(data);
            } else {
                info!(?filter, "filtering fleet");
                print_summary(&filtered(data, &filter));
            }
        }
        Commands::Alerts { limit } => {
            if data.alerts.is_empty() {
                println!("No alerts in the feed.");
                return Ok(());
            }

            println!("Most recent alerts:");
            for alert in data.alerts.iter().take(limit) {
                println!(
                    "- {} [{}] {}: {}",
                    alert.timestamp.format("%H:%M:%S"),
                    alert.severity,
                    alert.category,
                    alert.message
                );
            }
        }
        Commands::Report { out } => {
            let report = report::build_report(data);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            table,
            format,
            out,
            filter,
        } => {
            let view = filtered(data, &VehicleFilter::from(filter));
            let rows = match &out {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::export_table(&view, table, format, std::io::BufWriter::new(file))?
                }
                None => export::export_table(&view, table, format, std::io::stdout().lock())?,
            };
            info!(?table, ?format, rows, "table exported");
        }
    }

    Ok(())
}

fn print_summary(data: &Dataset) {
    let pct = |value: Option<f64>| {
        value
            .map(|v| format!("{:.1}%", v * 100.0))
            .unwrap_or_else(|| "n/a".to_string())
    };

    let alerts = metrics::alert_summary(&data.alerts);
    println!("Alerts:");
    for (severity, count) in alerts {
        println!("  {severity}: {count}");
    }

    let fleet = metrics::fleet_summary(&data.vehicles);
    println!("Fleet:");
    println!("  Km today: {:.0} ({})", fleet.total_km, trends::KM_TODAY);
    println!(
        "  Average efficiency: {} ({})",
        pct(fleet.avg_efficiency),
        trends::AVG_EFFICIENCY
    );
    println!("  Fuel used: {:.0} L ({})", fleet.total_fuel, trends::FUEL_TOTAL);
    println!(
        "  Route compliance: {} ({})",
        pct(fleet.avg_route_compliance),
        trends::ROUTE_COMPLIANCE
    );
    println!(
        "  Below efficiency target: {}",
        metrics::vehicles_needing_attention(&data.vehicles).len()
    );

    let supervision = metrics::supervision_summary(&data.supervisors);
    println!("Supervision:");
    println!(
        "  Visits completed: {} ({})",
        supervision.total_visits,
        trends::VISITS
    );
    println!(
        "  Overall compliance: {} ({})",
        pct(supervision.avg_compliance),
        trends::SUPERVISION_COMPLIANCE
    );
    println!(
        "  Active clients: {} ({})",
        supervision.total_clients,
        trends::ACTIVE_CLIENTS
    );
    if let Some(risk) = supervision.avg_risk_score {
        println!("  Risk score: {risk:.1} ({})", trends::RISK_SCORE);
    }

    let hr = metrics::hr_summary(&data.guards);
    println!("Human resources:");
    println!(
        "  Attendance: {} ({})",
        pct(hr.attendance_rate),
        trends::ATTENDANCE
    );
    println!("  Overtime hours: {} ({})", hr.overtime_hours, trends::OVERTIME);
    println!(
        "  Payroll alerts: {} ({})",
        hr.payroll_alerts,
        trends::PAYROLL_ALERTS
    );
    println!(
        "  Personnel coverage: {} ({})",
        pct(Some(executive::PERSONNEL_COVERAGE)),
        trends::COVERAGE
    );

    println!(
        "Integrated risk: {:.0} ({} band)",
        executive::GAUGE_VALUE,
        executive::risk_band(executive::GAUGE_VALUE)
    );
}
