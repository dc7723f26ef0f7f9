//! Banker - deadlock avoidance
//! Command-line front end: loads scenarios, submits requests, renders state

mod render;

use anyhow::{Context, Result, anyhow, bail};
use banker_core::{
    Banker, BankerError, RequestOutcome, Scenario, ScenarioRequest, ScanOrder, Snapshot, Units,
};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "banker")]
#[command(author = "SIL Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "Banker - deadlock avoidance by safety simulation", long_about = None)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the classic 5-process / 3-resource textbook scenario
    Demo {
        /// Process scan order for the safety simulation
        #[arg(long, value_name = "ORDER", default_value_t = ScanOrder::Restart)]
        scan_order: ScanOrder,
    },

    /// Load a scenario and report whether its initial state is safe
    Check {
        /// Scenario file (banker.toml)
        #[arg(value_name = "FILE", env = "BANKER_SCENARIO")]
        scenario: PathBuf,
    },

    /// Load a scenario and submit its requests, then the `-r` ones
    Run {
        /// Scenario file (banker.toml)
        #[arg(value_name = "FILE", env = "BANKER_SCENARIO")]
        scenario: PathBuf,

        /// Extra request as PROCESS:U0,U1,... (repeatable)
        #[arg(short, long = "request", value_name = "P:UNITS", value_parser = parse_request)]
        requests: Vec<ScenarioRequest>,
    },

    /// Print the textbook scenario as TOML
    Template,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banker_cli=info,banker_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo { scan_order } => demo_command(scan_order, cli.json),
        Commands::Check { scenario } => check_command(&scenario, cli.json),
        Commands::Run { scenario, requests } => run_command(&scenario, requests, cli.json),
        Commands::Template => template_command(),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Outcome of one submitted request, for JSON output
#[derive(Serialize)]
struct RequestReport {
    process: usize,
    units: Vec<Units>,
    outcome: Option<RequestOutcome>,
    error: Option<String>,
    wait: bool,
}

impl RequestReport {
    fn new(request: &ScenarioRequest, result: &Result<RequestOutcome, BankerError>) -> Self {
        Self {
            process: request.process,
            units: request.units.clone(),
            outcome: result.as_ref().ok().cloned(),
            error: result.as_ref().err().map(ToString::to_string),
            wait: result.as_ref().is_err_and(BankerError::is_wait),
        }
    }
}

#[derive(Serialize)]
struct RunReport {
    initial_safe: bool,
    initial_sequence: Vec<usize>,
    requests: Vec<RequestReport>,
    state: Snapshot,
}

fn demo_command(scan_order: ScanOrder, json: bool) -> Result<()> {
    let mut scenario = Scenario::textbook();
    scenario.engine.scan_order = scan_order;

    if !json {
        println!("{}", "BANKER'S ALGORITHM SIMULATION".bold());
        println!("Scan order: {}", scan_order.to_string().cyan());
    }

    let banker = scenario.build()?;
    let requests = scenario.requests.clone();
    submit_all(banker, &requests, json)
}

fn check_command(path: &Path, json: bool) -> Result<()> {
    let banker = load(path)?;
    let trace = banker.safety_trace();

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    println!("{}", render::state(&banker.snapshot()));
    println!("{}", render::safety(&trace));
    Ok(())
}

fn run_command(path: &Path, extra: Vec<ScenarioRequest>, json: bool) -> Result<()> {
    let scenario = Scenario::from_file(path)?;
    let banker = build(&scenario, path)?;

    let mut requests = scenario.requests;
    requests.extend(extra);
    if requests.is_empty() {
        bail!("no requests in {} and none given with -r", path.display());
    }

    submit_all(banker, &requests, json)
}

fn template_command() -> Result<()> {
    print!("{}", Scenario::textbook().to_toml()?);
    Ok(())
}

/// Checks initial safety, then submits requests in order
fn submit_all(mut banker: Banker, requests: &[ScenarioRequest], json: bool) -> Result<()> {
    let trace = banker.safety_trace();

    if !json {
        println!("{}", render::state(&banker.snapshot()));
        println!("{}", render::safety(&trace));
    }

    let mut reports = Vec::with_capacity(requests.len());
    for request in requests {
        let result = banker.request_resources(request.process, &request.units);
        if !json {
            println!();
            println!("{}", render::outcome(request.process, &request.units, &result));
            if matches!(result, Ok(RequestOutcome::Granted(_))) {
                println!("{}", render::state(&banker.snapshot()));
            }
        }
        reports.push(RequestReport::new(request, &result));
    }

    if json {
        let report = RunReport {
            initial_safe: trace.safe,
            initial_sequence: trace.sequence.into_inner(),
            requests: reports,
            state: banker.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn load(path: &Path) -> Result<Banker> {
    let scenario = Scenario::from_file(path)?;
    build(&scenario, path)
}

fn build(scenario: &Scenario, path: &Path) -> Result<Banker> {
    tracing::debug!(
        path = %path.display(),
        processes = scenario.process_count(),
        resource_types = scenario.resource_type_count(),
        "loaded scenario"
    );
    scenario
        .build()
        .with_context(|| format!("invalid initial state in {}", path.display()))
}

/// Parses `P:U0,U1,...` (e.g. `1:1,0,2`)
fn parse_request(s: &str) -> Result<ScenarioRequest> {
    let (process, units) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("expected PROCESS:UNITS, got '{s}'"))?;

    let process = process
        .trim()
        .trim_start_matches(|c: char| c == 'P' || c == 'p')
        .parse::<usize>()
        .with_context(|| format!("invalid process id in '{s}'"))?;

    let units = units
        .split(',')
        .map(|u| u.trim().parse::<Units>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid units in '{s}'"))?;

    Ok(ScenarioRequest { process, units })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request = parse_request("1:1,0,2").unwrap();
        assert_eq!(request.process, 1);
        assert_eq!(request.units, vec![1, 0, 2]);

        let request = parse_request("P4: 3, 3, 0").unwrap();
        assert_eq!(request.process, 4);
        assert_eq!(request.units, vec![3, 3, 0]);
    }

    #[test]
    fn test_parse_request_rejects_garbage() {
        assert!(parse_request("1").is_err());
        assert!(parse_request("x:1,2").is_err());
        assert!(parse_request("1:1,-2").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_marks_wait() {
        let request = ScenarioRequest { process: 4, units: vec![3, 3, 0] };
        let result = Err(BankerError::InsufficientResources {
            process: 4,
            resource: 0,
            requested: 3,
            available: 2,
        });
        let report = RequestReport::new(&request, &result);
        assert!(report.wait);
        assert!(report.outcome.is_none());
        assert!(report.error.is_some());
    }
}
