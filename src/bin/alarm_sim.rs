//! alarm-sim - Synthetic alarm scenario generator for SIEM backends
//!
//! Usage:
//!   alarm-sim --scenario bruteforce --count 10
//!   alarm-sim --scenario distributed --ips 8
//!   alarm-sim --scenario unusual --distance 1000
//!   alarm-sim --scenario high-frequency --events 30
//!   alarm-sim --check-alarms

use alarm_sim::{
    HttpTransport, ResultLog, ScenarioParams, ScenarioRunner, SimConfig, list_scenarios, logging,
};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "alarm-sim")]
#[command(about = "Generate synthetic security events to exercise SIEM alarm logic")]
struct Cli {
    /// Test scenario to run
    #[arg(long, value_enum, default_value = "all")]
    scenario: ScenarioArg,

    /// Number of failed logins for the bruteforce scenario
    #[arg(long, default_value = "10")]
    count: usize,

    /// Number of users for the distributed scenario (reported only)
    #[arg(long, default_value = "3")]
    users: usize,

    /// Number of source IPs for the distributed scenario
    #[arg(long, default_value = "10")]
    ips: usize,

    /// Target distance in km between the two unusual logins
    #[arg(long, default_value = "1000")]
    distance: u32,

    /// Number of events for the high-frequency scenario
    #[arg(long, default_value = "50")]
    events: usize,

    /// Delay between events in seconds
    #[arg(long, default_value = "0.1")]
    delay: f64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Check alarm status after the scenarios have run
    #[arg(long)]
    check_alarms: bool,

    /// Seed for reproducible IP, agent and location choices
    #[arg(long)]
    seed: Option<u64>,

    /// Write the run summary as JSON to this file
    #[arg(short, long)]
    output: Option<String>,

    /// List available scenarios and exit
    #[arg(long)]
    list: bool,

    /// Override the ingestion service base URL
    #[arg(long)]
    ingest_url: Option<String>,

    /// Override the alarm service base URL
    #[arg(long)]
    alarms_url: Option<String>,

    /// Override the bearer token for the alarm service
    #[arg(long)]
    token: Option<String>,

    /// Override the test user id
    #[arg(long)]
    user_id: Option<u64>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    Bruteforce,
    Distributed,
    Unusual,
    HighFrequency,
    All,
}

impl ScenarioArg {
    fn id(&self) -> &'static str {
        match self {
            ScenarioArg::Bruteforce => "bruteforce",
            ScenarioArg::Distributed => "distributed",
            ScenarioArg::Unusual => "unusual",
            ScenarioArg::HighFrequency => "high-frequency",
            ScenarioArg::All => "all",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.list {
        run_list();
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\nTest failed with error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    let transport = HttpTransport::new(&config)?;

    print_banner(&transport, &config, cli.scenario);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut runner = ScenarioRunner::new(transport, rng, config.user_id);
    info!(run_id = %runner.run_id(), "run started");

    watch_for_interrupt(runner.results().clone(), config.user_id);

    match cli.scenario {
        ScenarioArg::All => {
            runner.run_all(cli.delay);
        }
        other => {
            runner.dispatch(other.id(), &params(&cli));
        }
    }

    if cli.check_alarms {
        println!("\nChecking alarm status...");
        runner.check_alarms();
    }

    let summary = runner.summarize();

    if let Some(path) = cli.output {
        summary.save(&path)?;
        println!("\nResults saved to: {}", path);
    }

    Ok(())
}

fn params(cli: &Cli) -> ScenarioParams {
    ScenarioParams {
        count: cli.count,
        users: cli.users,
        ip_count: cli.ips,
        distance_km: cli.distance,
        event_count: cli.events,
        delay: cli.delay,
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<SimConfig> {
    Ok(apply_overrides(cli, SimConfig::load()?))
}

/// CLI flags win over the environment and `.env`.
fn apply_overrides(cli: &Cli, mut config: SimConfig) -> SimConfig {
    if let Some(url) = &cli.ingest_url {
        config.ingest_base_url = url.clone();
    }
    if let Some(url) = &cli.alarms_url {
        config.alarms_base_url = url.clone();
    }
    if let Some(token) = &cli.token {
        config.token = token.clone();
    }
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }

    config
}

/// Ctrl+C prints whatever has been collected so far and exits cleanly.
/// Events already sent are committed on the far side; nothing to roll back.
///
/// Returns once the handler is installed, so an interrupt during the first
/// send is already caught. An interrupt that lands while the final summary
/// is printing shows the summary a second time.
fn watch_for_interrupt(results: ResultLog, user_id: u64) {
    let (ready_tx, ready_rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "interrupt handler unavailable");
                let _ = ready_tx.send(());
                return;
            }
        };

        runtime.block_on(async {
            let interrupted = tokio::signal::ctrl_c();
            tokio::pin!(interrupted);

            // The first poll installs the OS handler
            let first = tokio::time::timeout(Duration::ZERO, &mut interrupted).await;
            let outcome = match first {
                Ok(outcome) => outcome,
                Err(_) => {
                    let _ = ready_tx.send(());
                    interrupted.await
                }
            };

            match outcome {
                Ok(()) => {
                    println!("\n\nTest interrupted by user");
                    println!("{}", results.summary(user_id));
                    std::process::exit(0);
                }
                Err(e) => warn!(error = %e, "interrupt handler unavailable"),
            }
        });
    });

    let _ = ready_rx.recv();
}

fn print_banner(transport: &HttpTransport, config: &SimConfig, scenario: ScenarioArg) {
    let rule = "=".repeat(60);
    println!("Alarm Scenario Simulator for SIEM");
    println!("{}", rule);
    println!("Logging Service: {}", transport.ingest_url());
    println!("Alarm Service: {}", transport.alarms_url());
    println!("Test User ID: {}", config.user_id);
    println!("Scenario: {}", scenario.id());
    println!("{}", rule);
}

fn run_list() {
    println!("Available scenarios:");
    for (name, description) in list_scenarios() {
        println!("  {:16} - {}", name, description);
    }
    println!("\nUsage: alarm-sim --scenario <SCENARIO> [--delay <SECONDS>] [--check-alarms]");
}
