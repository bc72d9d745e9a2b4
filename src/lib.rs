//! # alarm-sim - Synthetic Alarm Scenario Generator
//!
//! Fabricates plausible security events and ships them to a SIEM's log
//! ingestion endpoint so its alarm logic can be exercised end to end.
//! Optionally polls the alarm-status endpoint afterwards.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         alarm-sim                            │
//! │                                                              │
//! │   CLI ──► ScenarioRunner ──► Scenario::plan ──► PlannedEvent │
//! │                 │                                   │        │
//! │                 │            EventRecord::stamp ◄───┘        │
//! │                 ▼                                            │
//! │            Transport ──► POST /api/logs                      │
//! │                 └──────► GET  /api/alarms                    │
//! │                                                              │
//! │   ResultLog ──► RunSummary                                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Scenarios
//!
//! | Scenario         | Pattern                                    |
//! |------------------|--------------------------------------------|
//! | `bruteforce`     | Repeated failed logins from one public IP  |
//! | `distributed`    | One user logging in from many IPs          |
//! | `unusual`        | Two logins from distant cities             |
//! | `high-frequency` | Burst of mixed events from one IP          |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alarm_sim::{HttpTransport, ScenarioRunner, SimConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = SimConfig::load().unwrap();
//! let transport = HttpTransport::new(&config).unwrap();
//! let mut runner = ScenarioRunner::new(transport, StdRng::from_os_rng(), config.user_id);
//!
//! runner.bruteforce(10, 0.1);
//! runner.check_alarms();
//! runner.summarize();
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod simulation;
pub mod transport;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use transport::{HttpTransport, Transport};

pub use simulation::runner::{ResultLog, ScenarioRunner, default_suite};
pub use simulation::scenarios::{
    Scenario, ScenarioKind, ScenarioParams, ScenarioPlan, create_scenario, list_scenarios,
};
pub use simulation::types::{
    Alarm, AlarmStatus, EventRecord, EventType, Geo, RunSummary, ScenarioContext, ScenarioResult,
    Severity,
};
