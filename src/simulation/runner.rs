//! Scenario Runner
//!
//! Drives scenarios against a [`Transport`]: plans each batch, stamps and
//! sends every event, tallies deliveries and keeps an ordered result log for
//! the final summary. Execution is strictly sequential; every send blocks
//! until the service answers or the request times out.

use crate::error::SimError;
use crate::simulation::scenarios::{
    Scenario, ScenarioKind, ScenarioParams, create_scenario, list_scenarios, pacing,
};
use crate::simulation::types::{Alarm, EventRecord, RunSummary, ScenarioResult};
use crate::transport::Transport;
use chrono::Utc;
use rand::RngCore;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Ordered log of scenario outcomes for this process.
///
/// Cloning shares the log, so an interrupt handler can summarize a run that
/// is still in progress.
#[derive(Debug, Clone, Default)]
pub struct ResultLog {
    inner: Arc<Mutex<Vec<ScenarioResult>>>,
}

impl ResultLog {
    pub fn push(&self, result: ScenarioResult) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
    }

    pub fn snapshot(&self) -> Vec<ScenarioResult> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self, user_id: u64) -> RunSummary {
        RunSummary::from_results(self.snapshot(), user_id)
    }
}

/// Fixed parameter set used by [`ScenarioRunner::run_all`].
pub fn default_suite() -> Vec<(ScenarioKind, ScenarioParams)> {
    let base = ScenarioParams::default();
    vec![
        (
            ScenarioKind::Bruteforce,
            ScenarioParams {
                count: 8,
                delay: 0.1,
                ..base.clone()
            },
        ),
        (
            ScenarioKind::Distributed,
            ScenarioParams {
                ip_count: 8,
                delay: 0.1,
                ..base.clone()
            },
        ),
        (
            ScenarioKind::UnusualLogin,
            ScenarioParams {
                distance_km: 1000,
                delay: 0.1,
                ..base.clone()
            },
        ),
        (
            ScenarioKind::HighFrequency,
            ScenarioParams {
                event_count: 30,
                delay: 0.05,
                ..base
            },
        ),
    ]
}

pub struct ScenarioRunner<T, R = StdRng> {
    transport: T,
    rng: R,
    user_id: u64,
    run_id: Uuid,
    results: ResultLog,
}

impl<T: Transport, R: RngCore> ScenarioRunner<T, R> {
    pub fn new(transport: T, rng: R, user_id: u64) -> Self {
        Self {
            transport,
            rng,
            user_id,
            run_id: Uuid::new_v4(),
            results: ResultLog::default(),
        }
    }

    pub fn results(&self) -> &ResultLog {
        &self.results
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver one record. A failure is printed and logged, then reported as `false`.
    pub fn send(&self, record: &EventRecord) -> bool {
        match self.transport.post_event(record) {
            Ok(()) => {
                debug!(event_type = %record.event_type, "Log sent successfully");
                true
            }
            Err(SimError::Status { status, body }) => {
                println!("  Failed to send log: HTTP {}", status);
                warn!(status, body = %body, "Failed to send log");
                false
            }
            Err(e) => {
                println!("  Error sending log: {}", e);
                warn!(error = %e, "Error sending log");
                false
            }
        }
    }

    pub fn bruteforce(&mut self, count: usize, delay: f64) -> ScenarioResult {
        self.run_kind(
            ScenarioKind::Bruteforce,
            &ScenarioParams {
                count,
                delay,
                ..ScenarioParams::default()
            },
        )
    }

    pub fn distributed(&mut self, ip_count: usize, delay: f64) -> ScenarioResult {
        self.run_kind(
            ScenarioKind::Distributed,
            &ScenarioParams {
                ip_count,
                delay,
                ..ScenarioParams::default()
            },
        )
    }

    /// `distance_km` steers which landmark pair is chosen.
    pub fn unusual_login(&mut self, distance_km: u32, delay: f64) -> ScenarioResult {
        self.run_kind(
            ScenarioKind::UnusualLogin,
            &ScenarioParams {
                distance_km,
                delay,
                ..ScenarioParams::default()
            },
        )
    }

    pub fn high_frequency(&mut self, event_count: usize, delay: f64) -> ScenarioResult {
        self.run_kind(
            ScenarioKind::HighFrequency,
            &ScenarioParams {
                event_count,
                delay,
                ..ScenarioParams::default()
            },
        )
    }

    /// Run a scenario by its command-line identifier. Unknown names are
    /// reported and produce no traffic.
    pub fn dispatch(&mut self, name: &str, params: &ScenarioParams) -> Option<ScenarioResult> {
        match ScenarioKind::from_id(name) {
            Some(kind) => Some(self.run_kind(kind, params)),
            None => {
                let available: Vec<_> = list_scenarios().into_iter().map(|(id, _)| id).collect();
                println!("Unknown scenario: {}", name);
                println!("Available scenarios: {}", available.join(", "));
                let err = SimError::UnknownScenario(name.to_string());
                warn!(error = %err, "dispatch skipped");
                None
            }
        }
    }

    /// Run the four core scenarios in order, pausing `delay` seconds
    /// between them.
    pub fn run_all(&mut self, delay: f64) -> Vec<ScenarioResult> {
        println!("Running All Core Test Scenarios");
        println!("{}", "=".repeat(60));
        self.run_suite(&default_suite(), delay)
    }

    pub fn run_suite(
        &mut self,
        suite: &[(ScenarioKind, ScenarioParams)],
        delay: f64,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(suite.len());
        for (i, (kind, params)) in suite.iter().enumerate() {
            if i > 0 {
                pause(pacing(delay));
            }
            if let Some(result) = self.dispatch(kind.id(), params) {
                results.push(result);
            }
        }
        results
    }

    pub fn run_kind(&mut self, kind: ScenarioKind, params: &ScenarioParams) -> ScenarioResult {
        let scenario = create_scenario(kind, params);
        self.run(&*scenario)
    }

    pub fn run(&mut self, scenario: &dyn Scenario) -> ScenarioResult {
        let label = scenario.kind().label();
        let plan = scenario.plan(self.user_id, &mut self.rng);
        let total_count = plan.events.len();

        println!("\n{}", scenario.headline());
        println!("{}", "=".repeat(50));
        info!(scenario = label, events = total_count, run_id = %self.run_id, "scenario started");

        let mut success_count = 0;
        for (i, event) in plan.events.iter().enumerate() {
            if i > 0 {
                pause(plan.pacing);
            }

            let record = EventRecord::stamp(event, label, self.run_id, Utc::now());
            if self.send(&record) {
                success_count += 1;
                if event.echo {
                    println!("  {:2}. {}", i + 1, event.note);
                }
            }
        }

        let result = ScenarioResult {
            scenario: label.to_string(),
            success_count,
            total_count,
            context: plan.context,
        };

        println!(
            "\n{} test completed: {}/{} logs sent",
            label, success_count, total_count
        );
        println!("{}", result.context);
        info!(scenario = label, success_count, total_count, "scenario finished");

        self.results.push(result.clone());
        result
    }

    /// Poll the alarm-status endpoint. Advisory only: any failure yields an
    /// empty list.
    pub fn check_alarms(&self) -> Vec<Alarm> {
        let outcome = self.transport.fetch_alarms().and_then(|status| {
            if status.is_success() {
                Ok(status.alarms)
            } else {
                Err(SimError::Rejected(
                    status.message.unwrap_or_else(|| "Unknown error".to_string()),
                ))
            }
        });

        match outcome {
            Ok(alarms) => {
                println!("\nAlarm Status: {} alarms found", alarms.len());
                for alarm in &alarms {
                    println!(
                        "   - {}: {} (Active: {})",
                        alarm.name, alarm.event_type, alarm.is_active
                    );
                }
                alarms
            }
            Err(e) => {
                println!("\nFailed to check alarms: {}", e);
                warn!(error = %e, "Failed to check alarms");
                Vec::new()
            }
        }
    }

    /// Print and return the aggregate of everything run so far.
    pub fn summarize(&self) -> RunSummary {
        let summary = self.results.summary(self.user_id);
        println!("{}", summary);
        summary
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
