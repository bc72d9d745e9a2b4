//! Wire and bookkeeping types for synthetic security events.

use crate::error::SimResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

// ============================================================================
// Event Record (POST /api/logs body)
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    LoginSuccess,
    LoginFailed,
    PasswordReset,
    ProfileUpdated,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::LoginSuccess,
        EventType::LoginFailed,
        EventType::PasswordReset,
        EventType::ProfileUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::LoginSuccess => "login_success",
            EventType::LoginFailed => "login_failed",
            EventType::PasswordReset => "password_reset",
            EventType::ProfileUpdated => "profile_updated",
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::for_event(*self)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Low,
}

impl Severity {
    /// Failed logins are the only high-severity events we emit.
    pub fn for_event(event_type: EventType) -> Self {
        match event_type {
            EventType::LoginFailed => Severity::High,
            _ => Severity::Low,
        }
    }
}

/// (latitude, longitude) in degrees, serialized as a two-element array.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Geo(pub f64, pub f64);

impl Geo {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for Geo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.0, self.1)
    }
}

/// Marks a record as fabricated so it is never mistaken for production data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SyntheticTag {
    pub test_mode: bool,
    pub test_scenario: String,
    pub test_timestamp: DateTime<Utc>,
    pub run_id: Uuid,
}

/// An event as produced by a scenario, before it is stamped for sending.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEvent {
    pub event_type: EventType,
    pub ip_address: String,
    pub user_id: u64,
    pub user_agent: String,
    pub geo: Geo,
    /// Console line printed once the event is delivered
    pub note: String,
    pub echo: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub event_type: EventType,
    #[serde(alias = "user_ID")]
    pub user_id: u64,
    pub user_agent: String,
    pub geo: Geo,
    pub severity: Severity,
    pub additional_data: SyntheticTag,
}

impl EventRecord {
    pub fn stamp(event: &PlannedEvent, scenario: &str, run_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            timestamp: now,
            ip_address: event.ip_address.clone(),
            event_type: event.event_type,
            user_id: event.user_id,
            user_agent: event.user_agent.clone(),
            geo: event.geo,
            severity: event.event_type.severity(),
            additional_data: SyntheticTag {
                test_mode: true,
                test_scenario: scenario.to_string(),
                test_timestamp: now,
                run_id,
            },
        }
    }
}

// ============================================================================
// Scenario Results
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScenarioContext {
    Bruteforce {
        attack_ip: String,
    },
    Distributed {
        user_id: u64,
        users_requested: usize,
        ips_used: usize,
        ips: Vec<String>,
    },
    UnusualLogin {
        from_location: Geo,
        to_location: Geo,
        from_name: String,
        to_name: String,
        requested_distance_km: f64,
        actual_distance_km: f64,
    },
    HighFrequency {
        attack_ip: String,
    },
}

impl fmt::Display for ScenarioContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioContext::Bruteforce { attack_ip }
            | ScenarioContext::HighFrequency { attack_ip } => {
                write!(f, "   Attack IP: {}", attack_ip)
            }
            ScenarioContext::Distributed {
                user_id, ips_used, ..
            } => {
                writeln!(f, "   User ID: {}", user_id)?;
                write!(f, "   IPs used: {}", ips_used)
            }
            ScenarioContext::UnusualLogin {
                from_location,
                to_location,
                from_name,
                to_name,
                actual_distance_km,
                ..
            } => {
                writeln!(f, "   From: {} {}", from_name, from_location)?;
                writeln!(f, "   To: {} {}", to_name, to_location)?;
                write!(f, "   Distance: {:.0} km", actual_distance_km)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub scenario: String,
    pub success_count: usize,
    pub total_count: usize,
    #[serde(flatten)]
    pub context: ScenarioContext,
}

// ============================================================================
// Alarm Status (GET /api/alarms body)
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Alarm {
    pub name: String,
    pub event_type: String,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlarmStatus {
    pub status: String,
    #[serde(default)]
    pub alarms: Vec<Alarm>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AlarmStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ============================================================================
// Run Summary
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub scenarios_run: usize,
    pub records_delivered: usize,
    pub records_attempted: usize,
    pub user_id: u64,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    pub fn from_results(results: Vec<ScenarioResult>, user_id: u64) -> Self {
        Self {
            scenarios_run: results.len(),
            records_delivered: results.iter().map(|r| r.success_count).sum(),
            records_attempted: results.iter().map(|r| r.total_count).sum(),
            user_id,
            generated_at: Utc::now(),
            results,
        }
    }

    /// Write the summary as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "\n{}", rule)?;
        writeln!(f, "TEST RESULTS SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total scenarios tested: {}", self.scenarios_run)?;
        writeln!(
            f,
            "Total logs sent: {} (of {} attempted)",
            self.records_delivered, self.records_attempted
        )?;
        writeln!(f, "Test user ID: {}", self.user_id)?;
        writeln!(f, "Test timestamp: {}", self.generated_at.to_rfc3339())?;

        writeln!(f, "\nDetailed Results:")?;
        for result in &self.results {
            writeln!(
                f,
                "  {:20}: {}/{} logs sent",
                result.scenario, result.success_count, result.total_count
            )?;
        }

        writeln!(f, "\nNext Steps:")?;
        writeln!(f, "  1. Check the alarms page in your SIEM dashboard")?;
        writeln!(f, "  2. Review the logs page for test entries")?;
        writeln!(f, "  3. Verify that alarms were triggered for the test scenarios")?;
        write!(f, "  4. Check alarm thresholds and time windows")
    }
}
