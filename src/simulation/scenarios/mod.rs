//! Alarm Scenarios
//!
//! Each scenario fabricates the event pattern one category of backend
//! detection is supposed to catch:
//! - **security**: bruteforce, distributed access, impossible travel
//! - **traffic**: high-frequency bursts from a single source

pub mod security;
pub mod traffic;

use crate::simulation::types::{PlannedEvent, ScenarioContext};
use rand::RngCore;
use std::fmt;
use std::time::Duration;

pub use security::{Bruteforce, DistributedAccess, UnusualLogin};
pub use traffic::HighFrequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Bruteforce,
    Distributed,
    UnusualLogin,
    HighFrequency,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Bruteforce,
        ScenarioKind::Distributed,
        ScenarioKind::UnusualLogin,
        ScenarioKind::HighFrequency,
    ];

    /// Identifier accepted on the command line
    pub fn id(&self) -> &'static str {
        match self {
            ScenarioKind::Bruteforce => "bruteforce",
            ScenarioKind::Distributed => "distributed",
            ScenarioKind::UnusualLogin => "unusual",
            ScenarioKind::HighFrequency => "high-frequency",
        }
    }

    /// Label stamped into `additional_data.test_scenario` and the result log
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Bruteforce => "bruteforce",
            ScenarioKind::Distributed => "distributed",
            ScenarioKind::UnusualLogin => "unusual_login",
            ScenarioKind::HighFrequency => "high_frequency",
        }
    }

    pub fn from_id(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "bruteforce" | "brute_force" => Some(ScenarioKind::Bruteforce),
            "distributed" => Some(ScenarioKind::Distributed),
            "unusual" | "unusual_login" | "unusual-login" => Some(ScenarioKind::UnusualLogin),
            "high-frequency" | "high_frequency" => Some(ScenarioKind::HighFrequency),
            _ => None,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Magnitudes for a single scenario invocation. Each scenario reads only
/// the fields it cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParams {
    pub count: usize,
    pub users: usize,
    pub ip_count: usize,
    pub distance_km: u32,
    pub event_count: usize,
    /// Seconds between events
    pub delay: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            count: 10,
            users: 3,
            ip_count: 10,
            distance_km: 1000,
            event_count: 50,
            delay: 0.1,
        }
    }
}

/// Everything needed to run a scenario once.
#[derive(Debug, Clone)]
pub struct ScenarioPlan {
    pub events: Vec<PlannedEvent>,
    /// Pause between consecutive sends
    pub pacing: Duration,
    pub context: ScenarioContext,
}

pub trait Scenario {
    fn kind(&self) -> ScenarioKind;

    /// Banner printed before the scenario starts
    fn headline(&self) -> String;

    /// Draw the batch of events. All randomness comes from `rng`.
    fn plan(&self, user_id: u64, rng: &mut dyn RngCore) -> ScenarioPlan;
}

pub fn create_scenario(kind: ScenarioKind, params: &ScenarioParams) -> Box<dyn Scenario> {
    match kind {
        ScenarioKind::Bruteforce => Box::new(Bruteforce {
            count: params.count,
            delay: params.delay,
        }),
        ScenarioKind::Distributed => Box::new(DistributedAccess {
            ip_count: params.ip_count,
            users: params.users,
            delay: params.delay,
        }),
        ScenarioKind::UnusualLogin => Box::new(UnusualLogin {
            distance_km: params.distance_km,
            delay: params.delay,
        }),
        ScenarioKind::HighFrequency => Box::new(HighFrequency {
            event_count: params.event_count,
            delay: params.delay,
        }),
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("bruteforce", "Repeated failed logins from a single IP"),
        ("distributed", "One user logging in from many IPs"),
        ("unusual", "Consecutive logins from distant locations"),
        ("high-frequency", "Burst of mixed events from a single IP"),
    ]
}

/// Seconds to a sleep duration. Negative or non-finite values mean no pause;
/// values too large for a `Duration` saturate.
pub fn pacing(delay_secs: f64) -> Duration {
    if delay_secs.is_finite() && delay_secs > 0.0 {
        Duration::try_from_secs_f64(delay_secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_ids() {
        for kind in ScenarioKind::ALL {
            assert_eq!(ScenarioKind::from_id(kind.id()), Some(kind));
            assert_eq!(ScenarioKind::from_id(kind.label()), Some(kind));
        }
        assert_eq!(ScenarioKind::from_id("nonexistent"), None);
        assert_eq!(ScenarioKind::from_id("all"), None);
    }

    #[test]
    fn test_create_scenario_keeps_kind() {
        let params = ScenarioParams::default();
        for kind in ScenarioKind::ALL {
            assert_eq!(create_scenario(kind, &params).kind(), kind);
        }
    }

    #[test]
    fn test_pacing() {
        assert_eq!(pacing(0.0), Duration::ZERO);
        assert_eq!(pacing(-1.0), Duration::ZERO);
        assert_eq!(pacing(f64::NAN), Duration::ZERO);
        assert_eq!(pacing(0.25), Duration::from_millis(250));
    }

    #[test]
    fn test_pacing_saturates_huge_delay() {
        assert_eq!(pacing(1e20), Duration::MAX);
        assert_eq!(pacing(f64::MAX), Duration::MAX);
        assert_eq!(pacing(f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn test_list_matches_kinds() {
        let listed: Vec<_> = list_scenarios().into_iter().map(|(id, _)| id).collect();
        let ids: Vec<_> = ScenarioKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(listed, ids);
    }
}
