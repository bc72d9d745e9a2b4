//! Simulator configuration
//!
//! Defaults point at a local SIEM stack. Every field can be overridden with
//! an `ALARM_SIM_`-prefixed environment variable (an optional `.env` file is
//! loaded first), and the CLI can override again on top of that.

use crate::error::SimResult;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INGEST_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ALARMS_BASE_URL: &str = "http://localhost:5001";
pub const DEFAULT_TEST_USER_ID: u64 = 1;
pub const DEFAULT_TEST_TOKEN: &str = "test_token";

pub const INGEST_PATH: &str = "/api/logs";
pub const ALARMS_PATH: &str = "/api/alarms";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SimConfig {
    /// Base URL of the log ingestion service
    pub ingest_base_url: String,
    /// Base URL of the alarm status service
    pub alarms_base_url: String,
    /// User the synthetic events are attributed to
    pub user_id: u64,
    /// Bearer token for the alarm status endpoint
    pub token: String,
    pub request_timeout_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ingest_base_url: DEFAULT_INGEST_BASE_URL.to_string(),
            alarms_base_url: DEFAULT_ALARMS_BASE_URL.to_string(),
            user_id: DEFAULT_TEST_USER_ID,
            token: DEFAULT_TEST_TOKEN.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl SimConfig {
    /// Load defaults merged with `ALARM_SIM_*` environment variables.
    pub fn load() -> SimResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Env::prefixed("ALARM_SIM_")),
        )
    }

    pub fn from_figment(figment: Figment) -> SimResult<Self> {
        figment.extract().map_err(|e| Box::new(e).into())
    }

    pub fn ingest_url(&self) -> String {
        join_url(&self.ingest_base_url, INGEST_PATH)
    }

    pub fn alarms_url(&self) -> String {
        join_url(&self.alarms_base_url, ALARMS_PATH)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
