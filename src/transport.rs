//! HTTP plumbing to the ingestion and alarm-status services.
//!
//! Blocking, one request at a time, no retry. Anything that is not a
//! `200 OK` comes back as an error for the caller to count.

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::simulation::types::{AlarmStatus, EventRecord};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Seam between the scenario runner and the network.
pub trait Transport {
    fn post_event(&self, record: &EventRecord) -> SimResult<()>;
    fn fetch_alarms(&self) -> SimResult<AlarmStatus>;
}

pub struct HttpTransport {
    client: Client,
    ingest_url: String,
    alarms_url: String,
    token: String,
    user_id: u64,
}

impl HttpTransport {
    pub fn new(config: &SimConfig) -> SimResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            ingest_url: config.ingest_url(),
            alarms_url: config.alarms_url(),
            token: config.token.clone(),
            user_id: config.user_id,
        })
    }

    pub fn ingest_url(&self) -> &str {
        &self.ingest_url
    }

    pub fn alarms_url(&self) -> &str {
        &self.alarms_url
    }
}

impl Transport for HttpTransport {
    fn post_event(&self, record: &EventRecord) -> SimResult<()> {
        let response = self
            .client
            .post(&self.ingest_url)
            .header(CONTENT_TYPE, "application/json")
            .json(record)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SimError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        debug!(event_type = %record.event_type, ip = %record.ip_address, "event accepted");
        Ok(())
    }

    fn fetch_alarms(&self) -> SimResult<AlarmStatus> {
        let response = self
            .client
            .get(&self.alarms_url)
            .bearer_auth(&self.token)
            .header(USER_ID_HEADER, self.user_id.to_string())
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SimError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
