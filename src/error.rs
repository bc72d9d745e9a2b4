//! Error types for the simulator.
//!
//! Per-event failures never leave the runner: they are logged and folded
//! into a delivery count. These variants exist so the transport can say
//! *why* something failed before that happens.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("alarm service reported failure: {0}")]
    Rejected(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
