//! Synthetic security-event simulation
//!
//! - **types**: wire records, results, alarm status
//! - **pools**: read-only IP, user-agent and landmark pools
//! - **geo**: great-circle distance, landmark pairing
//! - **scenarios**: the four alarm scenarios
//! - **runner**: sends planned events and keeps the result log

pub mod geo;
pub mod pools;
pub mod runner;
pub mod scenarios;
pub mod types;
