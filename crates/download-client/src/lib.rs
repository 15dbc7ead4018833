//! Download service client library.
//!
//! This crate provides a Rust client for the external satellite imagery
//! download service. The service is fire-and-poll: a download is submitted,
//! a task ID comes back, and the task status is polled until it reaches a
//! terminal state. It supports:
//!
//! - Health checking
//! - Submitting a download for an AOI and date range
//! - Polling and cancelling tasks
//!
//! Responses are kept as [`ProxyResponse`] values (upstream status plus body)
//! so an HTTP layer can pass them through unchanged.
//!
//! # Example
//!
//! ```no_run
//! use download_client::{DownloadClient, DownloadConfig, DownloadRequest};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), download_client::DownloadError> {
//! let client = DownloadClient::new(DownloadConfig::new("http://localhost:8010"))?;
//!
//! let record = aoi::import_aoi("25.5,44.3,26.1,44.7").unwrap().unwrap();
//! let request = DownloadRequest::from_aoi(&record, "2021-12-01", "2022-01-15");
//! let response = client.run(&request).await?;
//!
//! if let Some(task_id) = response.task_id() {
//!     let state = client
//!         .wait_for_completion(&task_id, Duration::from_secs(2), 300)
//!         .await?;
//!     println!("Task {} finished: {}", task_id, state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::DownloadClient;
pub use config::DownloadConfig;
pub use error::{DownloadError, Result};
pub use types::{task_id, DownloadRequest, ProxyBody, ProxyResponse, TaskState, TERMINAL_STATES};
