//! # Engine Module
//!
//! The stateful half of the pipeline. Where [`crate::core`] provides pure
//! functions over single frames and graphs, the engine drives a whole
//! trajectory through them and collects the results.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Threshold, selection, metric set, failure
//!   policy and output options, validated by a builder
//! - **Frame Driver** ([`driver`]) - Per-frame state machine that builds the
//!   contact graph, computes the requested metrics and records them
//! - **Dataset** ([`dataset`]) - Append-only store of centrality vectors keyed
//!   by metric and frame
//! - **Aggregation** ([`aggregate`]) - Mean, median or standard deviation of
//!   every metric across frames
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error taxonomy

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod driver;
pub mod error;
pub(crate) mod outputs;
pub mod progress;
