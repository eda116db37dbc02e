pub mod metrics;
pub mod network;
