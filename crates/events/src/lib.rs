#![warn(clippy::unwrap_used)]

pub mod log;

pub use log::EventLog;
