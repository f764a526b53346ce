//! # supply-core
//!
//! Shared pieces of the supply-chain assistant: the error taxonomy ([`SupplyError`],
//! [`ToolError`]), tracing initialization and the aggregated [`AppConfig`].

pub mod config;
pub mod error;
pub mod logger;

pub use config::{AppConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_VECTOR_INDEX};
pub use error::{Result, SupplyError, ToolError};
pub use logger::init_tracing;
