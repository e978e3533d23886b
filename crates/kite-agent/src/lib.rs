//! kite-agent: Remote agent call contract
//!
//! This crate defines the request/response envelope exchanged with the remote
//! workspace agent, the [`AgentClient`] seam and its HTTP implementation.

pub mod client;
pub mod error;
pub mod types;

pub use client::{AgentClient, HttpAgentClient};
pub use error::{Error, Result};
pub use types::*;
