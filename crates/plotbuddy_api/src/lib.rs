//! # plotbuddy_api - Agent Gateway for the PlotBuddy client
//!
//! This crate is the client's single point of contact with the remote
//! agent backend:
//! - Typed wire models for the four JSON-over-POST endpoints
//! - An HTTP client with explicit, construction-time configuration
//! - The [`AgentGateway`] trait seam the session logic is written against
//! - A scripted [`mock::MockGateway`] for tests
//!
//! ## Key Properties
//!
//! - **No ambient state**: base URL and user id are passed in, never
//!   read from globals
//! - **No automatic retries**: failures surface once; re-submission is
//!   a user action
//! - **Tolerant parsing**: optional reply fields and both historical
//!   profile response shapes are accepted

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod models;

pub use client::*;
pub use config::*;
pub use error::*;
pub use gateway::*;
pub use models::*;
