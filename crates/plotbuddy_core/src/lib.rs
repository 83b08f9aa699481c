//! # plotbuddy_core - Session logic for the PlotBuddy client
//!
//! This crate implements the client-side conversational contract:
//! - **Transcript**: append-only, in-memory log of chat turns
//! - **Redirect interpreter**: the two-sentinel control protocol that
//!   steers the user from chat into the story creator on a delay
//! - **View controller**: one active top-level view, explicit
//!   navigation, history that survives round-trips
//! - **Story configuration**: the option catalog, form validation, and
//!   generation with degraded-mode fallbacks
//! - **Profile**: profile/recommendation loading that falls back to
//!   hard-coded content when the backend is unreachable
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐      ┌─────────────────┐      ┌──────────────────┐
//! │  Front end   │─────▶│  AppController  │─────▶│   AgentGateway   │
//! │ (chat loop)  │      │ transcript+view │      │  (plotbuddy_api) │
//! └──────────────┘      └────────┬────────┘      └──────────────────┘
//!                                │
//!                       ┌────────▼────────┐
//!                       │ Redirect        │
//!                       │ interpreter     │
//!                       │ (armed timer)   │
//!                       └─────────────────┘
//! ```
//!
//! The controller never touches a socket directly; everything remote
//! goes through the [`plotbuddy_api::AgentGateway`] seam, which is what
//! makes the contract testable with scripted replies.

pub mod controller;
pub mod error;
pub mod profile;
pub mod redirect;
pub mod story;
pub mod transcript;
pub mod view;

pub use controller::*;
pub use error::*;
pub use profile::*;
pub use redirect::*;
pub use story::*;
pub use transcript::*;
pub use view::*;
