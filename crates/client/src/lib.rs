//! Scoring API client — shared between the CLI and any future desktop
//! surface.
//!
//! This crate is the single source of truth for the scoring wire
//! contract: environment → endpoint resolution, the direct and proxied
//! request shapes, the 120-second deadline, and the normalization of the
//! response envelope into records. No retries, no progress reporting.

mod client;
mod env;
mod error;
mod normalize;

pub use client::{ScoreClient, ScoreOutcome, DEFAULT_DEADLINE};
pub use env::Environment;
pub use error::ScoreError;
pub use normalize::normalize_response;
