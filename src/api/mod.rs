//! REST client module for the Horus signoff service.
//!
//! This module provides the `ApiClient` for fetching the group roster, the
//! assignment catalogs, and per-student signoff histories.
//!
//! The API authenticates every request with an `Authorization` header whose
//! value the operator supplies interactively; a 401 surfaces as
//! [`ApiError::Unauthorized`] and is the restart signal for the harvest.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;

use crate::auth::Credential;
use crate::models::{Assignment, RawGroup, RawSignoff, Track};

/// The remote surface the harvest pipeline consumes.
///
/// Implemented by [`ApiClient`]; tests substitute an in-memory fake to
/// inject authorization failures at arbitrary points of a run.
#[allow(async_fn_in_trait)]
pub trait GradingService {
    /// Fetch the raw group roster for the configured group set.
    async fn fetch_roster(&self, credential: &Credential) -> Result<Vec<RawGroup>, ApiError>;

    /// Fetch a track's assignment catalog, names parsed at ingestion.
    async fn fetch_catalog(
        &self,
        credential: &Credential,
        track: Track,
    ) -> Result<Vec<Assignment>, ApiError>;

    /// Fetch the signoff history for one (participant, assignment) pair,
    /// ordered most-recent-first. Empty means not yet signed off.
    async fn fetch_signoff_history(
        &self,
        credential: &Credential,
        participant_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<RawSignoff>, ApiError>;
}
