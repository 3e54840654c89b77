//! The eligibility decision for one (student, assignment) pair.

use tracing::debug;

use crate::api::{ApiError, GradingService};
use crate::auth::Credential;
use crate::deadlines::DeadlineTable;
use crate::models::{Assignment, Student};

/// Outcome of a single eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Eligible,
    NotEligible,
}

pub struct SignoffResolver<'a, S> {
    service: &'a S,
    deadlines: &'a DeadlineTable,
}

impl<'a, S: GradingService> SignoffResolver<'a, S> {
    pub fn new(service: &'a S, deadlines: &'a DeadlineTable) -> Self {
        Self { service, deadlines }
    }

    /// Decide whether `student` earns points for `assignment`.
    ///
    /// An assignment without a parsed name or without a configured deadline
    /// has nothing to compare against and resolves to `NotEligible` without
    /// touching the service. An empty signoff history is the normal
    /// not-yet-signed-off outcome, not a fault. Errors are returned to the
    /// caller undecided; only the controller picks between skip and abort.
    pub async fn resolve(
        &self,
        student: &Student,
        assignment: &Assignment,
        credential: &Credential,
    ) -> Result<Decision, ApiError> {
        let Some(slot) = assignment.slot else {
            return Ok(Decision::NotEligible);
        };
        let Some(cutoff) = self.deadlines.cutoff(slot.week) else {
            debug!(
                assignment = %assignment.name,
                week = slot.week,
                "no deadline configured for this week; skipping"
            );
            return Ok(Decision::NotEligible);
        };

        let history = self
            .service
            .fetch_signoff_history(credential, student.participant_id, assignment.id)
            .await?;

        let Some(latest) = history.first() else {
            return Ok(Decision::NotEligible);
        };
        let signed = latest.signed_date().map_err(ApiError::InvalidResponse)?;

        // The cutoff day itself still earns points.
        if signed <= cutoff {
            Ok(Decision::Eligible)
        } else {
            Ok(Decision::NotEligible)
        }
    }
}
