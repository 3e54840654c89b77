//! The harvest controller.
//!
//! Walks the roster × catalogs iteration space, awarding points for every
//! eligible signoff. Auth tokens routinely expire mid-run; the controller
//! checkpoints how many students finished cleanly, rolls back the student it
//! was interrupted on, and restarts with a fresh token from the operator.
//! Results computed before the interruption are kept; a student is only ever
//! fully counted or not counted at all.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::api::{ApiError, GradingService};
use crate::auth::{Credential, CredentialProvider};
use crate::config::Config;
use crate::models::{flatten_roster, Assignment, Student, Track};

use super::ledger::{LedgerEntry, PointsLedger};
use super::resolver::{Decision, SignoffResolver};

/// Progress carried across restarts. Lives only as long as the process.
#[derive(Debug, Clone, Default)]
struct Checkpoint {
    /// Students fully processed in earlier attempts.
    resume_offset: usize,
    /// The student whose processing the last attempt was interrupted on.
    in_flight: Option<Student>,
}

enum AttemptOutcome {
    Completed,
    /// Authorization expired. `processed` students finished cleanly this
    /// attempt; `in_flight` was interrupted mid-processing.
    Interrupted {
        processed: usize,
        in_flight: Option<Student>,
    },
}

pub struct HarvestController<S, P> {
    service: S,
    credentials: P,
    config: Config,
    ledger: PointsLedger,
}

impl<S: GradingService, P: CredentialProvider> HarvestController<S, P> {
    pub fn new(service: S, credentials: P, config: Config) -> Self {
        let ledger = PointsLedger::new(config.points_per_assignment);
        Self {
            service,
            credentials,
            config,
            ledger,
        }
    }

    /// Run the harvest to completion and return the final ledger snapshot.
    ///
    /// Every authorization failure rolls back the interrupted student,
    /// advances the checkpoint past the students that finished cleanly, and
    /// asks the credential provider for a fresh token. Attempts are
    /// unbounded; each one needs new operator input.
    pub async fn run(mut self) -> Result<Vec<LedgerEntry>> {
        let mut checkpoint = Checkpoint::default();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            if attempt > 1 {
                info!(
                    attempt,
                    resume_offset = checkpoint.resume_offset,
                    "restarting harvest"
                );
            }

            let credential = self
                .credentials
                .acquire()
                .context("failed to acquire an auth token")?;

            match self.attempt(&credential, &checkpoint).await? {
                AttemptOutcome::Completed => return Ok(self.ledger.snapshot()),
                AttemptOutcome::Interrupted {
                    processed,
                    in_flight,
                } => {
                    if let Some(ref student) = in_flight {
                        // Partial counts must not survive into the next
                        // attempt's reprocessing of the same student.
                        self.ledger.remove_entry(&student.student_number);
                    }
                    checkpoint.resume_offset += processed;
                    checkpoint.in_flight = in_flight;
                    warn!(
                        attempt,
                        resume_offset = checkpoint.resume_offset,
                        "authorization expired; a fresh token is required"
                    );
                }
            }
        }
    }

    /// One pass over the remaining roster with a single credential.
    async fn attempt(
        &mut self,
        credential: &Credential,
        checkpoint: &Checkpoint,
    ) -> Result<AttemptOutcome> {
        let groups = match self.service.fetch_roster(credential).await {
            Ok(groups) => groups,
            Err(ApiError::Unauthorized) => {
                return Ok(AttemptOutcome::Interrupted {
                    processed: 0,
                    in_flight: None,
                })
            }
            Err(err) => return Err(err).context("failed to fetch the group roster"),
        };
        let roster = flatten_roster(&groups, &self.config.blacklist);

        let mut catalogs: Vec<(Track, Vec<Assignment>)> = Vec::with_capacity(Track::ALL.len());
        for track in Track::ALL {
            let assignments = match self.service.fetch_catalog(credential, track).await {
                Ok(assignments) => assignments,
                Err(ApiError::Unauthorized) => {
                    return Ok(AttemptOutcome::Interrupted {
                        processed: 0,
                        in_flight: None,
                    })
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to fetch the {track} catalog"))
                }
            };
            if self.config.strict_names {
                if let Some(bad) = assignments.iter().find(|a| a.slot.is_none()) {
                    bail!(
                        "assignment {:?} in the {track} catalog does not follow the naming convention",
                        bad.name
                    );
                }
            }
            catalogs.push((track, assignments));
        }

        if let Some(ref student) = checkpoint.in_flight {
            info!(
                student = %student.student_number,
                group = %student.group_name,
                rolled_back = !self.ledger.contains(&student.student_number),
                "reprocessing the student interrupted last attempt"
            );
        }

        let resolver = SignoffResolver::new(&self.service, &self.config.deadlines);
        let total = roster.len();
        let mut processed = 0usize;

        for student in roster.iter().skip(checkpoint.resume_offset) {
            let done = checkpoint.resume_offset + processed;
            let percent = (done + 1) as f64 / total as f64 * 100.0;
            info!(student = %student.student_number, "processing ({:.0}%)", percent);

            for (track, assignments) in &catalogs {
                for assignment in assignments {
                    match resolver.resolve(student, assignment, credential).await {
                        Ok(Decision::Eligible) => {
                            self.ledger.increment(&student.student_number, *track)
                        }
                        Ok(Decision::NotEligible) => {}
                        Err(ApiError::Unauthorized) => {
                            return Ok(AttemptOutcome::Interrupted {
                                processed,
                                in_flight: Some(student.clone()),
                            });
                        }
                        Err(err) if self.config.fail_on_fault => {
                            return Err(err).with_context(|| {
                                format!(
                                    "signoff lookup failed for {} on {}",
                                    student.student_number, assignment.name
                                )
                            });
                        }
                        Err(err) => {
                            // Deliberate undercount: an unreadable history is
                            // treated as not signed off rather than failing
                            // the whole run.
                            warn!(
                                student = %student.student_number,
                                assignment = %assignment.name,
                                error = %err,
                                "signoff lookup failed; counting as not eligible"
                            );
                        }
                    }
                }
            }
            processed += 1;
        }

        Ok(AttemptOutcome::Completed)
    }
}
