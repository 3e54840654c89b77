//! In-memory test doubles for the harvest pipeline.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;

use crate::api::{ApiError, GradingService};
use crate::auth::{Credential, CredentialProvider};
use crate::deadlines::DeadlineTable;
use crate::models::{
    Assignment, RawAssignment, RawGroup, RawGroupSet, RawParticipant, RawPerson, RawSignoff,
    Student, Track,
};

/// In-memory grading service.
///
/// Remote calls are counted in order (roster, catalogs, then one call per
/// signoff lookup); a single-shot `Unauthorized` or transport fault can be
/// armed at any call index, and disarms once fired so the next attempt's
/// fresh credential succeeds. Clones share the call counter and the armed
/// failures, so a test can keep one clone for inspection after handing the
/// other to the controller.
#[derive(Clone)]
pub struct FakeService {
    pub groups: Vec<RawGroup>,
    pub programming: Vec<Assignment>,
    pub design: Vec<Assignment>,
    pub signoffs: HashMap<(i64, i64), Vec<RawSignoff>>,
    pub deadlines: DeadlineTable,
    calls: Rc<Cell<usize>>,
    fail_at: Rc<Cell<Option<usize>>>,
    fault_at: Rc<Cell<Option<usize>>>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            programming: Vec::new(),
            design: Vec::new(),
            signoffs: HashMap::new(),
            deadlines: DeadlineTable::default(),
            calls: Rc::new(Cell::new(0)),
            fail_at: Rc::new(Cell::new(None)),
            fault_at: Rc::new(Cell::new(None)),
        }
    }
}

impl FakeService {
    /// Total remote calls served so far, across attempts.
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }

    /// Arm a single-shot `Unauthorized` at the given call index.
    pub fn fail_at_call(&self, index: usize) {
        self.fail_at.set(Some(index));
    }

    /// Arm a single-shot transport fault at the given call index.
    pub fn fault_at_call(&self, index: usize) {
        self.fault_at.set(Some(index));
    }

    fn gate(&self) -> Result<(), ApiError> {
        let call = self.calls.get();
        self.calls.set(call + 1);

        if self.fail_at.get() == Some(call) {
            self.fail_at.set(None);
            return Err(ApiError::Unauthorized);
        }
        if self.fault_at.get() == Some(call) {
            self.fault_at.set(None);
            return Err(ApiError::InvalidResponse("connection reset".to_string()));
        }
        Ok(())
    }
}

impl GradingService for FakeService {
    async fn fetch_roster(&self, _credential: &Credential) -> Result<Vec<RawGroup>, ApiError> {
        self.gate()?;
        Ok(self.groups.clone())
    }

    async fn fetch_catalog(
        &self,
        _credential: &Credential,
        track: Track,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.gate()?;
        Ok(match track {
            Track::Programming => self.programming.clone(),
            Track::Design => self.design.clone(),
        })
    }

    async fn fetch_signoff_history(
        &self,
        _credential: &Credential,
        participant_id: i64,
        assignment_id: i64,
    ) -> Result<Vec<RawSignoff>, ApiError> {
        self.gate()?;
        Ok(self
            .signoffs
            .get(&(participant_id, assignment_id))
            .cloned()
            .unwrap_or_default())
    }
}

/// Hands out a fresh token on every acquisition and counts them. Clones
/// share the counter.
#[derive(Clone, Default)]
pub struct ScriptedCredentials {
    issued: Rc<Cell<usize>>,
}

impl ScriptedCredentials {
    pub fn issued(&self) -> usize {
        self.issued.get()
    }
}

impl CredentialProvider for ScriptedCredentials {
    fn acquire(&mut self) -> Result<Credential> {
        self.issued.set(self.issued.get() + 1);
        Ok(Credential::new(format!("token-{}", self.issued.get())))
    }
}

pub fn signoff(signed_at: &str) -> RawSignoff {
    RawSignoff {
        signed_at: signed_at.to_string(),
    }
}

pub fn assignment(id: i64, name: &str, track: Track) -> Assignment {
    RawAssignment {
        id,
        name: name.to_string(),
    }
    .into_assignment(track)
}

pub fn student(participant_id: i64, student_number: &str) -> Student {
    Student {
        participant_id,
        student_number: student_number.to_string(),
        external_id: "132432".to_string(),
        group_name: "Pairs Green-23".to_string(),
        group_set_id: 2514,
        group_set_external_id: "12437".to_string(),
    }
}

pub fn group(name: &str, participants: &[(i64, &str)]) -> RawGroup {
    RawGroup {
        name: name.to_string(),
        external_id: "132432".to_string(),
        group_set: RawGroupSet {
            id: 2514,
            external_id: "12437".to_string(),
        },
        participants: participants
            .iter()
            .map(|(id, login)| RawParticipant {
                id: *id,
                person: RawPerson {
                    login_id: login.to_string(),
                },
            })
            .collect(),
    }
}
