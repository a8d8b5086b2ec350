//! Reveal sessions: the order in which seated persons are disclosed.
//!
//! Every transition consumes a session and returns the next one. A transition
//! that does not apply to the current state hands the input back unchanged;
//! nothing here fails.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::assignment::Assignment;
use super::project::PersonId;
use super::shuffle::shuffle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevealState {
    /// Only a front-end default; started sessions are never idle.
    #[default]
    Idle,
    Revealing,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealMode {
    /// Random order, one person per step.
    Roulette,
    /// Seat order, everything disclosed at start.
    RevealAll,
    /// Seat order, one person per step.
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealSession {
    pub id: Uuid,
    pub project_id: Uuid,
    pub assignment_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub state: RevealState,
    pub mode: RevealMode,
    pub order: Vec<PersonId>,
    /// Always a prefix of `order`.
    pub revealed_person_ids: Vec<PersonId>,
}

impl RevealSession {
    /// Paused or mid-reveal; the assignment should not be edited meanwhile.
    pub fn is_locked(&self) -> bool {
        matches!(self.state, RevealState::Revealing | RevealState::Paused)
    }

    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.revealed_person_ids.len())
    }

    /// The person disclosed by the most recent step, if any.
    pub fn last_revealed(&self) -> Option<&str> {
        self.revealed_person_ids.last().map(String::as_str)
    }
}

/// Caller-facing events, dispatched by [`apply_reveal_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    Advance,
    Pause,
    Resume,
    Finish,
}

/// Persons in row-major seat order, each once (first seat wins).
fn seat_order(assignment: &Assignment) -> Vec<PersonId> {
    let mut seen = HashSet::new();
    assignment
        .seat_to_person
        .values()
        .filter(|person_id| !person_id.is_empty())
        .filter(|person_id| seen.insert(person_id.as_str()))
        .cloned()
        .collect()
}

pub fn start_reveal_session<R: Rng + ?Sized>(
    project_id: Uuid,
    assignment: &Assignment,
    mode: RevealMode,
    now: OffsetDateTime,
    rng: &mut R,
) -> RevealSession {
    let mut order = seat_order(assignment);
    let (state, revealed_person_ids) = match mode {
        RevealMode::Roulette => {
            shuffle(&mut order, rng);
            (RevealState::Revealing, Vec::new())
        }
        RevealMode::RevealAll => (RevealState::Finished, order.clone()),
        RevealMode::Block => (RevealState::Revealing, Vec::new()),
    };

    RevealSession {
        id: Uuid::new_v4(),
        project_id,
        assignment_id: assignment.id,
        started_at: now,
        state,
        mode,
        order,
        revealed_person_ids,
    }
}

/// Disclose the next person. Only acts while revealing.
pub fn advance_reveal_step(mut session: RevealSession) -> RevealSession {
    if session.state != RevealState::Revealing {
        return session;
    }

    let next = session.revealed_person_ids.len();
    match session.order.get(next) {
        Some(person_id) => {
            session.revealed_person_ids.push(person_id.clone());
            if session.revealed_person_ids.len() >= session.order.len() {
                session.state = RevealState::Finished;
            }
        }
        None => session.state = RevealState::Finished,
    }
    session
}

pub fn pause_reveal_session(mut session: RevealSession) -> RevealSession {
    if session.state == RevealState::Revealing {
        session.state = RevealState::Paused;
    }
    session
}

pub fn resume_reveal_session(mut session: RevealSession) -> RevealSession {
    if session.state == RevealState::Paused {
        session.state = RevealState::Revealing;
    }
    session
}

/// Disclose everything and stop, from any state.
pub fn finish_reveal_session(mut session: RevealSession) -> RevealSession {
    session.revealed_person_ids = session.order.clone();
    session.state = RevealState::Finished;
    session
}

pub fn apply_reveal_event(session: RevealSession, event: RevealEvent) -> RevealSession {
    match event {
        RevealEvent::Advance => advance_reveal_step(session),
        RevealEvent::Pause => pause_reveal_session(session),
        RevealEvent::Resume => resume_reveal_session(session),
        RevealEvent::Finish => finish_reveal_session(session),
    }
}
