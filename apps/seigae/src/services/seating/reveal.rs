use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use super::{now, SeatingService};
use crate::domain::reveal::{
    apply_reveal_event, start_reveal_session, RevealEvent, RevealMode, RevealSession, RevealState,
};
use crate::errors::domain::DomainError;
use crate::repos::SeatingStore;

impl<S: SeatingStore> SeatingService<S> {
    /// Open a reveal session over a stored assignment.
    pub fn start_reveal(
        &self,
        assignment_id: Uuid,
        mode: RevealMode,
    ) -> Result<RevealSession, DomainError> {
        let assignment = self.require_assignment(assignment_id)?;
        let session = {
            let mut rng = self.rng.lock();
            start_reveal_session(assignment.project_id, &assignment, mode, now(), &mut *rng)
        };
        self.store.save_reveal_session(&session)?;

        info!(
            session_id = %session.id,
            assignment_id = %assignment_id,
            mode = ?mode,
            persons = session.order.len(),
            state = ?session.state,
            "Reveal started"
        );
        Ok(session)
    }

    /// Apply one event to a stored session and persist the result.
    pub fn apply_reveal(
        &self,
        session_id: Uuid,
        event: RevealEvent,
    ) -> Result<RevealSession, DomainError> {
        let before = self.require_reveal_session(session_id)?;
        let from = before.state;
        let session = apply_reveal_event(before, event);
        self.store.save_reveal_session(&session)?;

        debug!(
            session_id = %session_id,
            event = ?event,
            from = ?from,
            to = ?session.state,
            revealed = session.revealed_person_ids.len(),
            "Reveal transition"
        );
        Ok(session)
    }

    pub fn advance_reveal(&self, session_id: Uuid) -> Result<RevealSession, DomainError> {
        self.apply_reveal(session_id, RevealEvent::Advance)
    }

    pub fn pause_reveal(&self, session_id: Uuid) -> Result<RevealSession, DomainError> {
        self.apply_reveal(session_id, RevealEvent::Pause)
    }

    pub fn resume_reveal(&self, session_id: Uuid) -> Result<RevealSession, DomainError> {
        self.apply_reveal(session_id, RevealEvent::Resume)
    }

    pub fn finish_reveal(&self, session_id: Uuid) -> Result<RevealSession, DomainError> {
        self.apply_reveal(session_id, RevealEvent::Finish)
    }

    pub fn get_reveal_session(&self, session_id: Uuid) -> Result<RevealSession, DomainError> {
        self.require_reveal_session(session_id)
    }

    /// Reveal sessions of a project, newest first.
    pub fn list_reveal_sessions(
        &self,
        project_id: Uuid,
    ) -> Result<Vec<RevealSession>, DomainError> {
        self.require_project(project_id)?;
        self.store.list_reveal_sessions(project_id)
    }

    /// Drive a session on a timer until it stops revealing.
    ///
    /// Ticks are serialized: sleep, advance, persist, report. The session is
    /// re-read every tick, so a pause or finish issued elsewhere ends the loop.
    /// `on_step` returning `Break` stops playback after the current step; the
    /// session stays as persisted.
    pub fn play_reveal<F>(
        &self,
        session_id: Uuid,
        tick: Duration,
        mut on_step: F,
    ) -> Result<RevealSession, DomainError>
    where
        F: FnMut(&RevealSession) -> ControlFlow<()>,
    {
        let mut session = self.require_reveal_session(session_id)?;
        while session.state == RevealState::Revealing {
            if !tick.is_zero() {
                thread::sleep(tick);
            }
            let current = self.require_reveal_session(session_id)?;
            if current.state != RevealState::Revealing {
                session = current;
                break;
            }
            session = self.advance_reveal(session_id)?;
            if on_step(&session).is_break() {
                debug!(session_id = %session_id, "Reveal playback interrupted");
                break;
            }
        }

        info!(
            session_id = %session_id,
            state = ?session.state,
            revealed = session.revealed_person_ids.len(),
            "Reveal playback stopped"
        );
        Ok(session)
    }
}
