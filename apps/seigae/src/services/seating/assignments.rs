use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{now, SeatingService};
use crate::domain::assignment::{
    build_adjusted_assignment, build_generated_assignment, Assignment, AssignmentEdit,
};
use crate::domain::draft::AdjustmentDraft;
use crate::domain::seat::{SeatKey, SeatToPersonMap};
use crate::domain::validation::{validate_assignment, Violation};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::SeatingStore;

impl<S: SeatingStore> SeatingService<S> {
    /// Generate and persist a new assignment for the project.
    pub fn generate_assignment(&self, project_id: Uuid) -> Result<Assignment, DomainError> {
        let project = self.require_project(project_id)?;
        let assignment = {
            let mut rng = self.rng.lock();
            build_generated_assignment(&project, &self.options, now(), &mut *rng)
        }
        .inspect_err(|e| {
            warn!(project_id = %project_id, error = %e, "Generation refused");
        })?;
        self.store.save_assignment(&assignment)?;

        info!(
            project_id = %project_id,
            assignment_id = %assignment.id,
            seated = assignment.seat_to_person.len(),
            hard_violations = assignment.hard_violation_count(),
            commit = assignment.commit.as_deref().unwrap_or_default(),
            "Assignment generated"
        );
        Ok(assignment)
    }

    pub fn get_assignment(&self, id: Uuid) -> Result<Assignment, DomainError> {
        self.require_assignment(id)
    }

    /// Assignments of a project, newest first.
    pub fn list_assignments(&self, project_id: Uuid) -> Result<Vec<Assignment>, DomainError> {
        self.require_project(project_id)?;
        self.store.list_assignments(project_id)
    }

    /// Check a draft mapping against the current project. Nothing is stored.
    pub fn validate_draft(
        &self,
        project_id: Uuid,
        seat_to_person: &SeatToPersonMap,
    ) -> Result<Vec<Violation>, DomainError> {
        let project = self.require_project(project_id)?;
        let violations = validate_assignment(&project, seat_to_person);
        debug!(project_id = %project_id, violations = violations.len(), "Draft validated");
        Ok(violations)
    }

    /// Persist a hand-edited mapping as a new snapshot.
    pub fn save_adjusted_assignment(
        &self,
        project_id: Uuid,
        seat_to_person: SeatToPersonMap,
        edits: Vec<AssignmentEdit>,
        base_assignment_id: Option<Uuid>,
    ) -> Result<Assignment, DomainError> {
        let project = self.require_project(project_id)?;
        if let Some(base_id) = base_assignment_id {
            self.require_assignment(base_id)?;
            self.ensure_not_revealing(base_id)?;
        }

        let assignment =
            build_adjusted_assignment(&project, seat_to_person, edits, base_assignment_id, now());
        self.persist_adjusted(assignment)
    }

    /// Apply seat drags to a stored assignment and save the result as a new one.
    ///
    /// Occupants of seats disabled since the base was saved, and persons no
    /// longer in the project, are unseated first. Drags that cannot apply
    /// (same seat, disabled seat, empty source) are skipped, matching what a
    /// drag-and-drop front end would do.
    pub fn adjust_assignment(
        &self,
        assignment_id: Uuid,
        drags: &[(SeatKey, SeatKey)],
    ) -> Result<Assignment, DomainError> {
        let base = self.require_assignment(assignment_id)?;
        self.ensure_not_revealing(base.id)?;
        let project = self.require_project(base.project_id)?;

        let mut draft = AdjustmentDraft::from_assignment(&base);
        draft.prune_disabled(&project.layout);
        let removed = draft.remove_unknown_persons(&project);
        if !removed.is_empty() {
            debug!(assignment_id = %assignment_id, removed = ?removed, "Unseated removed persons");
        }
        for (from, to) in drags {
            if draft.drop_seat(&project.layout, from, to, now()).is_none() {
                debug!(from = %from, to = %to, "Drag ignored");
            }
        }

        self.persist_adjusted(draft.into_assignment(&project, now()))
    }

    fn persist_adjusted(&self, assignment: Assignment) -> Result<Assignment, DomainError> {
        self.store.save_assignment(&assignment)?;

        info!(
            project_id = %assignment.project_id,
            assignment_id = %assignment.id,
            base_assignment_id = ?assignment.base_assignment_id,
            edits = assignment.edits.as_ref().map_or(0, Vec::len),
            hard_violations = assignment.hard_violation_count(),
            "Adjusted assignment saved"
        );
        Ok(assignment)
    }

    fn ensure_not_revealing(&self, assignment_id: Uuid) -> Result<(), DomainError> {
        let locked = self
            .store
            .list_reveal_sessions_for_assignment(assignment_id)?
            .iter()
            .any(|s| s.is_locked());
        if locked {
            return Err(DomainError::validation(
                ValidationKind::RevealInProgress,
                format!("assignment {assignment_id} is being revealed; finish the reveal first"),
            ));
        }
        Ok(())
    }
}
