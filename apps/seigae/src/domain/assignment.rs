//! Assignment snapshots. Built once, never edited; adjustments make new ones.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::generator::{generate_seat_to_person, GenerateOptions};
use super::project::Project;
use super::seat::{SeatKey, SeatToPersonMap};
use super::validation::{hard_violation_count, validate_assignment, Violation};
use crate::errors::domain::DomainError;

pub const ADJUSTED_COMMIT: &str = "adjusted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditKind {
    Move,
    Swap,
}

/// One manual drag between two seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentEdit {
    #[serde(rename = "type")]
    pub kind: EditKind,
    pub from_seat: SeatKey,
    pub to_seat: SeatKey,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub seat_to_person: SeatToPersonMap,
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edits: Option<Vec<AssignmentEdit>>,
    /// Free-text provenance such as `generated(attempts=3)` or `adjusted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Snapshot this one was adjusted from. Lookup only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_assignment_id: Option<Uuid>,
}

impl Assignment {
    pub fn hard_violation_count(&self) -> usize {
        hard_violation_count(&self.violations)
    }
}

pub fn generated_commit(attempts: u32) -> String {
    format!("generated(attempts={attempts})")
}

/// Run the generator and wrap its result as a fresh snapshot.
pub fn build_generated_assignment<R: Rng + ?Sized>(
    project: &Project,
    options: &GenerateOptions,
    now: OffsetDateTime,
    rng: &mut R,
) -> Result<Assignment, DomainError> {
    let generated = generate_seat_to_person(project, options, rng)?;

    Ok(Assignment {
        id: Uuid::new_v4(),
        project_id: project.id,
        created_at: now,
        seat_to_person: generated.seat_to_person,
        violations: generated.violations,
        edits: None,
        commit: Some(generated_commit(generated.attempts)),
        base_assignment_id: None,
    })
}

/// Snapshot a hand-edited mapping, re-validated against the current project.
pub fn build_adjusted_assignment(
    project: &Project,
    seat_to_person: SeatToPersonMap,
    edits: Vec<AssignmentEdit>,
    base_assignment_id: Option<Uuid>,
    now: OffsetDateTime,
) -> Assignment {
    let violations = validate_assignment(project, &seat_to_person);

    Assignment {
        id: Uuid::new_v4(),
        project_id: project.id,
        created_at: now,
        seat_to_person,
        violations,
        edits: Some(edits),
        commit: Some(ADJUSTED_COMMIT.to_string()),
        base_assignment_id,
    }
}
