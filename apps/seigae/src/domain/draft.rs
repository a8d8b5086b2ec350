//! Manual adjustment of an assignment before it is saved as a new snapshot.

use time::OffsetDateTime;
use uuid::Uuid;

use super::assignment::{build_adjusted_assignment, Assignment, AssignmentEdit, EditKind};
use super::project::{Layout, PersonId, Project};
use super::seat::{SeatKey, SeatToPersonMap};

/// Working copy of a mapping plus the edits applied to it so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentDraft {
    pub seat_to_person: SeatToPersonMap,
    pub edits: Vec<AssignmentEdit>,
    pub base_assignment_id: Option<Uuid>,
}

impl AdjustmentDraft {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            seat_to_person: assignment.seat_to_person.clone(),
            edits: Vec::new(),
            base_assignment_id: Some(assignment.id),
        }
    }

    fn occupant(&self, seat: &SeatKey) -> Option<&str> {
        self.seat_to_person
            .get(seat)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Drag the occupant of `from` onto `to`.
    ///
    /// Swaps when `to` is occupied, moves otherwise. Returns `None` and leaves
    /// the draft untouched when the seats are equal, either one is disabled,
    /// or `from` is empty.
    pub fn drop_seat(
        &mut self,
        layout: &Layout,
        from: &SeatKey,
        to: &SeatKey,
        at: OffsetDateTime,
    ) -> Option<EditKind> {
        if from == to || layout.is_disabled(from) || layout.is_disabled(to) {
            return None;
        }
        let moving = self.occupant(from)?.to_string();

        let kind = match self.occupant(to).map(str::to_string) {
            Some(displaced) => {
                self.seat_to_person.insert(from.clone(), displaced);
                EditKind::Swap
            }
            None => {
                self.seat_to_person.remove(from);
                EditKind::Move
            }
        };
        self.seat_to_person.insert(to.clone(), moving);

        self.edits.push(AssignmentEdit {
            kind,
            from_seat: from.clone(),
            to_seat: to.clone(),
            at,
        });
        Some(kind)
    }

    /// Unseat a person everywhere they appear; returns how many seats freed.
    pub fn remove_person(&mut self, person_id: &str) -> usize {
        let before = self.seat_to_person.len();
        self.seat_to_person.retain(|_, occupant| occupant != person_id);
        before - self.seat_to_person.len()
    }

    /// Unseat every occupant the project no longer lists; returns their ids.
    pub fn remove_unknown_persons(&mut self, project: &Project) -> Vec<PersonId> {
        let mut unknown: Vec<PersonId> = self
            .seat_to_person
            .values()
            .filter(|id| !id.is_empty() && project.person(id).is_none())
            .cloned()
            .collect();
        unknown.retain(|id| self.remove_person(id) > 0);
        unknown
    }

    pub fn prune_disabled(&mut self, layout: &Layout) {
        self.seat_to_person = prune_disabled_seats(&self.seat_to_person, layout);
    }

    /// Freeze the draft as an adjusted snapshot of `project`.
    pub fn into_assignment(self, project: &Project, now: OffsetDateTime) -> Assignment {
        build_adjusted_assignment(
            project,
            self.seat_to_person,
            self.edits,
            self.base_assignment_id,
            now,
        )
    }
}

/// Copy of `seat_to_person` without the layout's disabled seats.
pub fn prune_disabled_seats(seat_to_person: &SeatToPersonMap, layout: &Layout) -> SeatToPersonMap {
    seat_to_person
        .iter()
        .filter(|(seat, _)| !layout.is_disabled(seat))
        .map(|(seat, person_id)| (seat.clone(), person_id.clone()))
        .collect()
}
