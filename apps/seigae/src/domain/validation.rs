//! Constraint validation of a seat → person mapping against a project.
//!
//! Violations are reported as data, never as errors. Categories are evaluated
//! one after another in a fixed order so the output is stable:
//!
//! 1. `DISABLED_SEAT_USED`  occupied seat outside the grid or disabled
//! 2. `FIXED_SEAT_BROKEN`   an active person's fixed seat does not hold them
//! 3. `DUPLICATE_PERSON`    one person id in two or more seats
//! 4. `UNASSIGNED_PERSON`   an active person with no seat
//! 5. `NOT_ADJACENT`        two separated persons sit next to each other
//!
//! Within a category the order follows map iteration (row-major seats) or the
//! project's person/rule order.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::project::{Project, Rule};
use super::seat::{is_adjacent_seat, is_seat_inside_layout, SeatKey, SeatToPersonMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    DisabledSeatUsed,
    FixedSeatBroken,
    NotAdjacent,
    DuplicatePerson,
    UnassignedPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Hard,
    /// Reserved; nothing emits soft violations yet.
    Soft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub detail: BTreeMap<String, String>,
}

impl Violation {
    fn hard<const N: usize>(
        kind: ViolationKind,
        message: String,
        detail: [(&str, String); N],
    ) -> Self {
        Self {
            kind,
            severity: Severity::Hard,
            message,
            detail: detail
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[inline]
    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }
}

/// Number of HARD violations in `violations`.
pub fn hard_violation_count(violations: &[Violation]) -> usize {
    violations.iter().filter(|v| v.is_hard()).count()
}

/// Occupied entries only; an empty person id counts as an empty seat.
fn occupied(seat_to_person: &SeatToPersonMap) -> impl Iterator<Item = (&SeatKey, &str)> {
    seat_to_person
        .iter()
        .filter(|(_, person_id)| !person_id.is_empty())
        .map(|(seat, person_id)| (seat, person_id.as_str()))
}

/// Seats held by each person, in map iteration order.
fn person_to_seats(seat_to_person: &SeatToPersonMap) -> BTreeMap<&str, Vec<&SeatKey>> {
    let mut map: BTreeMap<&str, Vec<&SeatKey>> = BTreeMap::new();
    for (seat, person_id) in occupied(seat_to_person) {
        map.entry(person_id).or_default().push(seat);
    }
    map
}

/// Check `seat_to_person` against every rule of `project`.
///
/// Absent persons are invisible to all checks. Rules that reference persons
/// missing from the project are tolerated: a missing person is never active,
/// so their rules are skipped.
pub fn validate_assignment(project: &Project, seat_to_person: &SeatToPersonMap) -> Vec<Violation> {
    let mut violations = Vec::new();
    let active: HashSet<&str> = project.active_persons().map(|p| p.id.as_str()).collect();
    let seats_by_person = person_to_seats(seat_to_person);

    check_disabled_seats(project, seat_to_person, &mut violations);
    check_fixed_seats(project, seat_to_person, &active, &mut violations);
    check_duplicates(&seats_by_person, &mut violations);
    check_unassigned(project, &seats_by_person, &mut violations);
    check_separations(project, &active, &seats_by_person, &mut violations);

    violations
}

fn check_disabled_seats(
    project: &Project,
    seat_to_person: &SeatToPersonMap,
    out: &mut Vec<Violation>,
) {
    let layout = &project.layout;
    for (seat, person_id) in occupied(seat_to_person) {
        if is_seat_inside_layout(layout, seat) && !layout.is_disabled(seat) {
            continue;
        }
        out.push(Violation::hard(
            ViolationKind::DisabledSeatUsed,
            format!("{person_id} is assigned to disabled seat {seat}."),
            [("seat", seat.to_string()), ("personId", person_id.to_string())],
        ));
    }
}

fn check_fixed_seats(
    project: &Project,
    seat_to_person: &SeatToPersonMap,
    active: &HashSet<&str>,
    out: &mut Vec<Violation>,
) {
    for rule in &project.rules {
        let Rule::FixedSeat {
            person_id, seat, ..
        } = rule
        else {
            continue;
        };
        if !active.contains(person_id.as_str()) {
            continue;
        }
        if seat_to_person.get(seat) == Some(person_id) {
            continue;
        }
        out.push(Violation::hard(
            ViolationKind::FixedSeatBroken,
            format!("Fixed seat broken: {person_id} must sit at {seat}."),
            [("personId", person_id.clone()), ("seat", seat.to_string())],
        ));
    }
}

fn check_duplicates(seats_by_person: &BTreeMap<&str, Vec<&SeatKey>>, out: &mut Vec<Violation>) {
    for (person_id, seats) in seats_by_person {
        if seats.len() <= 1 {
            continue;
        }
        let joined = seats
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");
        out.push(Violation::hard(
            ViolationKind::DuplicatePerson,
            format!("{person_id} is assigned to more than one seat."),
            [("personId", person_id.to_string()), ("seats", joined)],
        ));
    }
}

fn check_unassigned(
    project: &Project,
    seats_by_person: &BTreeMap<&str, Vec<&SeatKey>>,
    out: &mut Vec<Violation>,
) {
    // Person order, de-duplicated in case the project lists an id twice.
    let mut seen = HashSet::new();
    for person in project.active_persons() {
        if !seen.insert(person.id.as_str()) {
            continue;
        }
        if seats_by_person.contains_key(person.id.as_str()) {
            continue;
        }
        out.push(Violation::hard(
            ViolationKind::UnassignedPerson,
            format!("{} is not assigned to any seat.", person.id),
            [("personId", person.id.clone())],
        ));
    }
}

fn check_separations(
    project: &Project,
    active: &HashSet<&str>,
    seats_by_person: &BTreeMap<&str, Vec<&SeatKey>>,
    out: &mut Vec<Violation>,
) {
    for rule in &project.rules {
        match rule {
            Rule::Separate {
                person_a_id,
                person_b_id,
                ..
            } => {
                if !active.contains(person_a_id.as_str()) || !active.contains(person_b_id.as_str())
                {
                    continue;
                }
                // First seat only; a duplicated person is already reported above.
                let first_seat =
                    |id: &str| seats_by_person.get(id).and_then(|s| s.first().copied());
                let (Some(seat_a), Some(seat_b)) = (
                    first_seat(person_a_id.as_str()),
                    first_seat(person_b_id.as_str()),
                ) else {
                    continue;
                };
                if !is_adjacent_seat(seat_a, seat_b) {
                    continue;
                }
                out.push(Violation::hard(
                    ViolationKind::NotAdjacent,
                    format!("{person_a_id} and {person_b_id} are sitting next to each other."),
                    [
                        ("personAId", person_a_id.clone()),
                        ("personBId", person_b_id.clone()),
                        ("seatA", seat_a.to_string()),
                        ("seatB", seat_b.to_string()),
                    ],
                ));
            }
            // Not evaluated here: fixed seats have their own pass and the
            // "avoid same seat as last time" preference is not implemented.
            Rule::FixedSeat { .. } | Rule::AvoidSameSeatFromLast { .. } => {}
        }
    }
}
