//! Randomized seat assignment with bounded retries.
//!
//! Fixed seats are pinned first; everyone else is dealt onto the remaining
//! assignable seats by shuffling both pools and zipping them. Each candidate
//! is validated, and the first one without HARD violations wins. When the
//! retry budget runs out the least-bad candidate seen is returned instead, so
//! the operator can inspect and fix it by hand.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use super::project::{PersonId, Project, Rule};
use super::seat::{list_assignable_seats, SeatKey, SeatToPersonMap};
use super::shuffle::shuffled;
use super::validation::{hard_violation_count, validate_assignment, Violation};
use crate::errors::domain::DomainError;

pub const DEFAULT_MAX_RETRIES: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Upper bound on shuffled candidates to try.
    pub max_retries: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub seat_to_person: SeatToPersonMap,
    pub violations: Vec<Violation>,
    /// 1-based index of the attempt that produced this result; 0 if none ran.
    pub attempts: u32,
}

impl GenerateResult {
    fn empty() -> Self {
        Self {
            seat_to_person: SeatToPersonMap::new(),
            violations: Vec::new(),
            attempts: 0,
        }
    }
}

/// Pinned seat → person mapping from the fixed seat rules of active persons.
///
/// A later rule for the same seat overwrites an earlier one; every pinned
/// person is withheld from the random pool either way.
fn place_fixed_seats(
    project: &Project,
    active: &HashSet<&str>,
) -> (SeatToPersonMap, HashSet<PersonId>) {
    let mut pinned = SeatToPersonMap::new();
    let mut pinned_persons = HashSet::new();
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
        pinned.insert(seat.clone(), person_id.clone());
        pinned_persons.insert(person_id.clone());
    }
    (pinned, pinned_persons)
}

/// Produce a seat → person mapping for every active person of `project`.
///
/// Fails only when active persons outnumber assignable seats; that check runs
/// once, before any attempt. Unsatisfiable rules are not an error: the best
/// candidate is returned with its violations.
pub fn generate_seat_to_person<R: Rng + ?Sized>(
    project: &Project,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<GenerateResult, DomainError> {
    let active_persons: Vec<&str> = project.active_persons().map(|p| p.id.as_str()).collect();
    let assignable_seats = list_assignable_seats(&project.layout);

    if active_persons.len() > assignable_seats.len() {
        return Err(DomainError::capacity(
            active_persons.len(),
            assignable_seats.len(),
        ));
    }

    if options.max_retries == 0 || (active_persons.is_empty() && assignable_seats.is_empty()) {
        return Ok(GenerateResult::empty());
    }

    let active: HashSet<&str> = active_persons.iter().copied().collect();
    let (pinned, pinned_persons) = place_fixed_seats(project, &active);
    let remaining_seats: Vec<SeatKey> = assignable_seats
        .into_iter()
        .filter(|seat| !pinned.contains_key(seat))
        .collect();
    let remaining_persons: Vec<&str> = active_persons
        .into_iter()
        .filter(|id| !pinned_persons.contains(*id))
        .collect();

    let mut best: Option<(usize, GenerateResult)> = None;

    for attempt in 1..=options.max_retries {
        let seats = shuffled(&remaining_seats, rng);
        let persons = shuffled(&remaining_persons, rng);

        let mut seat_to_person = pinned.clone();
        for (seat, person_id) in seats.into_iter().zip(persons) {
            seat_to_person.insert(seat, person_id.to_string());
        }

        let violations = validate_assignment(project, &seat_to_person);
        let hard_count = hard_violation_count(&violations);
        let candidate = GenerateResult {
            seat_to_person,
            violations,
            attempts: attempt,
        };

        if hard_count == 0 {
            return Ok(candidate);
        }

        // Strictly better only: on a tie the earlier candidate stays.
        match &best {
            Some((best_count, _)) if *best_count <= hard_count => {}
            _ => best = Some((hard_count, candidate)),
        }
    }

    Ok(best.map(|(_, result)| result).unwrap_or_else(GenerateResult::empty))
}
