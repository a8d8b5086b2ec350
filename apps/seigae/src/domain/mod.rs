//! Domain layer: pure seating logic. No I/O; time and randomness come from the caller.

pub mod assignment;
pub mod draft;
pub mod generator;
pub mod project;
pub mod reveal;
pub mod seat;
pub mod shuffle;
pub mod validation;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_generator;
#[cfg(test)]
mod tests_props_generator;

// Re-exports for ergonomics
pub use assignment::{
    build_adjusted_assignment, build_generated_assignment, Assignment, AssignmentEdit, EditKind,
};
pub use draft::{prune_disabled_seats, AdjustmentDraft};
pub use generator::{generate_seat_to_person, GenerateOptions, GenerateResult, DEFAULT_MAX_RETRIES};
pub use project::{Gender, Layout, Person, PersonId, Project, Rule, RuleId};
pub use reveal::{
    advance_reveal_step, apply_reveal_event, finish_reveal_session, pause_reveal_session,
    resume_reveal_session, start_reveal_session, RevealEvent, RevealMode, RevealSession,
    RevealState,
};
pub use seat::{
    compare_seat_key, is_adjacent_seat, is_seat_inside_layout, list_all_seats,
    list_assignable_seats, make_seat_key, parse_seat_key, SeatKey, SeatPos, SeatToPersonMap,
};
pub use validation::{hard_violation_count, validate_assignment, Severity, Violation, ViolationKind};
