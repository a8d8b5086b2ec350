//! Hand-built projects shared by the domain tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use time::OffsetDateTime;

use super::project::{Layout, Person, Project, Rule};
use super::seat::{SeatKey, SeatToPersonMap};

pub const T0: OffsetDateTime = OffsetDateTime::UNIX_EPOCH;

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn project_with(rows: u32, cols: u32, disabled: &[&str], people: &[&str]) -> Project {
    let mut project = Project::new("fixture", T0);
    project.layout = Layout::new(rows, cols);
    project.layout.disabled_seats = disabled.iter().map(|s| SeatKey::from(*s)).collect();
    project.persons = people.iter().map(|id| Person::new(*id, *id)).collect();
    project
}

pub fn fixed(id: &str, person_id: &str, seat: &str) -> Rule {
    Rule::FixedSeat {
        id: id.into(),
        person_id: person_id.into(),
        seat: seat.into(),
    }
}

pub fn separate(id: &str, a: &str, b: &str) -> Rule {
    Rule::Separate {
        id: id.into(),
        person_a_id: a.into(),
        person_b_id: b.into(),
        kind: Default::default(),
    }
}

pub fn seats(entries: &[(&str, &str)]) -> SeatToPersonMap {
    entries
        .iter()
        .map(|(seat, person_id)| (SeatKey::from(*seat), person_id.to_string()))
        .collect()
}

/// 2×2, r2c2 disabled; alice pinned to r1c1 and kept apart from bob.
pub fn small_room() -> Project {
    let mut project = project_with(2, 2, &["r2c2"], &["alice", "bob", "carol"]);
    project.rules = vec![fixed("f1", "alice", "r1c1"), separate("s1", "alice", "bob")];
    project
}

/// 3×3, r3c3 disabled; alice pinned to r1c1, bob and carol apart.
pub fn classroom() -> Project {
    let mut project = project_with(3, 3, &["r3c3"], &["alice", "bob", "carol", "dave"]);
    project.rules = vec![fixed("f1", "alice", "r1c1"), separate("s1", "bob", "carol")];
    project
}
