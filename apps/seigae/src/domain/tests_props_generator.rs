//! Property tests for seat generation (pure domain).
//!
//! Properties tested:
//! - Satisfiable projects come back with zero HARD violations
//! - Every active person is seated once, never on a disabled seat
//! - Fixed seats hold their person
//! - Reported violations always equal a fresh validation of the result
//! - Capacity failure happens exactly when active persons outnumber seats

use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::generator::{generate_seat_to_person, GenerateOptions};
use crate::domain::project::Rule;
use crate::domain::seat::{is_seat_inside_layout, list_assignable_seats};
use crate::domain::test_gens::{messy_project, satisfiable_scenario};
use crate::domain::test_prelude;
use crate::domain::validation::{hard_violation_count, validate_assignment};
use crate::errors::DomainError;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_satisfiable_projects_generate_cleanly(
        scenario in satisfiable_scenario(),
        seed in any::<u64>(),
    ) {
        let project = &scenario.project;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let out = generate_seat_to_person(project, &GenerateOptions { max_retries: 2000 }, &mut rng)
            .unwrap();

        prop_assert_eq!(hard_violation_count(&out.violations), 0, "{:?}", out.violations);

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (seat, person_id) in &out.seat_to_person {
            prop_assert!(is_seat_inside_layout(&project.layout, seat));
            prop_assert!(!project.layout.is_disabled(seat));
            *seen.entry(person_id.as_str()).or_default() += 1;
        }
        for person in project.active_persons() {
            prop_assert_eq!(seen.get(person.id.as_str()).copied(), Some(1));
        }
        for person in project.persons.iter().filter(|p| p.absent) {
            prop_assert!(!seen.contains_key(person.id.as_str()));
        }
        for rule in &project.rules {
            if let Rule::FixedSeat { person_id, seat, .. } = rule {
                if project.person(person_id).is_some_and(|p| p.is_active()) {
                    prop_assert_eq!(out.seat_to_person.get(seat), Some(person_id));
                }
            }
        }
    }

    #[test]
    fn prop_reported_violations_match_validation(
        project in messy_project(),
        seed in any::<u64>(),
        max_retries in 1u32..20,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let out = generate_seat_to_person(&project, &GenerateOptions { max_retries }, &mut rng)
            .unwrap();
        prop_assert!(out.attempts >= 1 && out.attempts <= max_retries);
        prop_assert_eq!(out.violations, validate_assignment(&project, &out.seat_to_person));
    }

    #[test]
    fn prop_capacity_error_iff_too_many_people(
        scenario in satisfiable_scenario(),
        extra in 0usize..3,
        max_retries in 0u32..3,
    ) {
        let mut project = scenario.project;
        for i in 0..extra {
            project.add_person(&format!("extra{i}")).unwrap();
        }
        let active = project.active_persons().count();
        let assignable = list_assignable_seats(&project.layout).len();

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = generate_seat_to_person(&project, &GenerateOptions { max_retries }, &mut rng);
        if active > assignable {
            prop_assert_eq!(result, Err(DomainError::capacity(active, assignable)));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
