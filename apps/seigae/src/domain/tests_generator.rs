use crate::domain::fixtures::{classroom, fixed, project_with, rng, separate};
use crate::domain::generator::{generate_seat_to_person, GenerateOptions};
use crate::domain::seat::SeatKey;
use crate::domain::validation::{hard_violation_count, validate_assignment, ViolationKind};
use crate::errors::{DomainError, ErrorCode};

fn retries(max_retries: u32) -> GenerateOptions {
    GenerateOptions { max_retries }
}

#[test]
fn classroom_scenario_seats_everyone_cleanly() {
    let project = classroom();
    for seed in 0..20 {
        let out = generate_seat_to_person(&project, &retries(2000), &mut rng(seed)).unwrap();

        assert_eq!(
            out.seat_to_person.get(&SeatKey::from("r1c1")).map(String::as_str),
            Some("alice"),
            "seed {seed}"
        );
        assert_eq!(hard_violation_count(&out.violations), 0, "seed {seed}");
        assert_eq!(out.seat_to_person.len(), 4);
        assert!(!out.seat_to_person.contains_key(&SeatKey::from("r3c3")));
        assert!(out.attempts >= 1 && out.attempts <= 2000);
    }
}

#[test]
fn capacity_error_is_raised_before_any_attempt() {
    let project = project_with(2, 2, &["r2c2"], &["a", "b", "c", "d"]);
    for max_retries in [0, 1, 500] {
        let err =
            generate_seat_to_person(&project, &retries(max_retries), &mut rng(1)).unwrap_err();
        assert_eq!(err, DomainError::capacity(4, 3));
        assert_eq!(err.code(), ErrorCode::CapacityExceeded);
    }
}

#[test]
fn capacity_message_names_both_counts() {
    let project = project_with(1, 2, &[], &["a", "b", "c"]);
    let err =
        generate_seat_to_person(&project, &GenerateOptions::default(), &mut rng(1)).unwrap_err();
    let message = err.to_string();
    assert!(message.contains('3'), "{message}");
    assert!(message.contains('2'), "{message}");
}

#[test]
fn no_persons_on_open_grid_is_clean_first_attempt() {
    let project = project_with(2, 2, &[], &[]);
    let out = generate_seat_to_person(&project, &GenerateOptions::default(), &mut rng(3)).unwrap();
    assert!(out.seat_to_person.is_empty());
    assert!(out.violations.is_empty());
    assert_eq!(out.attempts, 1);
}

#[test]
fn same_seed_same_result() {
    let project = classroom();
    let a = generate_seat_to_person(&project, &retries(2000), &mut rng(42)).unwrap();
    let b = generate_seat_to_person(&project, &retries(2000), &mut rng(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unsatisfiable_rules_return_best_effort_with_violations() {
    // 1×2: a and b must sit apart but both seats touch.
    let mut project = project_with(1, 2, &[], &["a", "b"]);
    project.rules = vec![separate("s1", "a", "b")];

    let out = generate_seat_to_person(&project, &retries(25), &mut rng(9)).unwrap();
    assert_eq!(out.seat_to_person.len(), 2);
    assert_eq!(out.violations.len(), 1);
    assert_eq!(out.violations[0].kind, ViolationKind::NotAdjacent);
    // Every attempt ties at one violation, so the first one is kept.
    assert_eq!(out.attempts, 1);
}

#[test]
fn pinned_seat_on_disabled_seat_is_reported_not_retried_away() {
    // Pin survives into the mapping even though the seat is disabled.
    let mut project = project_with(2, 2, &["r2c2"], &["a", "b"]);
    project.rules = vec![fixed("f1", "a", "r2c2")];

    let out = generate_seat_to_person(&project, &retries(10), &mut rng(2)).unwrap();
    assert_eq!(
        out.seat_to_person.get(&SeatKey::from("r2c2")).map(String::as_str),
        Some("a")
    );
    assert_eq!(out.violations[0].kind, ViolationKind::DisabledSeatUsed);
    assert_eq!(out.attempts, 1);
}

#[test]
fn later_pin_for_same_seat_overwrites_earlier() {
    let mut project = project_with(2, 2, &[], &["a", "b"]);
    project.rules = vec![fixed("f1", "a", "r1c1"), fixed("f2", "b", "r1c1")];

    let out = generate_seat_to_person(&project, &retries(5), &mut rng(4)).unwrap();
    assert_eq!(
        out.seat_to_person.get(&SeatKey::from("r1c1")).map(String::as_str),
        Some("b")
    );
    // a was withheld from the pool and never seated.
    assert!(out.seat_to_person.values().all(|p| p != "a"));
    let kinds: Vec<ViolationKind> = out.violations.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        [ViolationKind::FixedSeatBroken, ViolationKind::UnassignedPerson]
    );
}

#[test]
fn result_violations_match_a_fresh_validation() {
    let project = classroom();
    let out = generate_seat_to_person(&project, &retries(3), &mut rng(11)).unwrap();
    assert_eq!(out.violations, validate_assignment(&project, &out.seat_to_person));
}
