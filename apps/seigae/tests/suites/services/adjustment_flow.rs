use seigae::domain::assignment::EditKind;
use seigae::domain::reveal::RevealMode;
use seigae::domain::seat::SeatToPersonMap;
use seigae::domain::validation::ViolationKind;
use seigae::{DomainError, ErrorCode};
use uuid::Uuid;

use crate::support::seating::{classroom, memory_service, seat};

#[test]
fn swap_creates_a_new_snapshot_linked_to_its_base() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let base = service.generate_assignment(room.project.id)?;
    let other_seat = base
        .seat_to_person
        .iter()
        .find(|(_, id)| **id != room.alice)
        .map(|(s, _)| s.clone())
        .expect("someone besides Alice is seated");
    let other = base.seat_to_person[&other_seat].clone();

    let adjusted = service.adjust_assignment(base.id, &[(seat("r1c1"), other_seat.clone())])?;

    assert_ne!(adjusted.id, base.id);
    assert_eq!(adjusted.base_assignment_id, Some(base.id));
    assert_eq!(adjusted.commit.as_deref(), Some("adjusted"));
    assert_eq!(adjusted.seat_to_person.get(&seat("r1c1")), Some(&other));
    assert_eq!(adjusted.seat_to_person.get(&other_seat), Some(&room.alice));
    let edits = adjusted.edits.as_deref().unwrap_or_default();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].kind, EditKind::Swap);
    assert!(adjusted
        .violations
        .iter()
        .any(|v| v.kind == ViolationKind::FixedSeatBroken));

    // The base snapshot is untouched.
    assert_eq!(service.get_assignment(base.id)?, base);
    assert_eq!(service.list_assignments(room.project.id)?.len(), 2);
    Ok(())
}

#[test]
fn move_to_an_empty_seat_is_recorded_as_move() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let base = service.generate_assignment(room.project.id)?;
    let empty = ["r1c2", "r1c3", "r2c1", "r2c2", "r2c3", "r3c1", "r3c2"]
        .into_iter()
        .map(seat)
        .find(|s| !base.seat_to_person.contains_key(s))
        .expect("four enabled seats are free");

    let adjusted = service.adjust_assignment(base.id, &[(seat("r1c1"), empty.clone())])?;
    assert!(!adjusted.seat_to_person.contains_key(&seat("r1c1")));
    assert_eq!(adjusted.seat_to_person.get(&empty), Some(&room.alice));
    assert_eq!(adjusted.edits.as_deref().map(|e| e[0].kind), Some(EditKind::Move));
    Ok(())
}

#[test]
fn ignored_drags_still_save_an_unchanged_snapshot() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let base = service.generate_assignment(room.project.id)?;

    let adjusted = service.adjust_assignment(
        base.id,
        &[(seat("r1c1"), seat("r1c1")), (seat("r1c1"), seat("r3c3"))],
    )?;
    assert_eq!(adjusted.seat_to_person, base.seat_to_person);
    assert_eq!(adjusted.edits.as_deref().map(<[_]>::len), Some(0));
    Ok(())
}

#[test]
fn seats_disabled_after_generation_are_pruned_on_adjust() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let base = service.generate_assignment(room.project.id)?;
    let (victim_seat, victim) = base
        .seat_to_person
        .iter()
        .find(|(_, id)| **id != room.alice)
        .map(|(s, id)| (s.clone(), id.clone()))
        .expect("someone besides Alice is seated");
    service.edit_project(room.project.id, |p| p.toggle_disabled_seat(&victim_seat))?;

    let adjusted = service.adjust_assignment(base.id, &[])?;
    assert!(!adjusted.seat_to_person.contains_key(&victim_seat));
    let unassigned: Vec<&str> = adjusted
        .violations
        .iter()
        .filter(|v| v.kind == ViolationKind::UnassignedPerson)
        .filter_map(|v| v.detail.get("personId").map(String::as_str))
        .collect();
    assert_eq!(unassigned, [victim.as_str()]);
    Ok(())
}

#[test]
fn save_adjusted_requires_existing_base() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let err = service
        .save_adjusted_assignment(
            room.project.id,
            SeatToPersonMap::new(),
            Vec::new(),
            Some(Uuid::new_v4()),
        )
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AssignmentNotFound);

    let standalone = service.save_adjusted_assignment(
        room.project.id,
        SeatToPersonMap::new(),
        Vec::new(),
        None,
    )?;
    assert!(standalone.base_assignment_id.is_none());
    // Alice's pin plus all four unseated.
    assert_eq!(standalone.hard_violation_count(), 5);
    Ok(())
}

#[test]
fn adjusting_is_refused_while_a_reveal_is_running() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let base = service.generate_assignment(room.project.id)?;
    let session = service.start_reveal(base.id, RevealMode::Block)?;

    let err = service.adjust_assignment(base.id, &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RevealInProgress);

    service.pause_reveal(session.id)?;
    let err = service.adjust_assignment(base.id, &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RevealInProgress);

    service.finish_reveal(session.id)?;
    service.adjust_assignment(base.id, &[])?;
    Ok(())
}

#[test]
fn persons_removed_from_the_project_are_dropped_on_adjust() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let base = service.generate_assignment(room.project.id)?;
    assert!(base.seat_to_person.values().any(|id| *id == room.dave));
    service.edit_project(room.project.id, |p| p.remove_person(&room.dave))?;

    let adjusted = service.adjust_assignment(base.id, &[(seat("r9c9"), seat("r9c8"))])?;
    assert!(adjusted.seat_to_person.values().all(|id| *id != room.dave));
    assert_eq!(adjusted.seat_to_person.len(), 3);
    assert!(adjusted.violations.is_empty());

    let session = service.start_reveal(adjusted.id, RevealMode::RevealAll)?;
    assert!(!session.order.contains(&room.dave));
    assert_eq!(session.order.len(), 3);
    Ok(())
}
