use std::ops::ControlFlow;
use std::time::Duration;

use seigae::domain::reveal::{RevealEvent, RevealMode, RevealState};
use seigae::{DomainError, ErrorCode};
use uuid::Uuid;

use crate::support::seating::{classroom, memory_service, memory_service_with_seed, seat};

#[test]
fn block_reveal_steps_in_seat_order() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let assignment = service.generate_assignment(room.project.id)?;
    let expected: Vec<String> = assignment.seat_to_person.values().cloned().collect();

    let session = service.start_reveal(assignment.id, RevealMode::Block)?;
    assert_eq!(session.state, RevealState::Revealing);
    assert_eq!(session.order, expected);
    assert_eq!(session.project_id, room.project.id);

    let mut last = session;
    for _ in 0..expected.len() {
        last = service.advance_reveal(last.id)?;
    }
    assert_eq!(last.state, RevealState::Finished);
    assert_eq!(last.revealed_person_ids, expected);
    assert_eq!(service.get_reveal_session(last.id)?, last);
    Ok(())
}

#[test]
fn reveal_all_is_finished_immediately() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let assignment = service.generate_assignment(room.project.id)?;

    let session = service.start_reveal(assignment.id, RevealMode::RevealAll)?;
    assert_eq!(session.state, RevealState::Finished);
    assert_eq!(session.revealed_person_ids.len(), 4);
    assert_eq!(session.revealed_person_ids[0], room.alice);
    Ok(())
}

#[test]
fn roulette_order_is_seeded() -> Result<(), DomainError> {
    let order_names = |seed: u64| -> Result<Vec<String>, DomainError> {
        let service = memory_service_with_seed(seed);
        let room = classroom(&service)?;
        let assignment = service.generate_assignment(room.project.id)?;
        let session = service.start_reveal(assignment.id, RevealMode::Roulette)?;
        Ok(session
            .order
            .iter()
            .filter_map(|id| room.project.person(id).map(|p| p.name.clone()))
            .collect())
    };
    let first = order_names(3)?;
    assert_eq!(first.len(), 4);
    assert_eq!(first, order_names(3)?);
    Ok(())
}

#[test]
fn pause_and_resume_through_events() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let assignment = service.generate_assignment(room.project.id)?;
    let session = service.start_reveal(assignment.id, RevealMode::Block)?;

    let s = service.advance_reveal(session.id)?;
    let paused = service.pause_reveal(s.id)?;
    assert_eq!(paused.state, RevealState::Paused);

    let unchanged = service.apply_reveal(s.id, RevealEvent::Advance)?;
    assert_eq!(unchanged, paused);

    let resumed = service.resume_reveal(s.id)?;
    assert_eq!(resumed.state, RevealState::Revealing);
    assert_eq!(resumed.revealed_person_ids.len(), 1);

    let done = service.finish_reveal(s.id)?;
    assert_eq!(done.revealed_person_ids, done.order);
    Ok(())
}

#[test]
fn play_runs_to_the_end_and_reports_each_step() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let assignment = service.generate_assignment(room.project.id)?;
    let session = service.start_reveal(assignment.id, RevealMode::Block)?;

    let mut seen = Vec::new();
    let done = service.play_reveal(session.id, Duration::ZERO, |s| {
        seen.push(s.last_revealed().map(str::to_owned));
        ControlFlow::Continue(())
    })?;

    assert_eq!(done.state, RevealState::Finished);
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0].as_deref(), Some(room.alice.as_str()));
    assert_eq!(done.revealed_person_ids.len(), 4);
    Ok(())
}

#[test]
fn play_stops_when_the_step_callback_breaks() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let assignment = service.generate_assignment(room.project.id)?;
    let session = service.start_reveal(assignment.id, RevealMode::Block)?;

    let mut steps = 0;
    let out = service.play_reveal(session.id, Duration::ZERO, |_| {
        steps += 1;
        if steps == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    assert_eq!(steps, 2);
    assert_eq!(out.state, RevealState::Revealing);
    assert_eq!(out.revealed_person_ids.len(), 2);
    assert_eq!(service.get_reveal_session(session.id)?, out);
    Ok(())
}

#[test]
fn play_on_a_paused_session_does_nothing() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let assignment = service.generate_assignment(room.project.id)?;
    let session = service.start_reveal(assignment.id, RevealMode::Block)?;
    let paused = service.pause_reveal(session.id)?;

    let mut steps = 0;
    let out = service.play_reveal(session.id, Duration::ZERO, |_| {
        steps += 1;
        ControlFlow::Continue(())
    })?;
    assert_eq!(steps, 0);
    assert_eq!(out, paused);
    Ok(())
}

#[test]
fn sessions_list_per_project() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let other = service.create_project("other")?;
    let assignment = service.generate_assignment(room.project.id)?;
    service.start_reveal(assignment.id, RevealMode::Block)?;
    service.start_reveal(assignment.id, RevealMode::RevealAll)?;

    assert_eq!(service.list_reveal_sessions(room.project.id)?.len(), 2);
    assert!(service.list_reveal_sessions(other.id)?.is_empty());
    Ok(())
}

#[test]
fn reveal_of_an_empty_assignment_finishes_on_first_step() -> Result<(), DomainError> {
    let service = memory_service();
    let room = classroom(&service)?;
    let empty = service.save_adjusted_assignment(
        room.project.id,
        [(seat("r2c2"), String::new())].into_iter().collect(),
        Vec::new(),
        None,
    )?;

    let session = service.start_reveal(empty.id, RevealMode::Block)?;
    assert!(session.order.is_empty());
    let s = service.advance_reveal(session.id)?;
    assert_eq!(s.state, RevealState::Finished);
    Ok(())
}

#[test]
fn unknown_session_and_assignment_are_not_found() {
    let service = memory_service();
    assert_eq!(
        service.advance_reveal(Uuid::new_v4()).unwrap_err().code(),
        ErrorCode::RevealSessionNotFound
    );
    assert_eq!(
        service
            .start_reveal(Uuid::new_v4(), RevealMode::Roulette)
            .unwrap_err()
            .code(),
        ErrorCode::AssignmentNotFound
    );
}
