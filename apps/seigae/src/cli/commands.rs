use std::fs;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::args::{
    AssignmentCommand, Cli, Command, LayoutCommand, PersonCommand, ProjectCommand, RevealCommand,
    RuleCommand, SeatCommand,
};
use crate::config::Settings;
use crate::domain::seat::SeatKey;
use crate::domain::validation::hard_violation_count;
use crate::errors::domain::DomainError;
use crate::repos::SeatingStore;
use crate::services::SeatingService;

impl Cli {
    /// Layer command-line overrides on top of environment settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(path) = &self.store {
            settings.store_path = path.clone();
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(max_retries) = self.max_retries {
            settings.max_retries = max_retries;
        }
    }
}

/// Execute one command against the service and write its JSON result to `out`.
pub fn run<S, W>(
    service: &SeatingService<S>,
    settings: &Settings,
    command: Command,
    out: &mut W,
) -> Result<(), DomainError>
where
    S: SeatingStore,
    W: Write,
{
    debug!(command = ?command, "Running command");
    match command {
        Command::Project(cmd) => run_project(service, cmd, out),
        Command::Layout(LayoutCommand::Resize {
            project,
            rows,
            cols,
        }) => {
            let (project, ()) = service.edit_project(project, |p| {
                p.resize_layout(rows, cols);
                Ok(())
            })?;
            emit(out, &project)
        }
        Command::Seat(SeatCommand::Toggle { project, seat }) => {
            let seat = SeatKey::from(seat);
            let (project, disabled) =
                service.edit_project(project, |p| p.toggle_disabled_seat(&seat))?;
            emit(out, &json!({ "seat": seat, "disabled": disabled, "project": project }))
        }
        Command::Person(cmd) => run_person(service, cmd, out),
        Command::Rule(cmd) => run_rule(service, cmd, out),
        Command::Generate { project } => emit(out, &service.generate_assignment(project)?),
        Command::Assignment(cmd) => run_assignment(service, cmd, out),
        Command::Reveal(cmd) => run_reveal(service, settings, cmd, out),
    }
}

fn run_project<S: SeatingStore, W: Write>(
    service: &SeatingService<S>,
    cmd: ProjectCommand,
    out: &mut W,
) -> Result<(), DomainError> {
    match cmd {
        ProjectCommand::Create { name } => emit(out, &service.create_project(&name)?),
        ProjectCommand::List => emit(out, &service.list_projects()?),
        ProjectCommand::Show { project } => emit(out, &service.get_project(project)?),
        ProjectCommand::Rename { project, name } => {
            let (project, ()) = service.edit_project(project, |p| p.rename(&name))?;
            emit(out, &project)
        }
        ProjectCommand::Delete { project } => {
            service.delete_project(project)?;
            emit(out, &json!({ "deleted": project }))
        }
    }
}

fn run_person<S: SeatingStore, W: Write>(
    service: &SeatingService<S>,
    cmd: PersonCommand,
    out: &mut W,
) -> Result<(), DomainError> {
    match cmd {
        PersonCommand::Add { project, name } => {
            let (project, id) = service.edit_project(project, |p| p.add_person(&name))?;
            emit(out, &json!({ "personId": id, "project": project }))
        }
        PersonCommand::Bulk { project, file } => {
            let text = read_input(&file)?;
            let (project, ids) = service.edit_project(project, |p| p.add_persons_bulk(&text))?;
            emit(out, &json!({ "personIds": ids, "project": project }))
        }
        PersonCommand::Absent { project, person } => {
            let (project, absent) = service.edit_project(project, |p| p.toggle_absent(&person))?;
            emit(out, &json!({ "personId": person, "absent": absent, "project": project }))
        }
        PersonCommand::Gender { project, person } => {
            let (project, gender) = service.edit_project(project, |p| p.toggle_gender(&person))?;
            emit(out, &json!({ "personId": person, "gender": gender, "project": project }))
        }
        PersonCommand::Remove { project, person } => {
            let (project, removed) = service.edit_project(project, |p| p.remove_person(&person))?;
            emit(out, &json!({ "removed": removed, "project": project }))
        }
    }
}

fn run_rule<S: SeatingStore, W: Write>(
    service: &SeatingService<S>,
    cmd: RuleCommand,
    out: &mut W,
) -> Result<(), DomainError> {
    match cmd {
        RuleCommand::Fixed {
            project,
            person,
            seat,
        } => {
            let seat = SeatKey::from(seat);
            let (project, id) =
                service.edit_project(project, |p| p.add_fixed_seat_rule(&person, &seat))?;
            emit(out, &json!({ "ruleId": id, "project": project }))
        }
        RuleCommand::Separate {
            project,
            person_a,
            person_b,
        } => {
            let (project, id) =
                service.edit_project(project, |p| p.add_separate_rule(&person_a, &person_b))?;
            emit(out, &json!({ "ruleId": id, "project": project }))
        }
        RuleCommand::Remove { project, rule } => {
            let (project, removed) = service.edit_project(project, |p| p.remove_rule(&rule))?;
            emit(out, &json!({ "removed": removed, "project": project }))
        }
    }
}

fn run_assignment<S: SeatingStore, W: Write>(
    service: &SeatingService<S>,
    cmd: AssignmentCommand,
    out: &mut W,
) -> Result<(), DomainError> {
    match cmd {
        AssignmentCommand::List { project } => emit(out, &service.list_assignments(project)?),
        AssignmentCommand::Show { assignment } => emit(out, &service.get_assignment(assignment)?),
        AssignmentCommand::Validate { assignment } => {
            let stored = service.get_assignment(assignment)?;
            let violations = service.validate_draft(stored.project_id, &stored.seat_to_person)?;
            emit(
                out,
                &json!({
                    "assignmentId": assignment,
                    "hardViolations": hard_violation_count(&violations),
                    "violations": violations,
                }),
            )
        }
        AssignmentCommand::Adjust(args) => {
            let drags: Vec<(SeatKey, SeatKey)> =
                args.drags.into_iter().map(|d| (d.from, d.to)).collect();
            emit(out, &service.adjust_assignment(args.assignment, &drags)?)
        }
    }
}

fn run_reveal<S: SeatingStore, W: Write>(
    service: &SeatingService<S>,
    settings: &Settings,
    cmd: RevealCommand,
    out: &mut W,
) -> Result<(), DomainError> {
    match cmd {
        RevealCommand::Start { assignment, mode } => {
            emit(out, &service.start_reveal(assignment, mode.into())?)
        }
        RevealCommand::Step { session } => emit(out, &service.advance_reveal(session)?),
        RevealCommand::Pause { session } => emit(out, &service.pause_reveal(session)?),
        RevealCommand::Resume { session } => emit(out, &service.resume_reveal(session)?),
        RevealCommand::Finish { session } => emit(out, &service.finish_reveal(session)?),
        RevealCommand::List { project } => emit(out, &service.list_reveal_sessions(project)?),
        RevealCommand::Play { session, tick_ms } => {
            let tick = tick_ms.map_or(settings.reveal_tick, Duration::from_millis);
            let mut write_err = None;
            let done = service.play_reveal(session, tick, |s| {
                let line = json!({ "revealed": s.last_revealed(), "remaining": s.remaining() });
                match writeln!(out, "{line}").and_then(|()| out.flush()) {
                    Ok(()) => ControlFlow::Continue(()),
                    Err(e) => {
                        write_err = Some(e);
                        ControlFlow::Break(())
                    }
                }
            })?;
            if let Some(e) = write_err {
                return Err(e.into());
            }
            emit(out, &done)
        }
    }
}

/// `-` reads stdin.
fn read_input(path: &Path) -> Result<String, DomainError> {
    if path.as_os_str() == "-" {
        Ok(io::read_to_string(io::stdin())?)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), DomainError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
