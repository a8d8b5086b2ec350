//! Repository seam between the services and whatever holds the data.
//!
//! Lookups return `Ok(None)` for unknown ids; turning that into a not-found
//! error is the caller's decision. Lists come back newest first.

use uuid::Uuid;

use crate::domain::assignment::Assignment;
use crate::domain::project::Project;
use crate::domain::reveal::RevealSession;
use crate::errors::domain::DomainError;

pub trait SeatingStore: Send + Sync {
    /// All projects, most recently updated first.
    fn list_projects(&self) -> Result<Vec<Project>, DomainError>;
    fn get_project(&self, id: Uuid) -> Result<Option<Project>, DomainError>;
    /// Insert or replace by id.
    fn save_project(&self, project: &Project) -> Result<(), DomainError>;
    /// Remove a project with its assignments and reveal sessions, in one step.
    /// Returns whether the project existed.
    fn delete_project(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Assignments of one project, most recently created first.
    fn list_assignments(&self, project_id: Uuid) -> Result<Vec<Assignment>, DomainError>;
    fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>, DomainError>;
    fn save_assignment(&self, assignment: &Assignment) -> Result<(), DomainError>;

    /// Reveal sessions of one project, most recently started first.
    fn list_reveal_sessions(&self, project_id: Uuid) -> Result<Vec<RevealSession>, DomainError>;
    fn list_reveal_sessions_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<RevealSession>, DomainError>;
    fn get_reveal_session(&self, id: Uuid) -> Result<Option<RevealSession>, DomainError>;
    fn save_reveal_session(&self, session: &RevealSession) -> Result<(), DomainError>;
}
