use parking_lot::RwLock;
use uuid::Uuid;

use super::document::StoreDocument;
use crate::domain::assignment::Assignment;
use crate::domain::project::Project;
use crate::domain::reveal::RevealSession;
use crate::errors::domain::DomainError;
use crate::repos::SeatingStore;

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeatingStore for MemoryStore {
    fn list_projects(&self) -> Result<Vec<Project>, DomainError> {
        Ok(self.inner.read().list_projects())
    }

    fn get_project(&self, id: Uuid) -> Result<Option<Project>, DomainError> {
        Ok(self.inner.read().projects.get(&id).cloned())
    }

    fn save_project(&self, project: &Project) -> Result<(), DomainError> {
        self.inner
            .write()
            .projects
            .insert(project.id, project.clone());
        Ok(())
    }

    fn delete_project(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.inner.write().delete_project(id))
    }

    fn list_assignments(&self, project_id: Uuid) -> Result<Vec<Assignment>, DomainError> {
        Ok(self.inner.read().list_assignments(project_id))
    }

    fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>, DomainError> {
        Ok(self.inner.read().assignments.get(&id).cloned())
    }

    fn save_assignment(&self, assignment: &Assignment) -> Result<(), DomainError> {
        self.inner
            .write()
            .assignments
            .insert(assignment.id, assignment.clone());
        Ok(())
    }

    fn list_reveal_sessions(&self, project_id: Uuid) -> Result<Vec<RevealSession>, DomainError> {
        Ok(self
            .inner
            .read()
            .list_reveal_sessions(|s| s.project_id == project_id))
    }

    fn list_reveal_sessions_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<RevealSession>, DomainError> {
        Ok(self
            .inner
            .read()
            .list_reveal_sessions(|s| s.assignment_id == assignment_id))
    }

    fn get_reveal_session(&self, id: Uuid) -> Result<Option<RevealSession>, DomainError> {
        Ok(self.inner.read().reveal_sessions.get(&id).cloned())
    }

    fn save_reveal_session(&self, session: &RevealSession) -> Result<(), DomainError> {
        self.inner
            .write()
            .reveal_sessions
            .insert(session.id, session.clone());
        Ok(())
    }
}
