use tracing::{debug, info};
use uuid::Uuid;

use super::{now, SeatingService};
use crate::domain::project::Project;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::SeatingStore;

impl<S: SeatingStore> SeatingService<S> {
    /// New empty project with the default 6×6 layout.
    pub fn create_project(&self, name: &str) -> Result<Project, DomainError> {
        let mut project = Project::new(String::new(), now());
        project.rename(name)?;
        self.store.save_project(&project)?;

        info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Persist a caller-edited project, stamping `updated_at`.
    pub fn update_project(&self, mut project: Project) -> Result<Project, DomainError> {
        project.updated_at = now();
        self.store.save_project(&project)?;

        debug!(
            project_id = %project.id,
            persons = project.persons.len(),
            rules = project.rules.len(),
            "Project updated"
        );
        Ok(project)
    }

    /// Load, edit and save a project in one call.
    ///
    /// Nothing is written when `edit` fails.
    pub fn edit_project<T, F>(&self, id: Uuid, edit: F) -> Result<(Project, T), DomainError>
    where
        F: FnOnce(&mut Project) -> Result<T, DomainError>,
    {
        let mut project = self.require_project(id)?;
        let out = edit(&mut project)?;
        let project = self.update_project(project)?;
        Ok((project, out))
    }

    pub fn get_project(&self, id: Uuid) -> Result<Project, DomainError> {
        self.require_project(id)
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, DomainError> {
        self.store.list_projects()
    }

    /// Delete a project together with its assignments and reveal sessions.
    pub fn delete_project(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.store.delete_project(id)? {
            return Err(DomainError::not_found(NotFoundKind::Project, id.to_string()));
        }
        info!(project_id = %id, "Project deleted");
        Ok(())
    }
}
