//! Single-file JSON store.
//!
//! Every operation takes an exclusive OS lock on `<path>.lock`, loads the
//! whole document, and for writes replaces the file via a temp file and
//! rename. Readers in other processes therefore see either the old or the new
//! document, never a torn one.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::document::StoreDocument;
use crate::domain::assignment::Assignment;
use crate::domain::project::Project;
use crate::domain::reveal::RevealSession;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::SeatingStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

/// Held for the duration of one store operation.
struct FileLockGuard {
    file: File,
}

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(error = %e, "failed to release store lock");
        }
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

impl JsonFileStore {
    /// No I/O happens until the first operation; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = sidecar(&path, ".lock");
        Self { path, lock_path }
    }

    fn lock(&self) -> Result<FileLockGuard, DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.lock_path)?;
        file.lock_exclusive().map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Io,
                format!("failed to lock {}: {e}", self.lock_path.display()),
            )
        })?;
        Ok(FileLockGuard { file })
    }

    fn load(&self) -> Result<StoreDocument, DomainError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file missing, starting empty");
                return Ok(StoreDocument::default());
            }
            Err(e) => return Err(e.into()),
        };
        let document = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            let err = DomainError::from(e);
            warn!(path = %self.path.display(), error = %err, "store file unreadable");
            err
        })?;
        Ok(document)
    }

    fn store(&self, document: &StoreDocument) -> Result<(), DomainError> {
        let tmp_path = sidecar(&self.path, ".tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        debug!(
            path = %self.path.display(),
            projects = document.projects.len(),
            assignments = document.assignments.len(),
            reveal_sessions = document.reveal_sessions.len(),
            "store written"
        );
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&StoreDocument) -> T) -> Result<T, DomainError> {
        let _guard = self.lock()?;
        let document = self.load()?;
        Ok(f(&document))
    }

    fn update<T>(&self, f: impl FnOnce(&mut StoreDocument) -> T) -> Result<T, DomainError> {
        let _guard = self.lock()?;
        let mut document = self.load()?;
        let out = f(&mut document);
        self.store(&document)?;
        Ok(out)
    }
}

impl SeatingStore for JsonFileStore {
    fn list_projects(&self) -> Result<Vec<Project>, DomainError> {
        self.read(StoreDocument::list_projects)
    }

    fn get_project(&self, id: Uuid) -> Result<Option<Project>, DomainError> {
        self.read(|d| d.projects.get(&id).cloned())
    }

    fn save_project(&self, project: &Project) -> Result<(), DomainError> {
        self.update(|d| {
            d.projects.insert(project.id, project.clone());
        })
    }

    fn delete_project(&self, id: Uuid) -> Result<bool, DomainError> {
        self.update(|d| d.delete_project(id))
    }

    fn list_assignments(&self, project_id: Uuid) -> Result<Vec<Assignment>, DomainError> {
        self.read(|d| d.list_assignments(project_id))
    }

    fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>, DomainError> {
        self.read(|d| d.assignments.get(&id).cloned())
    }

    fn save_assignment(&self, assignment: &Assignment) -> Result<(), DomainError> {
        self.update(|d| {
            d.assignments.insert(assignment.id, assignment.clone());
        })
    }

    fn list_reveal_sessions(&self, project_id: Uuid) -> Result<Vec<RevealSession>, DomainError> {
        self.read(|d| d.list_reveal_sessions(|s| s.project_id == project_id))
    }

    fn list_reveal_sessions_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> Result<Vec<RevealSession>, DomainError> {
        self.read(|d| d.list_reveal_sessions(|s| s.assignment_id == assignment_id))
    }

    fn get_reveal_session(&self, id: Uuid) -> Result<Option<RevealSession>, DomainError> {
        self.read(|d| d.reveal_sessions.get(&id).cloned())
    }

    fn save_reveal_session(&self, session: &RevealSession) -> Result<(), DomainError> {
        self.update(|d| {
            d.reveal_sessions.insert(session.id, session.clone());
        })
    }
}
