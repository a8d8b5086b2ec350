//! Whole-store snapshot shared by the adapters.
//!
//! The memory store keeps one behind a lock; the JSON store reads one from
//! disk, applies a change and writes it back.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::assignment::Assignment;
use crate::domain::project::Project;
use crate::domain::reveal::RevealSession;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    #[serde(default)]
    pub projects: BTreeMap<Uuid, Project>,
    #[serde(default)]
    pub assignments: BTreeMap<Uuid, Assignment>,
    #[serde(default)]
    pub reveal_sessions: BTreeMap<Uuid, RevealSession>,
}

impl StoreDocument {
    pub fn list_projects(&self) -> Vec<Project> {
        let mut out: Vec<Project> = self.projects.values().cloned().collect();
        out.sort_by_key(|p| Reverse(p.updated_at));
        out
    }

    pub fn list_assignments(&self, project_id: Uuid) -> Vec<Assignment> {
        let mut out: Vec<Assignment> = self
            .assignments
            .values()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect();
        out.sort_by_key(|a| Reverse(a.created_at));
        out
    }

    pub fn list_reveal_sessions<F>(&self, keep: F) -> Vec<RevealSession>
    where
        F: Fn(&RevealSession) -> bool,
    {
        let mut out: Vec<RevealSession> = self
            .reveal_sessions
            .values()
            .filter(|s| keep(s))
            .cloned()
            .collect();
        out.sort_by_key(|s| Reverse(s.started_at));
        out
    }

    /// Drops the project and everything hanging off it.
    pub fn delete_project(&mut self, id: Uuid) -> bool {
        let existed = self.projects.remove(&id).is_some();
        self.assignments.retain(|_, a| a.project_id != id);
        self.reveal_sessions.retain(|_, s| s.project_id != id);
        existed
    }
}
