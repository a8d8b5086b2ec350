//! Seating service: the operations the CLI (or any other front end) calls.
//!
//! Each method loads what it needs from the store, runs the pure domain
//! function and persists the outcome. Randomness comes from one generator
//! behind a mutex so a seeded service replays identically.

mod assignments;
mod projects;
mod reveal;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::assignment::Assignment;
use crate::domain::generator::GenerateOptions;
use crate::domain::project::Project;
use crate::domain::reveal::RevealSession;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::SeatingStore;

pub struct SeatingService<S> {
    store: S,
    rng: Mutex<ChaCha8Rng>,
    options: GenerateOptions,
}

impl<S: SeatingStore> SeatingService<S> {
    /// `seed`: `Some` for reproducible runs, `None` to seed from the OS.
    pub fn new(store: S, seed: Option<u64>, options: GenerateOptions) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            store,
            rng: Mutex::new(rng),
            options,
        }
    }

    pub fn from_settings(store: S, settings: &Settings) -> Self {
        Self::new(
            store,
            settings.seed,
            GenerateOptions {
                max_retries: settings.max_retries,
            },
        )
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn require_project(&self, id: Uuid) -> Result<Project, DomainError> {
        self.store
            .get_project(id)?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Project, id.to_string()))
    }

    fn require_assignment(&self, id: Uuid) -> Result<Assignment, DomainError> {
        self.store
            .get_assignment(id)?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Assignment, id.to_string()))
    }

    fn require_reveal_session(&self, id: Uuid) -> Result<RevealSession, DomainError> {
        self.store
            .get_reveal_session(id)?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::RevealSession, id.to_string()))
    }
}

/// Gets the current UTC time
fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
