//! Domain-level error type used across the core, the stores and the services.
//!
//! Constraint breaches are never errors: the validator reports them as data.
//! The only error the seating core raises itself is [`DomainError::Capacity`];
//! the remaining variants come from project editing, storage and configuration.

use thiserror::Error;

use super::error_code::ErrorCode;

/// Validation failures for caller-supplied edits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Seat identifier does not match `r<row>c<col>`
    InvalidSeat,
    /// Seat lies outside the current layout
    SeatOutsideLayout,
    /// Seat is disabled in the current layout
    SeatDisabled,
    /// Person name is empty after trimming
    EmptyName,
    /// A separation rule must name two different persons
    SamePerson,
    /// An equivalent rule already exists
    DuplicateRule,
    /// The assignment is mid-reveal and cannot be adjusted
    RevealInProgress,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Project,
    Assignment,
    RevealSession,
    Person,
    Rule,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Io,
    Serialization,
    DataCorruption,
    Config,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// More active persons than assignable seats; generation is impossible.
    #[error(
        "cannot generate: {active} active persons exceed {assignable} assignable seats"
    )]
    Capacity { active: usize, assignable: usize },
    /// Input validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn capacity(active: usize, assignable: usize) -> Self {
        Self::Capacity { active, assignable }
    }
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Capacity { .. } => ErrorCode::CapacityExceeded,
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidSeat => ErrorCode::InvalidSeat,
                ValidationKind::SeatOutsideLayout => ErrorCode::SeatOutsideLayout,
                ValidationKind::SeatDisabled => ErrorCode::SeatDisabled,
                ValidationKind::EmptyName => ErrorCode::EmptyName,
                ValidationKind::SamePerson => ErrorCode::SamePerson,
                ValidationKind::DuplicateRule => ErrorCode::DuplicateRule,
                ValidationKind::RevealInProgress => ErrorCode::RevealInProgress,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Project => ErrorCode::ProjectNotFound,
                NotFoundKind::Assignment => ErrorCode::AssignmentNotFound,
                NotFoundKind::RevealSession => ErrorCode::RevealSessionNotFound,
                NotFoundKind::Person => ErrorCode::PersonNotFound,
                NotFoundKind::Rule => ErrorCode::RuleNotFound,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Io => ErrorCode::IoError,
                InfraErrorKind::Serialization => ErrorCode::SerializationError,
                InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                InfraErrorKind::Config => ErrorCode::ConfigError,
                InfraErrorKind::Other(_) => ErrorCode::Internal,
            },
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::infra(InfraErrorKind::Io, e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        // Syntax/data errors mean the stored document is unusable; I/O errors stay I/O.
        let kind = if e.is_io() {
            InfraErrorKind::Io
        } else if e.is_syntax() || e.is_data() || e.is_eof() {
            InfraErrorKind::DataCorruption
        } else {
            InfraErrorKind::Serialization
        };
        DomainError::infra(kind, e.to_string())
    }
}
