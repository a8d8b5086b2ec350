//! Error codes for seigae.
//!
//! All codes are SCREAMING_SNAKE_CASE and are what the CLI prints on failure.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Generation
    /// Active persons exceed assignable seats
    CapacityExceeded,

    // Request Validation
    InvalidSeat,
    SeatOutsideLayout,
    SeatDisabled,
    EmptyName,
    SamePerson,
    DuplicateRule,
    RevealInProgress,
    /// General validation error
    ValidationError,

    // Resource Not Found
    ProjectNotFound,
    AssignmentNotFound,
    RevealSessionNotFound,
    PersonNotFound,
    RuleNotFound,

    // System Errors
    IoError,
    SerializationError,
    DataCorruption,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",

            Self::InvalidSeat => "INVALID_SEAT",
            Self::SeatOutsideLayout => "SEAT_OUTSIDE_LAYOUT",
            Self::SeatDisabled => "SEAT_DISABLED",
            Self::EmptyName => "EMPTY_NAME",
            Self::SamePerson => "SAME_PERSON",
            Self::DuplicateRule => "DUPLICATE_RULE",
            Self::RevealInProgress => "REVEAL_IN_PROGRESS",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::RevealSessionNotFound => "REVEAL_SESSION_NOT_FOUND",
            Self::PersonNotFound => "PERSON_NOT_FOUND",
            Self::RuleNotFound => "RULE_NOT_FOUND",

            Self::IoError => "IO_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
