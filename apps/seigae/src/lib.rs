//! Seat assignment: project modelling, constrained generation, manual
//! adjustment and staged reveal, persisted to a local JSON store.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;

pub use errors::{DomainError, ErrorCode};
