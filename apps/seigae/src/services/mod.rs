//! Use-case services: domain calls glued to a store, with logging.

pub mod seating;

pub use seating::SeatingService;
