//! Test support utilities for the seigae workspace.
//!
//! Shared by the library's unit tests and the integration tests so both
//! install the same subscriber exactly once.

pub mod logging;
