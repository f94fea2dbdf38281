//! Shared helpers for the integration tests
//!
//! Fixtures build rosters, in-memory adapters and CSV files; assertions hold
//! the model invariants and output predicates; workspace sets up an isolated
//! directory for driving the binary.

pub mod assertions;
pub mod fixtures;
pub mod workspace;
