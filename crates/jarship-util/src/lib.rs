//! Shared utilities for jarship.
//!
//! This crate provides cross-cutting concerns used by all other jarship crates:
//! the publishing error taxonomy, filesystem lookup, checksum hashing,
//! process spawning (for external signers), and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod process;
pub mod progress;
