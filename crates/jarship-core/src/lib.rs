//! Core data types for jarship.
//!
//! This crate defines the configuration records a publish run is driven by
//! (`Jarship.toml`, the user-level `~/.jarship/config.toml`, `.jarship.env`
//! secrets) and the version classifier that decides between the snapshot and
//! release repositories.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod manifest;
pub mod properties;
pub mod version;
