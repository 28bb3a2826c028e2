//! Lifecycle and eligibility engine for campus internship placements.
//!
//! The crate is organized around a single authoritative [`workflows::placement`]
//! module: identities and roles, the opportunity and application state machines,
//! the pluggable eligibility policy, and the engine through which every mutation
//! passes. The [`workflows::roster`] module ingests CSV seed rosters, and the
//! binary in `main.rs` drives seeding and reporting from the command line.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
