//! Harvester (workspace facade crate).
//!
//! Re-exports the workspace crates as `harvester::{core,ffi,input,term,types}`
//! and hosts the pieces shared by the binary and the integration tests:
//! environment configuration, log setup and the scripted simulator.

pub use harvester_core as core;
pub use harvester_ffi as ffi;
pub use harvester_input as input;
pub use harvester_term as term;
pub use harvester_types as types;

pub mod config;
pub mod logging;
pub mod sim;
