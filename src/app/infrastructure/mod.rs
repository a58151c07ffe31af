//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with the host process:
//! - Error types
//! - Logging to stderr
//! - Repository metadata exported by cgit

pub mod error;
pub mod logging;
pub mod repo_env;
