//! Shared test utilities for the jj-mcp workspace.
//!
//! This crate is a dev-dependency only; it is never published.
//!
//! # Modules
//!
//! - [`runner`] - [`RecordingRunner`], a [`jj_command::CommandRunner`] that
//!   records invocations instead of spawning processes
//! - [`fixtures`] - fake `jj` binaries for end-to-end tests

pub mod fixtures;
pub mod runner;

pub use fixtures::fake_jj;
pub use runner::{Call, RecordingRunner};
