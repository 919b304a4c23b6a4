//! Command construction and execution for the Jujutsu (`jj`) CLI
//!
//! This crate is the layer between typed operation requests and the `jj`
//! binary:
//!
//! ```text
//! [ operation (typed arguments) ]
//!        | builds
//!        v
//! [ CommandLine (argv vector) ] --encode--> [ shell script (shell mode only) ]
//!        | runs in a working directory
//!        v
//! [ CommandRunner / JjExecutor ] --> [ ExecutionResult (stdout, stderr, failure) ]
//! ```
//!
//! # Modules
//!
//! - [`command`] - [`CommandLine`] argument-vector builder
//! - [`encode`] - canonical quoting and the base64 text encoding for shell mode
//! - [`executor`] - the [`CommandRunner`] seam and the production [`JjExecutor`]

pub mod command;
pub mod encode;
pub mod error;
pub mod executor;

pub use command::{Arg, CommandLine};
pub use encode::{EncodedText, quote};
pub use error::{Error, Result};
pub use executor::{CommandRunner, ExecMode, ExecutionResult, ExecutorConfig, JjExecutor};
