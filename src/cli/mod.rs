//! cli/mod.rs
//! Command-line front end.
//!
//! Flow of one invocation:
//!   args -> config (file + flag overrides) -> validate inputs
//!   -> background batch with progress on stderr -> sinks
//!
//! The batch stops between files once its cancel token is set.

mod args;
mod run;
mod validate;

pub use args::Args;
pub use run::{Summary, run, run_with_cancel};
pub use validate::{Inputs, ValidationFailure, validate_inputs};
