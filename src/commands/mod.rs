//! # CLI Command Implementations
//!
//! Each subcommand lives in its own file with an `Args` struct derived with
//! `clap` and an `execute` function that calls into the `enterprise_roster`
//! library.

pub mod completions;
pub mod report;
