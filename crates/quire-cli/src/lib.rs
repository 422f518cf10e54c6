//! Quire CLI library
//!
//! Argument definitions, configuration context and command implementations
//! for the `quire` binary.

pub mod cli;
pub mod commands;
pub mod context;
pub mod output;
