//! `cle-profile` library crate.
//!
//! Merged ER11+E04 tropical-cyclone wind profiles fitted to an outer wind
//! observation. The binary (`cle`) is a thin wrapper around this library so
//! that:
//!
//! - the solver is testable without spawning processes
//! - the model seams can be driven with substitute models
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
pub mod solver;

pub use domain::{MergedProfile, ProfileRequest};
pub use error::ProfileError;
pub use solver::{MergeSolver, SolverOptions};
