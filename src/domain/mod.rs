//! Domain types used throughout the solver.
//!
//! This module defines:
//!
//! - the caller-supplied request (`ProfileRequest`)
//! - sampled curves and merge points (`Curve`, `MergePoint`)
//! - solver outputs (`MergedProfile`, `NondimSummary`)

pub mod types;

pub use types::*;
