//! Merged-profile solver.
//!
//! - `options`: tolerances, brackets and caps
//! - `exchange`: `Ck/Cd` resolution
//! - `units`: angular momentum and frame conversions
//! - `merge`: inner search for `r0` and the merge point
//! - `assemble`: splice and resample the final profile
//! - `eye`: optional eye flattening
//! - `solve`: outer search, escalation and batch solving

pub mod assemble;
pub mod exchange;
pub mod eye;
pub mod merge;
pub mod options;
pub mod solve;
pub mod units;

pub use assemble::*;
pub use exchange::*;
pub use eye::*;
pub use merge::*;
pub use options::*;
pub use solve::*;
pub use units::*;
