//! Input/output helpers.
//!
//! - request JSON read (`request`)
//! - profile JSON read/write (`profile`)

pub mod profile;
pub mod request;

pub use profile::*;
pub use request::*;
