//! Wind profile models.
//!
//! - `er11`: closed-form inner-core profile (Emanuel & Rotunno 2011)
//! - `e04`: nondimensional outer profile (Emanuel 2004)
//! - `pressure`: gradient-wind pressure for a finished profile

pub mod e04;
pub mod er11;
pub mod model;
pub mod pressure;

pub use e04::*;
pub use er11::*;
pub use model::*;
pub use pressure::*;
