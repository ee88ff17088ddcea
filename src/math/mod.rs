//! Numerical primitives: grids, bisection, curve intersection and PCHIP.

pub mod bisect;
pub mod grid;
pub mod intersect;
pub mod pchip;

pub use bisect::*;
pub use grid::*;
pub use intersect::*;
pub use pchip::*;
