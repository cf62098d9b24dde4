//! Fitting orchestration.
//!
//! Responsibilities:
//!
//! - validate a request before any numeric work (`validate`)
//! - build the requested regressor (`fitter`)
//! - finalize the shared response envelope (`assemble`)
//! - fit several model kinds over one point set in parallel (`batch`)

pub mod assemble;
pub mod batch;
pub mod fitter;
pub mod validate;

pub use assemble::*;
pub use batch::*;
pub use fitter::*;
pub use validate::*;
