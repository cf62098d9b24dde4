//! Input/output helpers.
//!
//! - point set JSON read/write (`points`)
//! - fit result exports (`export`)

pub mod export;
pub mod points;

pub use export::*;
pub use points::*;
