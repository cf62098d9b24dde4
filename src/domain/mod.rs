//! Domain types used throughout the service.
//!
//! This module defines:
//!
//! - the wire values (`Point`, `FitRequest`, `FitResult`)
//! - the model selector (`RegressionType`)
//! - run configuration for the server and the remote client

pub mod types;

pub use types::*;
