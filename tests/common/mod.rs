//! Common test utilities for safedeploy CLI and property tests.
//!
//! - `TestEnv`: isolated working directory, deployment root and HOME
//! - Assertion macros: `assert_file_content!`, `assert_absent!`

pub mod assertions;
pub mod env;

#[allow(unused_imports)]
pub use assertions::*;
pub use env::*;
