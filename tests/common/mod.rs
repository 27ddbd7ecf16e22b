//! Common test utilities for Fractal CLI and registry tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and home directories plus a fake bundler
//! - Assertion macros: `assert_built!`, `assert_output_contains!`
//! - Fixtures: reusable package and component sources

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;
pub mod registry;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
pub use registry::*;
