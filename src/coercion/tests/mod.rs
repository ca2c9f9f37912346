//! Behavioural tests for the coercion engine
//!
//! Grid-shaped and values-only cells are exercised against every target type.

pub mod scalar_cell_tests;
pub mod time_tests;
