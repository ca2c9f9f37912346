//! Cell value coercion engine.
//!
//! Turns ambiguously-typed spreadsheet cells into exactly one of the four
//! declared logical types, or into an explicit absence:
//! - [`time`]: timestamp parsing from display text and serial day numbers
//! - [`coercer`]: per-type resolution rules and the [`Coercer`] front end
//! - [`diagnostics`]: sinks receiving one report per absent field

pub mod coercer;
pub mod diagnostics;
pub mod time;

#[cfg(test)]
mod tests;

pub use coercer::{Coercer, coerce_cell};
pub use diagnostics::{CoercionFailure, CollectingSink, DiagnosticSink, FailureReason, TracingSink};
pub use time::{parse_by_serial, parse_by_text, resolve_time_zone};
