//! Per-iteration case synthesis, one module per harness.

pub mod combine;
pub mod compare;
