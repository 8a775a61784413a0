//! Pinning, bend angle and bubble density comparison figures for minicircle simulations

pub mod columns;
pub mod config;
pub mod error;
pub mod figure;
pub mod pdf;
pub mod pipeline;
pub mod prepare;
pub mod stats;
pub mod types;
