//! Pre-computed coverage facts supplied by external tracers.

pub mod coverage_data;

pub use coverage_data::CoverageData;
