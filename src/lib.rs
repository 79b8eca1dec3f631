//! Sine and cosine by truncated Taylor series, and what happens to a line traced with them.
//!
//! [`taylor`] holds the series, [`tracer`] walks a segment with them and reports how far from
//! the endpoint it stopped, and [`sweep`] repeats that for increasing term counts.

pub mod canvas;
pub mod constants;
pub mod error;
pub mod error_log;
pub mod raster;
pub mod shapes;
pub mod sweep;
pub mod taylor;
pub mod tracer;

pub use error::TraceError;
