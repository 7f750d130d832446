//! Candlemill Pipeline
//!
//! Stage orchestration for the candle feature pipeline: extract klines
//! into raw partitions, transform them into feature partitions, or run
//! both end to end.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod stages;

/// Re-export: pipeline-layer error type.
pub use error::PipelineError;
/// Re-export: extract stage.
pub use stages::extract;
/// Re-export: full extract-then-transform run.
pub use stages::run;
/// Re-export: transform stage.
pub use stages::transform;
