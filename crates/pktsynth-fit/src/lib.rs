//! Fit/sample core.
//!
//! [`estimate`] turns a record set into a [`FittedModel`](pktsynth_model::FittedModel);
//! [`Sampler`] draws independent synthetic records from it using a
//! caller-supplied random source.
//!
//! ```ignore
//! use pktsynth_fit::{estimate, rng_from_seed, sample};
//!
//! let model = estimate(&records)?;
//! let synthetic = sample(&model, None, &mut rng_from_seed(Some(7)))?;
//! assert_eq!(synthetic.len(), records.len());
//! ```

pub mod accumulator;
pub mod error;
pub mod estimate;
pub mod sample;

pub use accumulator::LengthAccumulator;
pub use error::{FitError, Result};
pub use estimate::estimate;
pub use sample::{Sampler, clamp_length, rng_from_seed, sample};
