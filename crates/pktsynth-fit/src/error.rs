//! Error types for fitting and sampling.

use pktsynth_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FitError {
    /// No valid records to estimate from, or an empty distribution to sample.
    #[error("no data to model: zero valid records")]
    EmptyModel,

    /// A protocol in the distribution has no length statistics.
    #[error("no length statistics for protocol '{protocol}'")]
    MissingStatistics { protocol: String },

    /// Length statistics cannot parameterize a normal distribution.
    #[error("invalid length model for '{protocol}': mean {mean}, stddev {stddev}")]
    InvalidLengthModel {
        protocol: String,
        mean: f64,
        stddev: f64,
    },

    /// Probabilities cannot parameterize a categorical distribution.
    #[error("invalid protocol weights: {reason}")]
    InvalidWeights { reason: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, FitError>;
