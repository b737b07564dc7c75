use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ModelError {
    /// Distribution and length statistics disagree on the protocol set.
    #[error("protocol sets differ: distribution-only {distribution_only:?}, statistics-only {statistics_only:?}")]
    KeyMismatch {
        distribution_only: Vec<String>,
        statistics_only: Vec<String>,
    },

    #[error("invalid probability {probability} for protocol '{protocol}'")]
    InvalidProbability { protocol: String, probability: f64 },

    #[error("probabilities sum to {total}, expected 1")]
    UnnormalizedMass { total: f64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
