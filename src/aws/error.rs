//! Error type shared by the AWS compute and storage backends.

use thiserror::Error;

use crate::compute::ComputeError;

/// Errors surfaced by the AWS backends.
#[derive(Debug, Error)]
pub enum AwsError {
    /// Raised when the SDK configuration cannot be resolved.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when a request fails local validation before any call is made.
    #[error("invalid request: {0}")]
    Validation(String),
    /// Raised when an SDK call fails. The message flattens the SDK's error
    /// chain so the root cause is visible without walking sources.
    #[error("provider error: {message}")]
    Provider {
        /// Flattened description of the SDK failure.
        message: String,
    },
}

impl AwsError {
    /// Builds a [`AwsError::Provider`] from an SDK error, folding the source
    /// chain into a single message.
    pub(crate) fn provider(err: impl std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Provider { message }
    }
}

impl From<ComputeError> for AwsError {
    fn from(err: ComputeError) -> Self {
        match err {
            ComputeError::Validation(field) => Self::Validation(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, Error)]
    #[error("inner cause")]
    struct Inner;

    #[test]
    fn provider_error_flattens_source_chain() {
        let error = AwsError::provider(Outer { inner: Inner });
        assert_eq!(
            error.to_string(),
            "provider error: outer failure: inner cause"
        );
    }
}
