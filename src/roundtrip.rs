//! Bucket-ensure, upload, and verified-download pipeline.
//!
//! The pipeline makes the target bucket exist, writes the payload, reads it
//! back, and checks the provider-reported length against the bytes actually
//! received. It is generic over the [`ObjectStore`] so tests can drive it
//! with recording doubles.

use thiserror::Error;

use crate::storage::{FetchedObject, ObjectStore};

/// Complete description of one round trip through an object store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundTripPlan {
    /// Bucket that must exist before the upload.
    pub bucket: String,
    /// Key the payload is written under and read back from.
    pub key: String,
    /// Payload to upload.
    pub body: Vec<u8>,
}

/// Errors surfaced by the round-trip pipeline.
#[derive(Debug, Error)]
pub enum RoundTripError<E>
where
    E: std::error::Error + 'static,
{
    /// Raised when the bucket listing fails at the store.
    #[error("failed to list buckets: {0}")]
    ListBuckets(#[source] E),
    /// Raised when creating the missing bucket fails at the store.
    #[error("failed to create bucket {bucket:?}: {source}")]
    CreateBucket {
        /// Bucket the pipeline attempted to create.
        bucket: String,
        /// Store error that aborted the creation.
        #[source]
        source: E,
    },
    /// Raised when the upload fails; the download is never attempted.
    #[error("failed to upload object {key:?}: {source}")]
    Upload {
        /// Key the upload targeted.
        key: String,
        /// Store error that aborted the upload.
        #[source]
        source: E,
    },
    /// Raised when the download fails.
    #[error("failed to download object {key:?}: {source}")]
    Download {
        /// Key the download targeted.
        key: String,
        /// Store error that aborted the download.
        #[source]
        source: E,
    },
    /// Raised when the provider-reported byte count disagrees with the
    /// buffer that was read.
    #[error("download reported {reported} bytes but {actual} bytes were read")]
    IntegrityMismatch {
        /// Byte count the provider reported for the transfer.
        reported: usize,
        /// Bytes actually read into memory.
        actual: usize,
    },
}

/// Orchestrates the ensure-upload-download-verify sequence against a store.
#[derive(Debug)]
pub struct RoundTripper<S> {
    store: S,
}

impl<S: ObjectStore> RoundTripper<S> {
    /// Creates a pipeline backed by the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs the full round trip and returns the downloaded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RoundTripError`] when any store operation fails or the
    /// downloaded byte count does not match what the provider reported.
    pub async fn execute(&self, plan: RoundTripPlan) -> Result<Vec<u8>, RoundTripError<S::Error>> {
        let RoundTripPlan { bucket, key, body } = plan;

        self.ensure_bucket(&bucket).await?;

        self.store
            .put_object(&bucket, &key, body)
            .await
            .map_err(|source| RoundTripError::Upload {
                key: key.clone(),
                source,
            })?;

        let fetched = self
            .store
            .get_object(&bucket, &key)
            .await
            .map_err(|source| RoundTripError::Download {
                key: key.clone(),
                source,
            })?;

        verify_transfer(&fetched)?;
        Ok(fetched.bytes)
    }

    /// Creates the bucket only when the listing does not already contain it.
    async fn ensure_bucket(&self, bucket: &str) -> Result<(), RoundTripError<S::Error>> {
        let names = self
            .store
            .list_buckets()
            .await
            .map_err(RoundTripError::ListBuckets)?;
        if names.iter().any(|name| name == bucket) {
            return Ok(());
        }
        self.store
            .create_bucket(bucket)
            .await
            .map_err(|source| RoundTripError::CreateBucket {
                bucket: bucket.to_owned(),
                source,
            })
    }
}

/// Checks the provider-reported length against the bytes actually read.
fn verify_transfer<E>(fetched: &FetchedObject) -> Result<(), RoundTripError<E>>
where
    E: std::error::Error + 'static,
{
    if fetched.reported_len == fetched.bytes.len() {
        Ok(())
    } else {
        Err(RoundTripError::IntegrityMismatch {
            reported: fetched.reported_len,
            actual: fetched.bytes.len(),
        })
    }
}
