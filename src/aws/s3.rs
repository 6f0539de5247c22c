//! S3-backed implementation of the object-store interface.

use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use crate::aws::error::AwsError;
use crate::aws::load_sdk_config;
use crate::storage::{FetchedObject, ObjectStore, StoreFuture};

/// Object store backed by the S3 API.
#[derive(Clone, Debug)]
pub struct S3Store {
    client: Client,
    region: String,
}

impl S3Store {
    /// Connects to S3 in the given region using the default credential
    /// chain. New buckets are created in that region.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::Config`] when the region is empty or no
    /// credential source resolves.
    pub async fn connect(region: &str) -> Result<Self, AwsError> {
        let config = load_sdk_config(region).await?;
        Ok(Self::from_client(Client::new(&config), region))
    }

    /// Wraps an existing S3 client, pinning new buckets to the given region.
    #[must_use]
    pub fn from_client(client: Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_owned(),
        }
    }

    async fn bucket_names(&self) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(AwsError::provider)?;
        let names = response
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_owned))
            .collect();
        Ok(names)
    }

    async fn make_bucket(&self, bucket: &str) -> Result<(), AwsError> {
        let constraint = BucketLocationConstraint::from(self.region.as_str());
        let config = CreateBucketConfiguration::builder()
            .location_constraint(constraint)
            .build();
        self.client
            .create_bucket()
            .bucket(bucket)
            .create_bucket_configuration(config)
            .send()
            .await
            .map_err(AwsError::provider)?;
        Ok(())
    }

    async fn upload(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), AwsError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(AwsError::provider)?;
        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> Result<FetchedObject, AwsError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(AwsError::provider)?;

        let reported = response.content_length();
        let bytes = response
            .body
            .collect()
            .await
            .map_err(AwsError::provider)?
            .into_bytes()
            .to_vec();
        fetched_from(reported, bytes)
    }
}

/// Folds a download response into a [`FetchedObject`]. A response without a
/// content length, or with a negative one, cannot feed the integrity check
/// and is surfaced as a provider error.
fn fetched_from(reported: Option<i64>, bytes: Vec<u8>) -> Result<FetchedObject, AwsError> {
    let reported = reported.ok_or_else(|| AwsError::Provider {
        message: String::from("download response carried no content length"),
    })?;
    let reported_len = usize::try_from(reported).map_err(|_| AwsError::Provider {
        message: format!("download reported an invalid content length: {reported}"),
    })?;
    Ok(FetchedObject {
        reported_len,
        bytes,
    })
}

impl ObjectStore for S3Store {
    type Error = AwsError;

    fn list_buckets(&self) -> StoreFuture<'_, Vec<String>, Self::Error> {
        Box::pin(self.bucket_names())
    }

    fn create_bucket<'a>(&'a self, bucket: &'a str) -> StoreFuture<'a, (), Self::Error> {
        Box::pin(self.make_bucket(bucket))
    }

    fn put_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
        body: Vec<u8>,
    ) -> StoreFuture<'a, (), Self::Error> {
        Box::pin(self.upload(bucket, key, body))
    }

    fn get_object<'a>(
        &'a self,
        bucket: &'a str,
        key: &'a str,
    ) -> StoreFuture<'a, FetchedObject, Self::Error> {
        Box::pin(self.download(bucket, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetched_from_pairs_reported_length_with_bytes() {
        let fetched = fetched_from(Some(12), b"hello world!".to_vec())
            .expect("reported length should be accepted");
        assert_eq!(fetched.reported_len, 12);
        assert_eq!(fetched.bytes, b"hello world!");
    }

    #[test]
    fn fetched_from_rejects_missing_content_length() {
        let error = fetched_from(None, b"hello world!".to_vec())
            .expect_err("missing content length should fail");
        assert!(
            matches!(
                error,
                AwsError::Provider { ref message } if message.contains("no content length")
            ),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn fetched_from_rejects_negative_content_length() {
        let error = fetched_from(Some(-1), b"hello world!".to_vec())
            .expect_err("negative content length should fail");
        assert!(
            matches!(
                error,
                AwsError::Provider { ref message } if message.contains("-1")
            ),
            "unexpected error: {error}"
        );
    }
}
