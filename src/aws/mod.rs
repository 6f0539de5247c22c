//! AWS implementations of the compute and storage interfaces.
//!
//! Both backends share the default-chain SDK configuration built by
//! [`load_sdk_config`], so credentials and region resolution behave the same
//! way for compute and storage runs.

mod ec2;
mod error;
mod s3;

pub use ec2::Ec2Provider;
pub use error::AwsError;
pub use s3::S3Store;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Resolves SDK configuration for the given region using the default
/// credential chain.
///
/// # Errors
///
/// Returns [`AwsError::Config`] when the region is empty or the default
/// chain resolves no credential source.
pub(crate) async fn load_sdk_config(region: &str) -> Result<SdkConfig, AwsError> {
    if region.trim().is_empty() {
        return Err(AwsError::Config(String::from("region must not be empty")));
    }
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await;
    if config.credentials_provider().is_none() {
        return Err(AwsError::Config(String::from(
            "no credential source resolved; configure the environment or a shared profile",
        )));
    }
    Ok(config)
}
