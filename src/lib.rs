//! Core library for the Stratus cloud demo tool.
//!
//! The crate exposes provider abstractions for compute provisioning and
//! object storage, AWS implementations of both, and the two pipelines that
//! power the CLI: image-select-and-launch and bucket-upload-download-verify.

pub mod aws;
pub mod compute;
pub mod config;
pub mod provision;
pub mod roundtrip;
pub mod storage;

pub use aws::{AwsError, Ec2Provider, S3Store};
pub use compute::{
    ComputeError, ComputeProvider, ImageDescriptor, ImageFilter, ImageFilterBuilder,
    InstanceHandle, InstanceSpec, InstanceSpecBuilder,
};
pub use config::{AppConfig, ConfigError};
pub use provision::{ProvisionError, Provisioner};
pub use roundtrip::{RoundTripError, RoundTripPlan, RoundTripper};
pub use storage::{FetchedObject, ObjectStore};
