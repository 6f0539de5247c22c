//! EC2-backed implementation of the compute interface.

use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::{Filter, InstanceType, ResourceType, Tag, TagSpecification};
use uuid::Uuid;

use crate::aws::error::AwsError;
use crate::aws::load_sdk_config;
use crate::compute::{
    ComputeProvider, ImageDescriptor, ImageFilter, InstanceHandle, InstanceSpec, ProviderFuture,
};

// Single-instance launches only; batch provisioning is out of scope.
const LAUNCH_COUNT: i32 = 1;

/// Compute provider backed by the EC2 API.
#[derive(Clone, Debug)]
pub struct Ec2Provider {
    client: Client,
}

impl Ec2Provider {
    /// Connects to EC2 in the given region using the default credential
    /// chain.
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::Config`] when the region is empty or no
    /// credential source resolves.
    pub async fn connect(region: &str) -> Result<Self, AwsError> {
        let config = load_sdk_config(region).await?;
        Ok(Self::from_client(Client::new(&config)))
    }

    /// Wraps an existing EC2 client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn describe(&self, filter: &ImageFilter) -> Result<Vec<ImageDescriptor>, AwsError> {
        filter.validate()?;
        let response = self
            .client
            .describe_images()
            .filters(
                Filter::builder()
                    .name("name")
                    .values(&filter.name_pattern)
                    .build(),
            )
            .filters(
                Filter::builder()
                    .name("virtualization-type")
                    .values(&filter.virtualization_type)
                    .build(),
            )
            .owners(&filter.owner)
            .send()
            .await
            .map_err(AwsError::provider)?;

        let images = response
            .images()
            .iter()
            .filter_map(|image| {
                image.image_id().map(|id| ImageDescriptor {
                    id: id.to_owned(),
                    name: image.name().map(str::to_owned),
                })
            })
            .collect();
        Ok(images)
    }

    async fn run_instance(
        &self,
        image_id: &str,
        spec: &InstanceSpec,
    ) -> Result<Vec<InstanceHandle>, AwsError> {
        spec.validate()?;
        let name = format!("stratus-{}", Uuid::new_v4().simple());
        let response = self
            .client
            .run_instances()
            .image_id(image_id)
            .instance_type(InstanceType::from(spec.instance_type.as_str()))
            .key_name(&spec.key_name)
            .min_count(LAUNCH_COUNT)
            .max_count(LAUNCH_COUNT)
            .tag_specifications(
                TagSpecification::builder()
                    .resource_type(ResourceType::Instance)
                    .tags(Tag::builder().key("Name").value(name).build())
                    .build(),
            )
            .send()
            .await
            .map_err(AwsError::provider)?;

        let handles = response
            .instances()
            .iter()
            .filter_map(|instance| {
                instance
                    .instance_id()
                    .map(|id| InstanceHandle { id: id.to_owned() })
            })
            .collect();
        Ok(handles)
    }
}

impl ComputeProvider for Ec2Provider {
    type Error = AwsError;

    fn describe_images<'a>(
        &'a self,
        filter: &'a ImageFilter,
    ) -> ProviderFuture<'a, Vec<ImageDescriptor>, Self::Error> {
        Box::pin(self.describe(filter))
    }

    fn launch<'a>(
        &'a self,
        image_id: &'a str,
        spec: &'a InstanceSpec,
    ) -> ProviderFuture<'a, Vec<InstanceHandle>, Self::Error> {
        Box::pin(self.run_instance(image_id, spec))
    }
}
