//! Image-selection and instance-launch pipeline.
//!
//! The pipeline resolves an [`ImageFilter`] to a single image, launches one
//! instance from it, and reports the resulting handle. It is generic over the
//! [`ComputeProvider`] so tests can drive it with scripted providers.

use thiserror::Error;

use crate::compute::{ComputeProvider, ImageDescriptor, ImageFilter, InstanceHandle, InstanceSpec};

/// Errors surfaced by the provisioning pipeline.
#[derive(Debug, Error)]
pub enum ProvisionError<E>
where
    E: std::error::Error + 'static,
{
    /// Raised when the image lookup fails at the provider.
    #[error("failed to describe images: {0}")]
    Describe(#[source] E),
    /// Raised when the filter matched no images. Launch is never attempted.
    #[error("no image matched pattern {pattern:?} for owner {owner}")]
    NoImageFound {
        /// Name pattern that produced no candidates.
        pattern: String,
        /// Owner account the lookup was scoped to.
        owner: String,
    },
    /// Raised when the launch call fails at the provider.
    #[error("failed to launch instance: {0}")]
    Launch(#[source] E),
    /// Raised when the provider accepted the launch but reported no
    /// instances.
    #[error("provider returned no instances for the launch request")]
    EmptyLaunch,
}

/// Orchestrates image selection and instance launch against a provider.
#[derive(Debug)]
pub struct Provisioner<P> {
    provider: P,
}

impl<P: ComputeProvider> Provisioner<P> {
    /// Creates a pipeline backed by the given provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Resolves the filter to an image, launches one instance, and returns
    /// its handle.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when the lookup or launch fails, when no
    /// image matches, or when the provider reports an empty launch.
    pub async fn execute(
        &self,
        filter: &ImageFilter,
        spec: &InstanceSpec,
    ) -> Result<InstanceHandle, ProvisionError<P::Error>> {
        let candidates = self
            .provider
            .describe_images(filter)
            .await
            .map_err(ProvisionError::Describe)?;
        let image = select_first_image(candidates, filter)?;

        let handles = self
            .provider
            .launch(&image.id, spec)
            .await
            .map_err(ProvisionError::Launch)?;
        handles
            .into_iter()
            .next()
            .ok_or(ProvisionError::EmptyLaunch)
    }
}

/// Picks the first candidate in provider order, preserving the lookup
/// parameters in the error when the list is empty.
fn select_first_image<E>(
    candidates: Vec<ImageDescriptor>,
    filter: &ImageFilter,
) -> Result<ImageDescriptor, ProvisionError<E>>
where
    E: std::error::Error + 'static,
{
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProvisionError::NoImageFound {
            pattern: filter.name_pattern.clone(),
            owner: filter.owner.clone(),
        })
}
