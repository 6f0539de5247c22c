//! Provider abstraction for machine-image lookup and instance launches.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Predicate set used to select exactly one machine image.
///
/// The provider resolves the name pattern, virtualisation type, and owner to
/// an ordered list of candidate images; the pipeline uses the first element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageFilter {
    /// Glob-style pattern matched against image names.
    pub name_pattern: String,
    /// Virtualisation type the image must support (for example `hvm`).
    pub virtualization_type: String,
    /// Account identifier that owns the image.
    pub owner: String,
}

impl ImageFilter {
    /// Starts a builder for an [`ImageFilter`].
    #[must_use]
    pub fn builder() -> ImageFilterBuilder {
        ImageFilterBuilder::new()
    }

    /// Validates the filter, returning a descriptive error when a required
    /// field is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::Validation`] when any field is empty.
    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.name_pattern.is_empty() {
            return Err(ComputeError::Validation("name_pattern".to_owned()));
        }
        if self.virtualization_type.is_empty() {
            return Err(ComputeError::Validation("virtualization_type".to_owned()));
        }
        if self.owner.is_empty() {
            return Err(ComputeError::Validation("owner".to_owned()));
        }
        Ok(())
    }
}

/// Builder for [`ImageFilter`] that defers trimming and validation to
/// construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ImageFilterBuilder {
    name_pattern: String,
    virtualization_type: String,
    owner: String,
}

impl ImageFilterBuilder {
    /// Creates an empty builder; fields must be populated before build.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image name pattern.
    #[must_use]
    pub fn name_pattern(mut self, value: impl Into<String>) -> Self {
        self.name_pattern = value.into();
        self
    }

    /// Sets the virtualisation type.
    #[must_use]
    pub fn virtualization_type(mut self, value: impl Into<String>) -> Self {
        self.virtualization_type = value.into();
        self
    }

    /// Sets the owning account identifier.
    #[must_use]
    pub fn owner(mut self, value: impl Into<String>) -> Self {
        self.owner = value.into();
        self
    }

    /// Builds and validates the [`ImageFilter`], trimming string inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::Validation`] when any required field is empty.
    pub fn build(self) -> Result<ImageFilter, ComputeError> {
        let filter = ImageFilter {
            name_pattern: self.name_pattern.trim().to_owned(),
            virtualization_type: self.virtualization_type.trim().to_owned(),
            owner: self.owner.trim().to_owned(),
        };
        filter.validate()?;
        Ok(filter)
    }
}

/// A machine image candidate returned by a describe call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageDescriptor {
    /// Provider-assigned image identifier.
    pub id: String,
    /// Image name, when the provider reports one.
    pub name: Option<String>,
}

/// Fixed launch parameters applied to every instance request.
///
/// Min/max count is pinned at one; batch provisioning is out of scope.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstanceSpec {
    /// Commercial size class to request (for example `t2.micro`).
    pub instance_type: String,
    /// Name of the key pair installed on the instance.
    pub key_name: String,
}

impl InstanceSpec {
    /// Starts a builder for an [`InstanceSpec`].
    #[must_use]
    pub fn builder() -> InstanceSpecBuilder {
        InstanceSpecBuilder::new()
    }

    /// Validates the spec, returning a descriptive error when a required
    /// field is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::Validation`] when any field is empty.
    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.instance_type.is_empty() {
            return Err(ComputeError::Validation("instance_type".to_owned()));
        }
        if self.key_name.is_empty() {
            return Err(ComputeError::Validation("key_name".to_owned()));
        }
        Ok(())
    }
}

/// Builder for [`InstanceSpec`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InstanceSpecBuilder {
    instance_type: String,
    key_name: String,
}

impl InstanceSpecBuilder {
    /// Creates an empty builder; fields must be populated before build.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instance size class.
    #[must_use]
    pub fn instance_type(mut self, value: impl Into<String>) -> Self {
        self.instance_type = value.into();
        self
    }

    /// Sets the key-pair name.
    #[must_use]
    pub fn key_name(mut self, value: impl Into<String>) -> Self {
        self.key_name = value.into();
        self
    }

    /// Builds and validates the [`InstanceSpec`], trimming string inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::Validation`] when any required field is empty.
    pub fn build(self) -> Result<InstanceSpec, ComputeError> {
        let spec = InstanceSpec {
            instance_type: self.instance_type.trim().to_owned(),
            key_name: self.key_name.trim().to_owned(),
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Handle returned by a provider once an instance has been launched.
///
/// Launched instances are real billable infrastructure; nothing in this crate
/// tears them down.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstanceHandle {
    /// Provider-specific identifier for the instance.
    pub id: String,
}

/// Errors raised while validating compute requests.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ComputeError {
    /// Raised when a request is missing a required field.
    #[error("missing or empty field: {0}")]
    Validation(String),
}

/// Future returned by provider operations.
pub type ProviderFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Minimal interface implemented by compute providers.
pub trait ComputeProvider {
    /// Provider-specific error type returned by the provider.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the ordered list of images matching the filter. Provider
    /// ordering is preserved; selection policy belongs to the caller.
    fn describe_images<'a>(
        &'a self,
        filter: &'a ImageFilter,
    ) -> ProviderFuture<'a, Vec<ImageDescriptor>, Self::Error>;

    /// Launches one instance from the given image and returns the collection
    /// reported by the provider.
    fn launch<'a>(
        &'a self,
        image_id: &'a str,
        spec: &'a InstanceSpec,
    ) -> ProviderFuture<'a, Vec<InstanceHandle>, Self::Error>;
}
