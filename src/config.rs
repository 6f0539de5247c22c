//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::compute::{ImageFilter, InstanceSpec};
use crate::roundtrip::RoundTripPlan;

/// Application configuration derived from environment variables,
/// configuration files, and CLI flags.
///
/// Every field carries a default so a bare invocation works against a
/// plain demo account; overrides flow in through `STRATUS_*` environment
/// variables or `stratus.toml`.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "STRATUS")]
pub struct AppConfig {
    /// Region all API calls are issued against. Defaults to `sa-east-1`.
    #[ortho_config(default = "sa-east-1".to_owned())]
    pub region: String,
    /// Name pattern used to select the machine image.
    #[ortho_config(
        default = "ubuntu/images/hvm-ssd/ubuntu-focal-20.04-amd64-server-*".to_owned()
    )]
    pub image_name_pattern: String,
    /// Account identifier that owns the machine image. Defaults to the
    /// Canonical publishing account.
    #[ortho_config(default = "099720109477".to_owned())]
    pub image_owner: String,
    /// Virtualisation type required of the machine image.
    #[ortho_config(default = "hvm".to_owned())]
    pub virtualization_type: String,
    /// Commercial size class requested for new instances.
    #[ortho_config(default = "t2.micro".to_owned())]
    pub instance_type: String,
    /// Key pair installed on new instances.
    #[ortho_config(default = "stratus-demo".to_owned())]
    pub key_name: String,
    /// Bucket used for the storage round trip.
    #[ortho_config(default = "stratus-roundtrip-demo".to_owned())]
    pub bucket: String,
    /// Key the round-trip payload is written under.
    #[ortho_config(default = "test.txt".to_owned())]
    pub object_key: String,
    /// Payload uploaded during the round trip.
    #[ortho_config(default = "hello world!".to_owned())]
    pub payload: String,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
    section: &'static str,
}

impl FieldMetadata {
    const fn new(
        description: &'static str,
        env_var: &'static str,
        toml_key: &'static str,
        section: &'static str,
    ) -> Self {
        Self {
            description,
            env_var,
            toml_key,
            section,
        }
    }
}

impl AppConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "missing {}: set {} or add {} to [{}] in stratus.toml",
                metadata.description, metadata.env_var, metadata.toml_key, metadata.section
            )));
        }
        Ok(())
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags in
    /// that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("stratus")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds the [`ImageFilter`] used by the provisioning pipeline. Only the
    /// image lookup fields are validated, so unrelated storage settings
    /// cannot fail a provisioning run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn image_filter(&self) -> Result<ImageFilter, ConfigError> {
        self.validate_image_fields()?;
        ImageFilter::builder()
            .name_pattern(&self.image_name_pattern)
            .virtualization_type(&self.virtualization_type)
            .owner(&self.image_owner)
            .build()
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds the [`InstanceSpec`] used by the provisioning pipeline. Only
    /// the launch fields are validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn instance_spec(&self) -> Result<InstanceSpec, ConfigError> {
        self.validate_instance_fields()?;
        InstanceSpec::builder()
            .instance_type(&self.instance_type)
            .key_name(&self.key_name)
            .build()
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Builds the [`RoundTripPlan`] used by the storage pipeline. Only the
    /// storage fields are validated, so unrelated launch settings cannot
    /// fail a round-trip run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn round_trip_plan(&self) -> Result<RoundTripPlan, ConfigError> {
        self.validate_storage_fields()?;
        Ok(RoundTripPlan {
            bucket: self.bucket.clone(),
            key: self.object_key.clone(),
            body: self.payload.clone().into_bytes(),
        })
    }

    /// Performs semantic validation on every required field. Error messages
    /// include guidance on how to provide missing values via environment
    /// variables or configuration files. The pipeline projections validate
    /// only their own field groups; this checks all of them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_region()?;
        self.validate_image_fields()?;
        self.validate_instance_fields()?;
        self.validate_storage_fields()?;
        Ok(())
    }

    fn validate_region(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.region,
            &FieldMetadata::new("region", "STRATUS_REGION", "region", "stratus"),
        )
    }

    fn validate_image_fields(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.image_name_pattern,
            &FieldMetadata::new(
                "machine image name pattern",
                "STRATUS_IMAGE_NAME_PATTERN",
                "image_name_pattern",
                "stratus",
            ),
        )?;
        Self::require_field(
            &self.image_owner,
            &FieldMetadata::new(
                "machine image owner",
                "STRATUS_IMAGE_OWNER",
                "image_owner",
                "stratus",
            ),
        )?;
        Self::require_field(
            &self.virtualization_type,
            &FieldMetadata::new(
                "virtualisation type",
                "STRATUS_VIRTUALIZATION_TYPE",
                "virtualization_type",
                "stratus",
            ),
        )?;
        Ok(())
    }

    fn validate_instance_fields(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.instance_type,
            &FieldMetadata::new(
                "instance type",
                "STRATUS_INSTANCE_TYPE",
                "instance_type",
                "stratus",
            ),
        )?;
        Self::require_field(
            &self.key_name,
            &FieldMetadata::new("key pair name", "STRATUS_KEY_NAME", "key_name", "stratus"),
        )?;
        Ok(())
    }

    fn validate_storage_fields(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.bucket,
            &FieldMetadata::new("storage bucket", "STRATUS_BUCKET", "bucket", "stratus"),
        )?;
        Self::require_field(
            &self.object_key,
            &FieldMetadata::new("object key", "STRATUS_OBJECT_KEY", "object_key", "stratus"),
        )?;
        Self::require_field(
            &self.payload,
            &FieldMetadata::new(
                "round-trip payload",
                "STRATUS_PAYLOAD",
                "payload",
                "stratus",
            ),
        )?;
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
