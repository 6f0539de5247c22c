//! Unit tests for configuration validation and pipeline projections.

#[path = "common/test_constants.rs"]
mod test_constants;

use rstest::*;

use stratus::{AppConfig, config::ConfigError};
use test_constants::{DEFAULT_INSTANCE_TYPE, TEST_BUCKET, TEST_KEY, TEST_PAYLOAD};

#[fixture]
fn valid_config() -> AppConfig {
    AppConfig {
        region: String::from("sa-east-1"),
        image_name_pattern: String::from(
            "ubuntu/images/hvm-ssd/ubuntu-focal-20.04-amd64-server-*",
        ),
        image_owner: String::from("099720109477"),
        virtualization_type: String::from("hvm"),
        instance_type: String::from(DEFAULT_INSTANCE_TYPE),
        key_name: String::from("stratus-demo"),
        bucket: String::from(TEST_BUCKET),
        object_key: String::from(TEST_KEY),
        payload: String::from("hello world!"),
    }
}

#[rstest]
fn config_validation_accepts_defaults(valid_config: AppConfig) {
    valid_config
        .validate()
        .expect("default configuration should validate");
}

#[rstest]
fn config_validation_rejects_missing_region_with_actionable_error(valid_config: AppConfig) {
    let cfg = AppConfig {
        region: String::new(),
        ..valid_config
    };

    let error = cfg.validate().expect_err("region is required");
    let ConfigError::MissingField(ref message) = error else {
        panic!("expected MissingField error");
    };
    assert!(
        message.contains("STRATUS_REGION"),
        "error should mention env var: {message}"
    );
    assert!(
        message.contains("stratus.toml"),
        "error should mention config file: {message}"
    );
    assert!(
        message.contains("region"),
        "error should mention TOML key: {message}"
    );
}

/// Verifies that validation produces actionable errors mentioning both the
/// environment variable and configuration file for each required field.
#[test]
fn config_validation_produces_actionable_errors_for_all_fields() {
    fn assert_actionable(
        mut cfg: AppConfig,
        mutate: impl FnOnce(&mut AppConfig),
        env_var: &str,
        toml_key: &str,
    ) {
        mutate(&mut cfg);
        let error = cfg.validate().expect_err("validation should fail");
        let message = error.to_string();
        assert!(
            message.contains(env_var),
            "error should mention env var {env_var}: {message}"
        );
        assert!(
            message.contains("stratus.toml"),
            "error should mention config file: {message}"
        );
        assert!(
            message.contains(toml_key),
            "error should mention TOML key {toml_key}: {message}"
        );
    }

    assert_actionable(
        valid_config(),
        |cfg| cfg.image_name_pattern.clear(),
        "STRATUS_IMAGE_NAME_PATTERN",
        "image_name_pattern",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.image_owner.clear(),
        "STRATUS_IMAGE_OWNER",
        "image_owner",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.virtualization_type.clear(),
        "STRATUS_VIRTUALIZATION_TYPE",
        "virtualization_type",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.instance_type.clear(),
        "STRATUS_INSTANCE_TYPE",
        "instance_type",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.key_name.clear(),
        "STRATUS_KEY_NAME",
        "key_name",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.bucket.clear(),
        "STRATUS_BUCKET",
        "bucket",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.object_key.clear(),
        "STRATUS_OBJECT_KEY",
        "object_key",
    );

    assert_actionable(
        valid_config(),
        |cfg| cfg.payload.clear(),
        "STRATUS_PAYLOAD",
        "payload",
    );
}

#[rstest]
fn config_image_filter_projects_lookup_fields(valid_config: AppConfig) {
    let filter = valid_config
        .image_filter()
        .unwrap_or_else(|err| panic!("valid config yields filter: {err}"));
    assert_eq!(filter.name_pattern, valid_config.image_name_pattern);
    assert_eq!(filter.virtualization_type, valid_config.virtualization_type);
    assert_eq!(filter.owner, valid_config.image_owner);
}

#[rstest]
fn config_instance_spec_projects_launch_fields(valid_config: AppConfig) {
    let spec = valid_config
        .instance_spec()
        .unwrap_or_else(|err| panic!("valid config yields spec: {err}"));
    assert_eq!(spec.instance_type, valid_config.instance_type);
    assert_eq!(spec.key_name, valid_config.key_name);
}

#[rstest]
fn config_image_filter_ignores_storage_fields(valid_config: AppConfig) {
    let cfg = AppConfig {
        bucket: String::new(),
        object_key: String::new(),
        payload: String::new(),
        ..valid_config
    };
    cfg.image_filter()
        .expect("empty storage fields must not fail a provisioning projection");
    cfg.instance_spec()
        .expect("empty storage fields must not fail a launch projection");
}

#[rstest]
fn config_round_trip_plan_ignores_launch_fields(valid_config: AppConfig) {
    let cfg = AppConfig {
        image_name_pattern: String::new(),
        instance_type: String::new(),
        key_name: String::new(),
        ..valid_config
    };
    cfg.round_trip_plan()
        .expect("empty launch fields must not fail a storage projection");
}

#[rstest]
fn config_round_trip_plan_still_requires_storage_fields(valid_config: AppConfig) {
    let cfg = AppConfig {
        bucket: String::new(),
        ..valid_config
    };
    let error = cfg
        .round_trip_plan()
        .expect_err("empty bucket should fail the storage projection");
    assert!(
        error.to_string().contains("STRATUS_BUCKET"),
        "unexpected error: {error}"
    );
}

#[rstest]
fn config_round_trip_plan_projects_storage_fields(valid_config: AppConfig) {
    let plan = valid_config
        .round_trip_plan()
        .unwrap_or_else(|err| panic!("valid config yields plan: {err}"));
    assert_eq!(plan.bucket, TEST_BUCKET);
    assert_eq!(plan.key, TEST_KEY);
    assert_eq!(plan.body, TEST_PAYLOAD);
}
