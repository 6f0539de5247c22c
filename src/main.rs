//! Binary entry point for the Stratus CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;

use stratus::{
    AppConfig, AwsError, Ec2Provider, ProvisionError, Provisioner, RoundTripError, RoundTripper,
    S3Store,
};

mod cli;

use cli::{Cli, ProvisionCommand, RoundTripCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("provisioning failed: {0}")]
    Provision(#[from] ProvisionError<AwsError>),
    #[error("round trip failed: {0}")]
    RoundTrip(#[from] RoundTripError<AwsError>),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<i32, CliError> {
    match cli {
        Cli::Provision(command) => provision_command(command).await,
        Cli::Roundtrip(command) => round_trip_command(command).await,
    }
}

async fn provision_command(args: ProvisionCommand) -> Result<i32, CliError> {
    let mut config =
        AppConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    if let Some(instance_type) = args.instance_type {
        config.instance_type = instance_type;
    }
    if let Some(pattern) = args.image {
        config.image_name_pattern = pattern;
    }

    let filter = config
        .image_filter()
        .map_err(|err| CliError::Config(err.to_string()))?;
    let spec = config
        .instance_spec()
        .map_err(|err| CliError::Config(err.to_string()))?;

    let provider = Ec2Provider::connect(&config.region)
        .await
        .map_err(|err| CliError::Backend(err.to_string()))?;
    let handle = Provisioner::new(provider).execute(&filter, &spec).await?;

    writeln!(io::stdout(), "instance launched: {}", handle.id).ok();
    Ok(0)
}

async fn round_trip_command(args: RoundTripCommand) -> Result<i32, CliError> {
    let mut config =
        AppConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    if let Some(bucket) = args.bucket {
        config.bucket = bucket;
    }
    if let Some(key) = args.key {
        config.object_key = key;
    }

    let plan = config
        .round_trip_plan()
        .map_err(|err| CliError::Config(err.to_string()))?;

    let store = S3Store::connect(&config.region)
        .await
        .map_err(|err| CliError::Backend(err.to_string()))?;
    let bytes = RoundTripper::new(store).execute(plan).await?;

    writeln!(
        io::stdout(),
        "round trip complete: {}",
        String::from_utf8_lossy(&bytes)
    )
    .ok();
    Ok(0)
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_writes_cli_error() {
        let mut buf = Vec::new();
        let err = CliError::Config(String::from("missing region"));
        write_error(&mut buf, &err);
        let rendered = String::from_utf8(buf).expect("utf8");
        assert!(
            rendered.contains("configuration error: missing region"),
            "rendered: {rendered}"
        );
    }
}
