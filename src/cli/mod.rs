//! Command-line interface definitions for the `stratus` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `stratus` binary.
#[derive(Debug, Parser)]
#[command(
    name = "stratus",
    about = "Provision demo infrastructure and round-trip objects through cloud storage",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Resolve a machine image and launch a virtual machine instance.
    #[command(
        name = "provision",
        about = "Resolve a machine image and launch an instance"
    )]
    Provision(ProvisionCommand),
    /// Ensure the target bucket exists and round-trip an object through it.
    #[command(
        name = "roundtrip",
        about = "Ensure the bucket exists, then upload and verify a download"
    )]
    Roundtrip(RoundTripCommand),
}

/// Arguments for the `stratus provision` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct ProvisionCommand {
    /// Override the instance size class for this run.
    ///
    /// The provider rejects unknown size classes with a provider-specific
    /// error at launch time.
    #[arg(long, value_name = "TYPE")]
    pub(crate) instance_type: Option<String>,
    /// Override the machine image name pattern for this run.
    ///
    /// The pattern is matched against image names by the provider; a pattern
    /// that matches nothing fails the pipeline before any launch occurs.
    #[arg(long, value_name = "PATTERN")]
    pub(crate) image: Option<String>,
}

/// Arguments for the `stratus roundtrip` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct RoundTripCommand {
    /// Override the target bucket for this run.
    #[arg(long, value_name = "BUCKET")]
    pub(crate) bucket: Option<String>,
    /// Override the object key for this run.
    #[arg(long, value_name = "KEY")]
    pub(crate) key: Option<String>,
}
