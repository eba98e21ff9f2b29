//! Error types emitted by the Agrilogix CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use agrilogix_core::{CostModelError, LocationError, RouteError, SnapshotError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Agrilogix CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option that named the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option that named the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option that named the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Option that named the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// An input file was not valid JSON for its type.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Option that named the path.
        field: &'static str,
        /// The path as given.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The plan request failed boundary validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidRequest {
        /// Path of the request file.
        path: Utf8PathBuf,
        /// First failed check.
        #[source]
        source: RequestError,
    },
    /// The tariff file decoded but describes an invalid tariff.
    #[error("tariff in {path:?} is invalid: {source}")]
    InvalidTariff {
        /// Path of the tariff file.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: CostModelError,
    },
    /// The route planner rejected the request.
    #[error("route planning failed: {source}")]
    Plan {
        /// Planner failure.
        #[source]
        source: RouteError,
    },
    /// Serialising the plan response failed.
    #[error("failed to serialise plan response: {0}")]
    SerialisePlanResponse(#[source] serde_json::Error),
    /// Writing the plan output failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}

/// Reasons a decoded plan request is rejected before it is run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// A bare coordinate in the request was out of range or not finite.
    #[error("{field} is invalid: {source}")]
    Location {
        /// Request field holding the coordinate.
        field: &'static str,
        /// Underlying coordinate failure.
        #[source]
        source: LocationError,
    },
    /// A facility or producer record failed validation.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// Route parameters were invalid.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// A numeric field was not finite.
    #[error("{field} must be a finite number, got {value}")]
    InvalidNumber {
        /// Request field holding the number.
        field: &'static str,
        /// The value supplied.
        value: f64,
    },
}
