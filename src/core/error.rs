//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

/// Why a single token could not be turned into an instant.
///
/// These never abort a run: the offending line is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("not an epoch number: `{0}`")]
    MalformedEpoch(String),
    #[error("epoch value out of range: `{0}`")]
    EpochOutOfRange(String),
    #[error("`{token}` does not match layout `{layout}`")]
    LayoutMismatch { layout: String, token: String },
    #[error("unknown time format: `{0}`")]
    UnknownFormat(String),
    #[error("no timestamp found in `{0}`")]
    NoTimestampFound(String),
}

/// Precise configuration faults, all fatal before input is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration `{0}`")]
    InvalidDuration(String),
    #[error("interval must be positive, got `{0}`")]
    NonPositiveInterval(String),
    #[error("year {0} cannot stand in for a missing year")]
    InvalidYear(i32),
    #[error("unknown time zone `{0}`")]
    UnknownTimeZone(String),
    #[error("unknown color mode `{0}` (expected never, always or auto)")]
    InvalidStyle(String),
    #[error("bar length must be positive")]
    InvalidBarLength,
    #[error("series cap must be at least 1")]
    InvalidSeriesCap,
    #[error("cannot parse --{which} value `{value}`: {source}")]
    InvalidRangeBound {
        which: &'static str,
        value: String,
        source: ResolveError,
    },
    #[error("--from {from} must not be after --to {to}")]
    InvalidRange { from: String, to: String },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum TimebarError {
    #[error("{path}: {source}")]
    Open { path: String, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
