//! Per-file outcome of a batch run.

use crate::dialect::{Dialect, ParseError};
use colored::Colorize;
use serde::Serialize;

/// Why a configuration file was left out of the batch.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("unknown device type")]
    UnknownDialect,
    #[error("no parser registered for {dialect}")]
    UnsupportedDialect { dialect: Dialect },
    #[error("no hostname found")]
    MissingHostname,
    #[error("hostname {hostname} already parsed from {first_file}")]
    DuplicateHostname { hostname: String, first_file: String },
    #[error("error reading file: {message}")]
    Unreadable { message: String },
}

impl From<ParseError> for SkipReason {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MissingHostname { .. } => SkipReason::MissingHostname,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub file: String,
    pub hostname: String,
    pub dialect: Dialect,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file: String,
    pub reason: SkipReason,
}

/// Collects which files were parsed and which were skipped, and why.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub parsed: Vec<ParsedFile>,
    pub skipped: Vec<SkippedFile>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_parsed(&mut self, file: &str, hostname: &str, dialect: Dialect) {
        log::info!("Detected device OS: {dialect} for {file} ({hostname})");
        self.parsed.push(ParsedFile {
            file: file.to_string(),
            hostname: hostname.to_string(),
            dialect,
        });
    }

    pub fn record_skipped(&mut self, file: &str, reason: SkipReason) {
        log::warn!(
            "{skipping} {file}: {reason}",
            skipping = "Skipping".on_yellow()
        );
        self.skipped.push(SkippedFile {
            file: file.to_string(),
            reason,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Skip reason recorded for `file`, if any.
    pub fn skip_reason(&self, file: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.file == file)
            .map(|s| &s.reason)
    }
}
