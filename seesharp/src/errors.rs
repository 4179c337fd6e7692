// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{exit_codes::SeeSharpExitCode, output::StderrStyles};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::{error::Error, time::Duration};
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are placeholder messages -- the expected way to print out errors is with
// the display_to_stderr method, which colorizes errors.

/// An expected failure of `seesharp`, as opposed to a bug.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("invalid speed thresholds")]
    InvalidThresholds { fast: Duration, slow: Duration },
    #[error("failed to read input")]
    InputReadError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to decode input")]
    DecodeError {
        input: String,
        #[source]
        err: xunit_report::DecodeError,
    },
    #[error("failed to serialize report")]
    JsonError {
        #[source]
        err: serde_json::Error,
    },
    #[error("failed to write output")]
    WriteError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::InvalidThresholds { .. } => SeeSharpExitCode::SETUP_ERROR,
            Self::InputReadError { .. } => SeeSharpExitCode::INPUT_READ_FAILED,
            Self::DecodeError { .. } => SeeSharpExitCode::DECODE_FAILED,
            Self::JsonError { .. } | Self::WriteError { .. } => {
                SeeSharpExitCode::WRITE_OUTPUT_ERROR
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::InvalidThresholds { fast, slow } => {
                error!(
                    "fast threshold ({}) must not exceed slow threshold ({})",
                    humantime::format_duration(*fast).style(styles.bold),
                    humantime::format_duration(*slow).style(styles.bold),
                );
                None
            }
            Self::InputReadError { path, err } => {
                error!("failed to read `{}`", path.style(styles.bold));
                Some(err as &dyn Error)
            }
            Self::DecodeError { input, err } => {
                error!(
                    "`{}` is not a valid xUnit v2 XML document",
                    input.style(styles.bold)
                );
                Some(err as &dyn Error)
            }
            Self::JsonError { err } => {
                error!("failed to serialize report to JSON");
                Some(err as &dyn Error)
            }
            Self::WriteError { err } => {
                error!("failed to write output");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: "seesharp::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
