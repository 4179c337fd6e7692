// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summarizes xUnit v2 XML test reports on the command line.
//!
//! Tests are grouped by trait and by nested test class, and each one is shown with its result and
//! a speed marker. Pass `--message-format json` to get the decoded report instead.

#![warn(missing_docs)]

mod dispatch;
mod display;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::ExpectedError;
pub use exit_codes::SeeSharpExitCode;
#[doc(hidden)]
pub use output::{OutputContext, StderrStyles};
