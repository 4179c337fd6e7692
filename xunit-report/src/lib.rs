// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read xUnit v2 XML test results into a readable, grouped report.
//!
//! [`TestRun::from_reader`] decodes a document in the
//! [xUnit v2 format](https://xunit.net/docs/format-xml-v2) written by .NET test runners, and
//! turns machine names such as `Ns.Outer+Inner.ParsesHTMLInput` into groups (`Outer`,
//! `Inner`) and sentences (`Parses html input`).

mod errors;
pub mod paths;
mod report;
pub mod sentence;
pub mod words;
mod xml;

pub use errors::DecodeError;
pub use report::*;
