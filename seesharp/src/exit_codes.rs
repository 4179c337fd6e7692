// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `seesharp` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum SeeSharpExitCode {}

impl SeeSharpExitCode {
    /// No errors occurred and seesharp exited normally.
    pub const OK: i32 = 0;

    /// The arguments were valid for clap but inconsistent with each other.
    pub const SETUP_ERROR: i32 = 96;

    /// The input file couldn't be read.
    pub const INPUT_READ_FAILED: i32 = 97;

    /// The input isn't an xUnit v2 XML document.
    pub const DECODE_FAILED: i32 = 98;

    /// Writing data to stdout produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
