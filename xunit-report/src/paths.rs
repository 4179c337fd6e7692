// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Returns the file name component of `path`.
///
/// Both `/` and `\` are treated as separators regardless of the host platform, since xUnit
/// reports produced on Windows are routinely read elsewhere. A path without any separator is
/// returned unchanged.
pub fn file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
