// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// An error that occurs while decoding an xUnit v2 XML document.
///
/// Returned by [`TestRun::from_reader`](crate::TestRun::from_reader) and
/// [`decode`](crate::decode).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input isn't well-formed XML.
    #[error("error reading xUnit XML at byte {position}")]
    Xml {
        /// The byte offset at which the error was detected.
        position: usize,

        /// The underlying error.
        #[source]
        error: quick_xml::Error,
    },

    /// The input doesn't contain any element, for example because it's empty.
    #[error("no root element found, expected `<assemblies>`")]
    MissingRoot,

    /// The root element isn't `<assemblies>`.
    #[error("unexpected root element `<{name}>`, expected `<assemblies>`")]
    UnexpectedRoot {
        /// The name of the root element that was found.
        name: String,
    },

    /// A second element was found after the root element was closed.
    #[error("unexpected element `<{name}>` after the root element")]
    MultipleRoots {
        /// The name of the extra element.
        name: String,
    },

    /// The input ended while elements were still open.
    #[error("unexpected end of input, `<{name}>` is not closed")]
    UnexpectedEof {
        /// The name of the innermost open element.
        name: String,
    },
}
