// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decode an xUnit v2 XML document into a tree that mirrors its schema.
//!
//! The format is documented at <https://xunit.net/docs/format-xml-v2>.

use crate::errors::DecodeError;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::{io::BufRead, time::Duration};

/// The `<assemblies>` root element.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlTestRun {
    pub(crate) computer: String,
    pub(crate) user: String,
    pub(crate) timestamp: String,
    pub(crate) start_rtf: String,
    pub(crate) finish_rtf: String,
    pub(crate) assemblies: Vec<XmlAssembly>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlAssembly {
    /// The full path to the assembly.
    pub(crate) name: String,
    pub(crate) errors: usize,
    pub(crate) failed: usize,
    pub(crate) passed: usize,
    pub(crate) not_run: usize,
    pub(crate) total: usize,
    pub(crate) run_date: String,
    pub(crate) run_time: String,
    pub(crate) time: Duration,
    pub(crate) time_rtf: String,
    pub(crate) collections: Vec<XmlCollection>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlCollection {
    pub(crate) tests: Vec<XmlTest>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlTest {
    pub(crate) name: String,
    pub(crate) ty: String,
    pub(crate) result: String,
    pub(crate) time: Duration,
    pub(crate) traits: Vec<XmlTrait>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct XmlTrait {
    pub(crate) name: String,
    pub(crate) value: String,
}

impl XmlTest {
    /// Returns true if the test was given an explicit display name.
    ///
    /// Without a display name, xUnit names a test `Namespace.Type.Method`, so the name contains
    /// the type. C# identifiers can't contain whitespace, so whitespace outside the parameter
    /// list also marks a display name.
    pub(crate) fn has_display_name(&self) -> bool {
        !self.name.contains(self.ty.as_str())
            || without_parameters(&self.name).contains(char::is_whitespace)
    }

    /// Returns true if the test is declared in a nested type, which xUnit renders with `+`.
    pub(crate) fn is_nested(&self) -> bool {
        !self.has_display_name() && without_parameters(&self.name).contains('+')
    }
}

/// Strips the parameter list of a theory (`Method(x: 1)`) from `name`.
pub(crate) fn without_parameters(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Decodes the xUnit v2 document in `reader`.
pub(crate) fn decode_xml(reader: impl BufRead) -> Result<XmlTestRun, DecodeError> {
    let mut reader = Reader::from_reader(reader);
    reader.trim_text(true);

    let mut decoder = TreeDecoder::default();
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(error) => {
                return Err(DecodeError::Xml {
                    position: reader.buffer_position(),
                    error,
                });
            }
        };

        match event {
            Event::Start(start) => decoder.open(&start, false, reader.buffer_position())?,
            Event::Empty(start) => decoder.open(&start, true, reader.buffer_position())?,
            Event::End(_) => decoder.close(),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    decoder.finish()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tag {
    Assemblies,
    Assembly,
    Collection,
    Test,
    Traits,
    Trait,
    Other,
}

#[derive(Debug)]
struct OpenElement {
    tag: Tag,
    name: String,
}

#[derive(Debug, Default)]
struct TreeDecoder {
    run: Option<XmlTestRun>,
    stack: Vec<OpenElement>,
}

impl TreeDecoder {
    fn open(
        &mut self,
        start: &BytesStart<'_>,
        is_empty: bool,
        position: usize,
    ) -> Result<(), DecodeError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let parent = self.stack.last().map(|open| open.tag);

        let tag = match (parent, name.as_str()) {
            (None, _) if self.run.is_some() => return Err(DecodeError::MultipleRoots { name }),
            (None, "assemblies") => {
                self.run = Some(decode_test_run(start, position)?);
                Tag::Assemblies
            }
            (None, _) => return Err(DecodeError::UnexpectedRoot { name }),
            (Some(Tag::Assemblies), "assembly") => {
                let assembly = decode_assembly(start, position)?;
                if let Some(run) = self.run.as_mut() {
                    run.assemblies.push(assembly);
                }
                Tag::Assembly
            }
            (Some(Tag::Assembly), "collection") => {
                if let Some(assembly) = self.current_assembly() {
                    assembly.collections.push(XmlCollection::default());
                }
                Tag::Collection
            }
            (Some(Tag::Collection), "test") => {
                let test = decode_test(start, position)?;
                if let Some(collection) = self.current_collection() {
                    collection.tests.push(test);
                }
                Tag::Test
            }
            (Some(Tag::Test), "traits") => Tag::Traits,
            (Some(Tag::Traits), "trait") => {
                let mut xml_trait = XmlTrait::default();
                for_each_attribute(start, position, |key, value| match key {
                    b"name" => xml_trait.name = value,
                    b"value" => xml_trait.value = value,
                    _ => {}
                })?;
                if let Some(test) = self.current_test() {
                    test.traits.push(xml_trait);
                }
                Tag::Trait
            }
            _ => Tag::Other,
        };

        if !is_empty {
            self.stack.push(OpenElement { tag, name });
        }
        Ok(())
    }

    fn close(&mut self) {
        self.stack.pop();
    }

    fn finish(self) -> Result<XmlTestRun, DecodeError> {
        if let Some(open) = self.stack.last() {
            return Err(DecodeError::UnexpectedEof {
                name: open.name.clone(),
            });
        }
        self.run.ok_or(DecodeError::MissingRoot)
    }

    fn current_assembly(&mut self) -> Option<&mut XmlAssembly> {
        self.run.as_mut()?.assemblies.last_mut()
    }

    fn current_collection(&mut self) -> Option<&mut XmlCollection> {
        self.current_assembly()?.collections.last_mut()
    }

    fn current_test(&mut self) -> Option<&mut XmlTest> {
        self.current_collection()?.tests.last_mut()
    }
}

fn decode_test_run(start: &BytesStart<'_>, position: usize) -> Result<XmlTestRun, DecodeError> {
    let mut run = XmlTestRun::default();
    for_each_attribute(start, position, |key, value| match key {
        b"computer" => run.computer = value,
        b"user" => run.user = value,
        b"timestamp" => run.timestamp = value,
        b"start-rtf" => run.start_rtf = value,
        b"finish-rtf" => run.finish_rtf = value,
        _ => {}
    })?;
    Ok(run)
}

fn decode_assembly(start: &BytesStart<'_>, position: usize) -> Result<XmlAssembly, DecodeError> {
    let mut assembly = XmlAssembly::default();
    for_each_attribute(start, position, |key, value| match key {
        b"name" => assembly.name = value,
        b"errors" => assembly.errors = parse_count(&value),
        b"failed" => assembly.failed = parse_count(&value),
        b"passed" => assembly.passed = parse_count(&value),
        b"not-run" => assembly.not_run = parse_count(&value),
        b"total" => assembly.total = parse_count(&value),
        b"run-date" => assembly.run_date = value,
        b"run-time" => assembly.run_time = value,
        b"time" => assembly.time = parse_time(&value),
        b"time-rtf" => assembly.time_rtf = value,
        _ => {}
    })?;
    Ok(assembly)
}

fn decode_test(start: &BytesStart<'_>, position: usize) -> Result<XmlTest, DecodeError> {
    let mut test = XmlTest::default();
    for_each_attribute(start, position, |key, value| match key {
        b"name" => test.name = value,
        b"type" => test.ty = value,
        b"result" => test.result = value,
        b"time" => test.time = parse_time(&value),
        _ => {}
    })?;
    Ok(test)
}

// Duplicate attributes are accepted, and the last one wins.
fn for_each_attribute(
    start: &BytesStart<'_>,
    position: usize,
    mut f: impl FnMut(&[u8], String),
) -> Result<(), DecodeError> {
    let xml_error = move |error: quick_xml::Error| DecodeError::Xml { position, error };

    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|error| xml_error(error.into()))?;
        let value = attr.unescape_value().map_err(xml_error)?;
        f(attr.key.as_ref(), value.into_owned());
    }
    Ok(())
}

fn parse_count(value: &str) -> usize {
    value.trim().parse().unwrap_or_default()
}

// Times are written as (fractional) seconds.
fn parse_time(value: &str) -> Duration {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or_default()
}
