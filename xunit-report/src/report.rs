// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::DecodeError,
    paths::file_name,
    sentence::to_sentence,
    words::split_words,
    xml::{
        decode_xml, without_parameters, XmlAssembly, XmlCollection, XmlTest, XmlTestRun, XmlTrait,
    },
};
use serde::{Serialize, Serializer};
use std::{
    collections::BTreeMap,
    fmt,
    io::{self, BufReader},
    iter,
    time::Duration,
};
use tracing::debug;

/// Decodes an xUnit v2 XML document from `reader` into a [`TestRun`].
///
/// This is the same as [`TestRun::from_reader`].
pub fn decode(reader: impl io::Read) -> Result<TestRun, DecodeError> {
    TestRun::from_reader(reader)
}

/// The root of a report: a single run of one or more test assemblies.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestRun {
    /// The name of the computer the tests ran on.
    pub computer: String,

    /// The name of the user who ran the tests.
    pub user: String,

    /// The time at which the run started, in round-trip (ISO 8601) format.
    pub start_rtf: String,

    /// The time at which the run finished, in round-trip (ISO 8601) format.
    pub finish_rtf: String,

    /// The time at which the run finished, in local time.
    ///
    /// Older runners only write this, and not `finish_rtf`.
    pub timestamp: String,

    /// The assemblies that were run, in document order.
    pub assemblies: Vec<Assembly>,
}

impl TestRun {
    /// Decodes an xUnit v2 XML document from `reader`.
    ///
    /// The reader is buffered internally.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, DecodeError> {
        decode_xml(BufReader::new(reader)).map(Self::from_xml)
    }

    /// Decodes an xUnit v2 XML document held in memory.
    pub fn from_xml_str(input: &str) -> Result<Self, DecodeError> {
        decode_xml(input.as_bytes()).map(Self::from_xml)
    }

    /// Returns true if any assembly in this run reported failures.
    pub fn has_failures(&self) -> bool {
        self.assemblies.iter().any(Assembly::has_failures)
    }

    fn from_xml(run: XmlTestRun) -> Self {
        let XmlTestRun {
            computer,
            user,
            timestamp,
            start_rtf,
            finish_rtf,
            assemblies,
        } = run;

        Self {
            computer,
            user,
            start_rtf,
            finish_rtf,
            timestamp,
            assemblies: assemblies.into_iter().map(Assembly::from_xml).collect(),
        }
    }
}

/// The run of a single test assembly.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Assembly {
    /// The file name of the assembly, without its directory.
    pub name: String,

    /// The number of errors that happened outside of tests (for example in fixtures).
    pub errors: usize,

    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped.
    pub not_run: usize,

    /// The total number of tests.
    pub total: usize,

    /// The date at which the assembly was run, as written by the runner.
    pub run_date: String,

    /// The time of day at which the assembly was run, as written by the runner.
    pub run_time: String,

    /// The time it took to run the assembly.
    #[serde(serialize_with = "serialize_secs")]
    pub time: Duration,

    /// The time it took to run the assembly, in the runner's own format.
    pub time_rtf: String,

    /// The tests of this assembly, grouped by trait.
    ///
    /// Groups are sorted by name. Tests without traits are in the group with an empty name,
    /// which comes first.
    pub test_groups: Vec<TestGroup>,
}

impl Assembly {
    /// Returns true if any test failed or any error occurred.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errors > 0
    }

    fn from_xml(assembly: XmlAssembly) -> Self {
        let name = file_name(&assembly.name).to_owned();
        let test_groups = group_tests(&assembly.collections);
        debug!(
            "assembly {name}: {} tests in {} groups",
            test_groups.iter().map(TestGroup::test_count).sum::<usize>(),
            test_groups.len(),
        );

        Self {
            name,
            errors: assembly.errors,
            passed: assembly.passed,
            failed: assembly.failed,
            not_run: assembly.not_run,
            total: assembly.total,
            run_date: assembly.run_date,
            run_time: assembly.run_time,
            time: assembly.time,
            time_rtf: assembly.time_rtf,
            test_groups,
        }
    }
}

/// A named group of tests, which may contain nested groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TestGroup {
    /// The name of this group.
    ///
    /// This is empty for the group of tests without traits.
    pub name: String,

    /// The tests directly in this group.
    pub tests: Vec<TestCase>,

    /// The groups nested in this group, in order of first appearance.
    pub groups: Vec<TestGroup>,
}

impl TestGroup {
    /// Creates a new, empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: vec![],
            groups: vec![],
        }
    }

    /// Returns the number of tests in this group and all nested groups.
    pub fn test_count(&self) -> usize {
        self.tests.len() + self.groups.iter().map(TestGroup::test_count).sum::<usize>()
    }

    /// Returns true if neither this group nor any nested group contains a test.
    pub fn is_empty(&self) -> bool {
        self.test_count() == 0
    }

    /// Adds `test` to the group at `path` below this one, creating groups as needed.
    fn insert(&mut self, path: &[String], test: TestCase) {
        let Some((head, rest)) = path.split_first() else {
            self.tests.push(test);
            return;
        };

        let idx = match self.groups.iter().position(|group| &group.name == head) {
            Some(idx) => idx,
            None => {
                self.groups.push(TestGroup::new(head.clone()));
                self.groups.len() - 1
            }
        };
        self.groups[idx].insert(rest, test);
    }
}

/// A single test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// The human-readable name of this test.
    pub name: String,

    /// The outcome of this test.
    pub result: TestResult,

    /// The time it took to run this test.
    #[serde(serialize_with = "serialize_secs")]
    pub time: Duration,
}

impl TestCase {
    fn from_xml(test: &XmlTest) -> Self {
        Self {
            name: friendly_name(test),
            result: TestResult::from(test.result.as_str()),
            time: test.time,
        }
    }
}

/// The outcome of a test, as reported by the runner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestResult {
    /// The test passed.
    Pass,

    /// The test failed.
    Fail,

    /// The test was skipped.
    Skip,

    /// The test was not run, for example because it was filtered out explicitly.
    NotRun,

    /// A result this crate doesn't know about, kept verbatim. Empty if the runner didn't write
    /// one.
    Other(String),
}

impl TestResult {
    /// Returns the result as written in xUnit XML.
    pub fn as_str(&self) -> &str {
        match self {
            TestResult::Pass => "Pass",
            TestResult::Fail => "Fail",
            TestResult::Skip => "Skip",
            TestResult::NotRun => "NotRun",
            TestResult::Other(result) => result,
        }
    }
}

impl From<&str> for TestResult {
    fn from(result: &str) -> Self {
        match result {
            "Pass" => TestResult::Pass,
            "Fail" => TestResult::Fail,
            "Skip" => TestResult::Skip,
            "NotRun" => TestResult::NotRun,
            other => TestResult::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn serialize_secs<S: Serializer>(time: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(time.as_secs_f64())
}

// ---
// Grouping
// ---

/// Groups the tests of all `collections` by trait, then by the types they're nested in.
fn group_tests(collections: &[XmlCollection]) -> Vec<TestGroup> {
    let mut by_trait: BTreeMap<String, TestGroup> = BTreeMap::new();

    for test in collections.iter().flat_map(|collection| &collection.tests) {
        let path = group_path(test);
        let case = TestCase::from_xml(test);

        let keys: Vec<String> = if test.traits.is_empty() {
            vec![String::new()]
        } else {
            test.traits.iter().map(trait_name).collect()
        };

        for key in keys {
            by_trait
                .entry(key)
                .or_insert_with_key(|key| TestGroup::new(key.clone()))
                .insert(&path, case.clone());
        }
    }

    by_trait.into_values().collect()
}

fn trait_name(xml_trait: &XmlTrait) -> String {
    format!("{} - {}", xml_trait.name, xml_trait.value)
}

/// Returns the human-readable name of `test`.
///
/// Display names are used as is. Otherwise the method name is taken from the fully qualified
/// name and turned into a sentence.
fn friendly_name(test: &XmlTest) -> String {
    if test.has_display_name() {
        return test.name.clone();
    }

    let name = without_parameters(&test.name);
    let method = name.rsplit(['.', '+']).next().unwrap_or(name);
    humanize(method)
}

/// Returns the names of the groups a nested test belongs to, outermost first.
///
/// For `Ns.Outer+Inner+Innermost.Method` this is the humanized form of `Outer`, `Inner` and
/// `Innermost`. Tests that aren't nested don't belong to any group.
fn group_path(test: &XmlTest) -> Vec<String> {
    if !test.is_nested() {
        return Vec::new();
    }

    let segments: Vec<&str> = without_parameters(&test.name).split('+').collect();
    let Some((first, rest)) = segments.split_first() else {
        return Vec::new();
    };
    let Some((last, interior)) = rest.split_last() else {
        return Vec::new();
    };

    let outermost = first.rsplit_once('.').map_or(*first, |(_, ty)| ty);
    let innermost = last.rsplit_once('.').map_or(*last, |(ty, _)| ty);

    iter::once(outermost)
        .chain(interior.iter().copied())
        .chain(iter::once(innermost))
        .map(humanize)
        .collect()
}

fn humanize(identifier: &str) -> String {
    to_sentence(&split_words(identifier), &[])
}
