// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable rendering of a [`TestRun`].

use crate::errors::{ExpectedError, Result};
use owo_colors::{style, OwoColorize, Style, Styled};
use std::{io, time::Duration};
use xunit_report::{Assembly, TestGroup, TestResult, TestRun};

/// Durations used to pick the speed marker shown next to each test.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SpeedThresholds {
    fast: Duration,
    slow: Duration,
}

impl SpeedThresholds {
    pub(crate) fn new(fast: Duration, slow: Duration) -> Result<Self> {
        if fast > slow {
            return Err(ExpectedError::InvalidThresholds { fast, slow });
        }
        Ok(Self { fast, slow })
    }

    fn marker(&self, time: Duration) -> &'static str {
        if time <= self.fast {
            "🚀"
        } else if time <= self.slow {
            "🕐"
        } else {
            "🐌"
        }
    }
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self {
            fast: Duration::from_millis(50),
            slow: Duration::from_millis(100),
        }
    }
}

/// Writes a [`TestRun`] as an indented tree of groups and tests.
#[derive(Debug)]
pub(crate) struct ReportDisplayer<'a> {
    input: &'a str,
    thresholds: SpeedThresholds,
    styles: Styles,
}

impl<'a> ReportDisplayer<'a> {
    pub(crate) fn new(input: &'a str, thresholds: SpeedThresholds) -> Self {
        Self {
            input,
            thresholds,
            styles: Styles::default(),
        }
    }

    pub(crate) fn colorize(&mut self) {
        self.styles.colorize();
    }

    pub(crate) fn write(&self, run: &TestRun, writer: &mut dyn io::Write) -> io::Result<()> {
        writeln!(writer, "{:<22}{}", "Input source:", self.input)?;
        writeln!(writer, "{:<22}{}", "Amount of assemblies:", run.assemblies.len())?;

        write_if_present(writer, "Computer:", &run.computer)?;
        write_if_present(writer, "User:", &run.user)?;
        write_if_present(writer, "Start time:", &run.start_rtf)?;
        // Older runners only write a local timestamp.
        if run.finish_rtf.is_empty() {
            write_if_present(writer, "End time:", &run.timestamp)?;
        } else {
            write_if_present(writer, "End time:", &run.finish_rtf)?;
        }

        for assembly in &run.assemblies {
            writeln!(writer)?;
            self.write_assembly(assembly, writer)?;
        }

        Ok(())
    }

    fn write_assembly(&self, assembly: &Assembly, writer: &mut dyn io::Write) -> io::Result<()> {
        writeln!(
            writer,
            "  {:<18}{}",
            "Assembly:",
            assembly.name.style(self.styles.bold)
        )?;

        let status = if assembly.failed > 0 {
            let status = format!(
                "⛌ Failed ({} of {} failed).",
                assembly.failed, assembly.total
            );
            status.style(self.styles.fail).to_string()
        } else {
            let status = format!(
                "✓ Passed ({} of {} passed).",
                assembly.passed, assembly.total
            );
            status.style(self.styles.pass).to_string()
        };
        writeln!(writer, "  {:<18}{}", "Status:", status)?;
        writeln!(
            writer,
            "  {:<18}{} {}",
            "Date / time:", assembly.run_date, assembly.run_time
        )?;
        writeln!(
            writer,
            "  {:<18}{} seconds.",
            "Total time:",
            assembly.time.as_secs_f64()
        )?;

        writeln!(writer)?;
        writeln!(writer, "    {:<16}{}", "# tests:", assembly.total)?;
        writeln!(writer, "    {:<16}{}", "# Passed tests:", assembly.passed)?;
        writeln!(writer, "    {:<16}{}", "# Failed tests:", assembly.failed)?;
        writeln!(writer, "    {:<16}{}", "# Not run:", assembly.not_run)?;
        writeln!(writer, "    {:<16}{}", "# Errors:", assembly.errors)?;
        writeln!(writer)?;

        for group in &assembly.test_groups {
            self.write_group(group, 0, writer)?;
        }

        Ok(())
    }

    fn write_group(
        &self,
        group: &TestGroup,
        indent: usize,
        writer: &mut dyn io::Write,
    ) -> io::Result<()> {
        if !group.name.is_empty() {
            writeln!(
                writer,
                "{:indent$}Group: {}",
                "",
                group.name.style(self.styles.group),
                indent = indent + 1,
            )?;
        }

        for test in &group.tests {
            writeln!(
                writer,
                "{:indent$} {} {} {} ({} seconds)",
                "",
                self.thresholds.marker(test.time),
                self.result_mark(&test.result),
                test.name,
                test.time.as_secs_f64(),
                indent = indent,
            )?;
        }

        if !group.tests.is_empty() {
            writeln!(writer)?;
        }

        for child in &group.groups {
            self.write_group(child, indent + 1, writer)?;
        }

        Ok(())
    }

    fn result_mark(&self, result: &TestResult) -> Styled<&'static str> {
        match result {
            TestResult::Pass => self.styles.pass.style("✓"),
            TestResult::Fail => self.styles.fail.style("⛌"),
            TestResult::Skip | TestResult::NotRun | TestResult::Other(_) => {
                self.styles.skip.style("-")
            }
        }
    }
}

fn write_if_present(writer: &mut dyn io::Write, label: &str, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(writer, "{label:<22}{value}")
}

#[derive(Debug, Default)]
struct Styles {
    bold: Style,
    pass: Style,
    fail: Style,
    skip: Style,
    group: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.bold = style().bold();
        self.pass = style().green().bold();
        self.fail = style().red().bold();
        self.skip = style().yellow();
        self.group = style().bold();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use xunit_report::TestCase;

    fn case(name: &str, result: TestResult, millis: u64) -> TestCase {
        TestCase {
            name: name.to_owned(),
            result,
            time: Duration::from_millis(millis),
        }
    }

    fn render(run: &TestRun) -> String {
        let displayer = ReportDisplayer::new("data.xml", SpeedThresholds::default());
        let mut buf = Vec::new();
        displayer.write(run, &mut buf).expect("writing to a Vec succeeds");
        String::from_utf8(buf).expect("output is UTF-8")
    }

    #[test]
    fn empty_run() {
        let run = TestRun {
            computer: "WIN11".to_owned(),
            timestamp: "07/10/2023 20:53:19".to_owned(),
            ..Default::default()
        };

        let expected = indoc! {"
            Input source:         data.xml
            Amount of assemblies: 0
            Computer:             WIN11
            End time:             07/10/2023 20:53:19
        "};
        assert_eq!(render(&run), expected);
    }

    #[test]
    fn nested_groups() {
        let untraited = TestGroup {
            name: String::new(),
            tests: vec![case("Test method", TestResult::Fail, 250)],
            groups: vec![TestGroup {
                name: "Test class".to_owned(),
                tests: vec![],
                groups: vec![TestGroup {
                    name: "Scenario".to_owned(),
                    tests: vec![case("Result", TestResult::Pass, 0)],
                    groups: vec![],
                }],
            }],
        };
        let unit = TestGroup {
            name: "Category - Unit".to_owned(),
            tests: vec![case("A display name", TestResult::Skip, 75)],
            groups: vec![],
        };

        let run = TestRun {
            start_rtf: "2000-12-01".to_owned(),
            finish_rtf: "2001-12-01".to_owned(),
            timestamp: "ignored".to_owned(),
            assemblies: vec![Assembly {
                name: "app.dll".to_owned(),
                errors: 0,
                passed: 2,
                failed: 1,
                not_run: 1,
                total: 4,
                run_date: "07/10/2023".to_owned(),
                run_time: "20:53:19".to_owned(),
                time: Duration::from_millis(1500),
                time_rtf: String::new(),
                test_groups: vec![untraited, unit],
            }],
            ..Default::default()
        };

        let expected = indoc! {"
            Input source:         data.xml
            Amount of assemblies: 1
            Start time:           2000-12-01
            End time:             2001-12-01

              Assembly:         app.dll
              Status:           ⛌ Failed (1 of 4 failed).
              Date / time:      07/10/2023 20:53:19
              Total time:       1.5 seconds.

                # tests:        4
                # Passed tests: 2
                # Failed tests: 1
                # Not run:      1
                # Errors:       0

             🐌 ⛌ Test method (0.25 seconds)

              Group: Test class
               Group: Scenario
               🚀 ✓ Result (0 seconds)

             Group: Category - Unit
             🕐 - A display name (0.075 seconds)

        "};
        assert_eq!(render(&run), expected);
    }

    #[test_case(0, "🚀" ; "instant")]
    #[test_case(50, "🚀" ; "at fast threshold")]
    #[test_case(51, "🕐" ; "above fast threshold")]
    #[test_case(100, "🕐" ; "at slow threshold")]
    #[test_case(101, "🐌" ; "above slow threshold")]
    fn markers(millis: u64, expected: &str) {
        let thresholds = SpeedThresholds::default();
        assert_eq!(thresholds.marker(Duration::from_millis(millis)), expected);
    }

    #[test]
    fn invalid_thresholds() {
        let err = SpeedThresholds::new(Duration::from_secs(2), Duration::from_secs(1))
            .expect_err("fast above slow is rejected");
        assert!(matches!(err, ExpectedError::InvalidThresholds { .. }));
    }
}
