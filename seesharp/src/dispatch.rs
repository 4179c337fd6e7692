// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    display::{ReportDisplayer, SpeedThresholds},
    errors::{ExpectedError, Result},
    exit_codes::SeeSharpExitCode,
    output::{OutputContext, OutputOpts},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, ValueEnum};
use std::{io::Write, time::Duration};
use tracing::debug;
use xunit_report::TestRun;

/// Summarize an xUnit v2 XML test report.
///
/// Reads the report written by `dotnet test --logger xunit` (or the xUnit console runner) and
/// prints its tests grouped by trait and nested class.
#[derive(Debug, Parser)]
#[command(
    version,
    bin_name = "seesharp",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct SeeSharpApp {
    /// Path to the xUnit v2 XML report, or `-` to read from standard input
    #[arg(value_name = "PATH", default_value = "data.xml")]
    input: Utf8PathBuf,

    #[command(flatten)]
    output: OutputOpts,

    #[command(flatten)]
    report: ReportOpts,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Report options")]
struct ReportOpts {
    /// Output format
    #[arg(long, value_enum, default_value_t, value_name = "FORMAT")]
    message_format: MessageFormat,

    /// Tests at or below this duration are marked as fast
    #[arg(
        long,
        value_name = "DURATION",
        default_value = "50ms",
        value_parser = humantime::parse_duration,
    )]
    fast_threshold: Duration,

    /// Tests at or below this duration (and above the fast threshold) are marked as moderate
    #[arg(
        long,
        value_name = "DURATION",
        default_value = "100ms",
        value_parser = humantime::parse_duration,
    )]
    slow_threshold: Duration,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum MessageFormat {
    /// A colorized tree of groups and tests
    #[default]
    Human,
    /// The decoded report as JSON
    Json,
}

impl SeeSharpApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, writing the report to `writer`.
    pub fn exec(self, output: OutputContext, writer: &mut dyn Write) -> Result<i32> {
        let thresholds =
            SpeedThresholds::new(self.report.fast_threshold, self.report.slow_threshold)?;

        let (input_name, run) = read_report(&self.input)?;
        debug!(
            "decoded {} assemblies from {}",
            run.assemblies.len(),
            input_name
        );

        match self.report.message_format {
            MessageFormat::Human => {
                let mut displayer = ReportDisplayer::new(&input_name, thresholds);
                if output.color.should_colorize(supports_color::Stream::Stdout) {
                    displayer.colorize();
                }
                displayer
                    .write(&run, writer)
                    .map_err(|err| ExpectedError::WriteError { err })?;
            }
            MessageFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, &run)
                    .map_err(|err| ExpectedError::JsonError { err })?;
                writeln!(writer).map_err(|err| ExpectedError::WriteError { err })?;
            }
        }

        writer
            .flush()
            .map_err(|err| ExpectedError::WriteError { err })?;

        Ok(SeeSharpExitCode::OK)
    }
}

fn read_report(input: &Utf8Path) -> Result<(String, TestRun)> {
    if input.as_str() == "-" {
        let input_name = "<stdin>".to_owned();
        let run = xunit_report::decode(std::io::stdin().lock()).map_err(|err| {
            ExpectedError::DecodeError {
                input: input_name.clone(),
                err,
            }
        })?;
        return Ok((input_name, run));
    }

    let file = fs_err::File::open(input).map_err(|err| ExpectedError::InputReadError {
        path: input.to_owned(),
        err,
    })?;
    let run = TestRun::from_reader(file).map_err(|err| ExpectedError::DecodeError {
        input: input.to_string(),
        err,
    })?;
    Ok((input.to_string(), run))
}
