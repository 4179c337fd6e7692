// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use seesharp::SeeSharpApp;
use std::io::{BufWriter, Write};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    let opts = SeeSharpApp::parse();
    let output = opts.init_output();

    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match opts.exec(output, &mut writer) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            // Keep whatever was written so far ahead of the error message.
            let _ = writer.flush();
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}
