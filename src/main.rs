/*
Copyright 2022 Volker Schwaberow <volker@schwaberow.de>
Permission is hereby granted, free of charge, to any person obtaining a
copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including without
limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the
Software is furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.
Author(s): Volker Schwaberow
*/

use anyhow::{Context, Result};
use clap::Parser;
use simple_logger::SimpleLogger;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use viascan::cli::Cli;
use viascan::config::ConfigParameter;
use viascan::probelog::ProbeLog;
use viascan::scan;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = ConfigParameter::from_cli(&cli)?;

    SimpleLogger::new()
        .with_level(config.log_level())
        .init()
        .context("failed to initialise logging")?;

    let log = match config.log_file() {
        Some(path) => ProbeLog::create(path)?,
        None => ProbeLog::disabled(),
    };
    let resolver = scan::build_resolver(&config);

    let outcome = scan::run_scan(
        &config,
        resolver,
        Arc::new(log),
        BufReader::new(tokio::io::stdin()),
        io::stdout(),
    )
    .await?;

    if !config.suppress_stats() {
        eprintln!("{}", outcome.state.summary());
    }

    if let Some(e) = outcome.input_error {
        eprintln!("Error reading input: {}", e);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
