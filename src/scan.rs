// File: scan.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::getstate::ScanState;
use crate::pool::WorkerPool;
use crate::probe::Prober;
use crate::probelog::ProbeLog;
use crate::report::Collector;
use crate::resolver::{
    HickoryResolver, NameResolver, OverrideResolver, ResolverAdapter, StaticResolver,
};
use crate::target::{parse_line, ProbeTarget};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// What a finished scan hands back to its caller.
#[derive(Debug)]
pub struct ScanOutcome<W> {
    pub state: ScanState,
    pub output: W,
    /// Set when reading input stopped early. Targets queued before the
    /// error were still probed and written.
    pub input_error: Option<io::Error>,
}

/// Builds the resolver described by the configuration: the DNS endpoint,
/// with any `--resolve` overrides layered on top.
pub fn build_resolver(config: &ConfigParameter) -> Arc<dyn NameResolver> {
    let hickory = HickoryResolver::new(config.resolver());
    log::debug!("Using DNS resolver at {}", hickory.endpoint());
    let dns: Arc<dyn NameResolver> = Arc::new(hickory);

    let mut overrides = StaticResolver::new();
    for (name, ip) in config.overrides() {
        overrides.push(name.as_str(), *ip);
    }
    if overrides.is_empty() {
        return dns;
    }
    Arc::new(OverrideResolver::new(overrides, dns))
}

fn progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {spinner:.cyan} {pos} origins probed ({per_sec})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Reads targets from `input`, probes them on the worker pool and writes
/// one CSV line per target to `output`. Returns once every queued target
/// has been written.
pub async fn run_scan<R, W>(
    config: &ConfigParameter,
    resolver: Arc<dyn NameResolver>,
    log: Arc<ProbeLog>,
    input: R,
    output: W,
) -> Result<ScanOutcome<W>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let prober = Prober::new(config, ResolverAdapter::new(resolver), log)?;
    let pool = WorkerPool::new(prober, config.workers());
    log::debug!("Starting scan with {} workers", pool.workers());

    let (job_tx, job_rx) = mpsc::channel(1);
    let (result_tx, result_rx) = mpsc::channel(1);
    let mut collector =
        Collector::new(output, config.fields()).with_progress(progress_bar(config.progress()));

    let ((mut state, input_error), _, drained) = tokio::join!(
        feed(input, job_tx),
        pool.run(job_rx, result_tx),
        collector.drain(result_rx)
    );
    let written = drained.context("failed to write results")?;

    state.merge_results(&written);
    state.finish();
    if state.queued() != collector.written() {
        log::warn!(
            "{} targets queued but {} results written",
            state.queued(),
            collector.written()
        );
    }

    Ok(ScanOutcome {
        state,
        output: collector.into_inner(),
        input_error,
    })
}

async fn feed<R>(input: R, jobs: mpsc::Sender<ProbeTarget>) -> (ScanState, Option<io::Error>)
where
    R: AsyncBufRead + Unpin,
{
    let mut state = ScanState::new();
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Error reading input: {}", e);
                return (state, Some(e));
            }
        };

        match parse_line(&line) {
            Ok(target) => {
                if jobs.send(target).await.is_err() {
                    log::warn!("Worker pool stopped accepting targets");
                    break;
                }
                state.add_queued();
            }
            Err(e) => {
                eprintln!("{}", e);
                state.add_malformed();
            }
        }
    }
    (state, None)
}
