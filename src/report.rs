// File: report.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::getstate::ScanState;
use crate::probe::ProbeResult;
use indicatif::ProgressBar;
use std::io::{self, Write};
use tokio::sync::mpsc;

/// Header line emitted before the first result when requested.
pub const FIELDS: &str = "origin,host,resolves,noVia,via,noViaSize,viaSize,noViaEncoding,viaEncoding,noViaServer,viaServer";

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders one result as a CSV line without the trailing newline.
pub fn render(result: &ProbeResult) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{}",
        escape_csv(result.origin()),
        escape_csv(result.host_header()),
        result.resolved(),
        result.no_via().outcome,
        result.via().outcome,
        result.no_via().body_size,
        result.via().body_size,
        escape_csv(&result.no_via().content_encoding),
        escape_csv(&result.via().content_encoding),
        escape_csv(&result.no_via().server),
        escape_csv(&result.via().server),
    )
}

/// Drains the result channel into a writer, one line per result.
pub struct Collector<W: Write> {
    writer: W,
    fields: bool,
    written: usize,
    progress: ProgressBar,
}

impl<W: Write> Collector<W> {
    pub fn new(writer: W, fields: bool) -> Self {
        Collector {
            writer,
            fields,
            written: 0,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn emit(&mut self, result: &ProbeResult) -> io::Result<()> {
        if self.fields && self.written == 0 {
            writeln!(self.writer, "{}", FIELDS)?;
        }
        writeln!(self.writer, "{}", render(result))?;
        self.written += 1;
        self.progress.inc(1);
        Ok(())
    }

    /// Consumes results until every sender is gone. Returns the tallies of
    /// what was written.
    pub async fn drain(
        &mut self,
        mut results: mpsc::Receiver<ProbeResult>,
    ) -> io::Result<ScanState> {
        let mut state = ScanState::new();
        while let Some(result) = results.recv().await {
            state.record(&result);
            self.emit(&result)?;
        }
        self.writer.flush()?;
        self.progress.finish_and_clear();
        Ok(state)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
