// File: probelog.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::ConfigError;
use std::fmt;
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Per-origin diagnostic log. Every event becomes one `<origin>: <message>`
/// line in the log file, when one was requested, and is always mirrored to
/// the `log` facade.
#[derive(Debug, Default)]
pub struct ProbeLog {
    file: Option<Mutex<LineWriter<File>>>,
}

impl ProbeLog {
    pub fn disabled() -> Self {
        ProbeLog { file: None }
    }

    pub fn create(path: &Path) -> Result<Self, ConfigError> {
        let file = File::create(path).map_err(|source| ConfigError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ProbeLog {
            file: Some(Mutex::new(LineWriter::new(file))),
        })
    }

    pub fn log(&self, origin: &str, message: impl fmt::Display) {
        log::debug!("{}: {}", origin, message);

        let Some(file) = &self.file else {
            return;
        };
        let mut writer = match file.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{}: {}", origin, message) {
            log::warn!("Failed to write log file: {}", e);
        }
    }
}
