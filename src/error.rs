// File: error.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::path::PathBuf;
use thiserror::Error;

/// Problems detected while turning command line flags into a run
/// configuration. Any of these stops the run before input is read.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("-workers must be a positive number")]
    InvalidWorkers,

    #[error("invalid resolver address '{0}': expected IP or IP:PORT")]
    InvalidResolver(String),

    #[error("invalid --resolve entry '{0}': expected NAME=IP")]
    InvalidOverride(String),

    #[error("invalid Via header value '{0}'")]
    InvalidVia(String),

    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("failed to create log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("failed to resolve {name}: {message}")]
    Lookup { name: String, message: String },

    #[error("failed to get any IPs for {name}")]
    NoAddresses { name: String },
}

impl ResolveError {
    pub fn lookup(name: impl Into<String>, message: impl ToString) -> Self {
        ResolveError::Lookup {
            name: name.into(),
            message: message.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResolveError::Lookup { name, .. } => name,
            ResolveError::NoAddresses { name } => name,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Bad line: {0}")]
    BadLine(String),
}
