// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::probe::DEFAULT_VIA;
use clap::Parser;
use std::path::PathBuf;

/// Reads `host,origin` lines on stdin and writes one CSV line per target.
#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(
        long = "resolver",
        default_value = "127.0.0.1",
        help = "DNS resolver address (IP or IP:PORT)"
    )]
    pub resolver: String,

    #[arg(
        short = 'w',
        long = "workers",
        default_value_t = 10,
        allow_negative_numbers = true,
        help = "Number of concurrent workers"
    )]
    pub workers: i64,

    #[arg(long = "dump", help = "Dump requests and responses for debugging")]
    pub dump: bool,

    #[arg(
        long = "fields",
        help = "If set outputs a header line containing field names"
    )]
    pub fields: bool,

    #[arg(long = "log", help = "File to write log information to")]
    pub log: Option<PathBuf>,

    #[arg(
        short = 'p',
        long = "port",
        default_value_t = 80,
        help = "Port to connect to on each origin"
    )]
    pub port: u16,

    #[arg(
        long = "via",
        default_value = DEFAULT_VIA,
        help = "Value sent in the Via header"
    )]
    pub via: String,

    #[arg(
        short = 't',
        long = "timeout",
        help = "HTTP request timeout in seconds (no timeout when unset)"
    )]
    pub timeout: Option<u64>,

    #[arg(
        long = "resolve",
        value_name = "NAME=IP",
        help = "Resolve NAME to IP without asking the DNS resolver (repeatable)"
    )]
    pub resolve: Vec<String>,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    #[arg(long = "progress", help = "Show progress on stderr")]
    pub progress: bool,

    #[arg(
        short = 's',
        long = "suppress-stats",
        help = "Suppress scan summary and statistics"
    )]
    pub suppress_stats: bool,
}
