// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023
// - Volker Schwaberow <volker@schwaberow.de>

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::pool::DEFAULT_WORKERS;
use crate::probe::DEFAULT_VIA;
use crate::resolver::DEFAULT_DNS_PORT;
use log::LevelFilter;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ConfigParameter {
    resolver: SocketAddr,
    workers: usize,
    dump: bool,
    fields: bool,
    log_file: Option<PathBuf>,
    port: u16,
    via: String,
    timeout: Option<u64>,
    overrides: Vec<(String, IpAddr)>,
    log_level: LevelFilter,
    progress: bool,
    suppress_stats: bool,
}

impl ConfigParameter {
    pub fn new() -> Self {
        Self {
            resolver: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_DNS_PORT),
            workers: DEFAULT_WORKERS,
            dump: false,
            fields: false,
            log_file: None,
            port: 80,
            via: DEFAULT_VIA.to_string(),
            timeout: None,
            overrides: Vec::new(),
            log_level: LevelFilter::Warn,
            progress: false,
            suppress_stats: false,
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.set_resolver(parse_resolver(&cli.resolver)?);
        config.set_workers(parse_workers(cli.workers)?);
        config.set_dump(cli.dump);
        config.set_fields(cli.fields);
        config.set_log_file(cli.log.clone());
        config.set_port(cli.port);
        config.set_via(cli.via.clone());
        config.set_timeout(cli.timeout);
        for entry in &cli.resolve {
            let (name, ip) = parse_override(entry)?;
            config.add_override(name, ip);
        }
        config.set_log_level(
            LevelFilter::from_str(&cli.log_level)
                .map_err(|_| ConfigError::InvalidLogLevel(cli.log_level.clone()))?,
        );
        config.set_progress(cli.progress);
        config.set_suppress_stats(cli.suppress_stats);
        Ok(config)
    }

    pub fn set_resolver(&mut self, resolver: SocketAddr) {
        self.resolver = resolver;
    }

    pub fn resolver(&self) -> SocketAddr {
        self.resolver
    }

    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers;
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn set_dump(&mut self, dump: bool) {
        self.dump = dump;
    }

    pub fn dump(&self) -> bool {
        self.dump
    }

    pub fn set_fields(&mut self, fields: bool) {
        self.fields = fields;
    }

    pub fn fields(&self) -> bool {
        self.fields
    }

    pub fn set_log_file(&mut self, log_file: Option<PathBuf>) {
        self.log_file = log_file;
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_via(&mut self, via: String) {
        self.via = via;
    }

    pub fn via(&self) -> &str {
        &self.via
    }

    pub fn set_timeout(&mut self, timeout: Option<u64>) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    pub fn add_override(&mut self, name: String, ip: IpAddr) {
        self.overrides.push((name, ip));
    }

    pub fn overrides(&self) -> &[(String, IpAddr)] {
        &self.overrides
    }

    pub fn set_log_level(&mut self, log_level: LevelFilter) {
        self.log_level = log_level;
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn set_progress(&mut self, progress: bool) {
        self.progress = progress;
    }

    pub fn progress(&self) -> bool {
        self.progress
    }

    pub fn suppress_stats(&self) -> bool {
        self.suppress_stats
    }

    pub fn set_suppress_stats(&mut self, suppress_stats: bool) {
        self.suppress_stats = suppress_stats;
    }
}

impl Default for ConfigParameter {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts `IP`, `IP:PORT` and `[IPv6]:PORT`. Port 53 when none is given.
pub fn parse_resolver(value: &str) -> Result<SocketAddr, ConfigError> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    let bare = value.trim_start_matches('[').trim_end_matches(']');
    bare.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| ConfigError::InvalidResolver(value.to_string()))
}

pub fn parse_workers(workers: i64) -> Result<usize, ConfigError> {
    if workers < 1 {
        return Err(ConfigError::InvalidWorkers);
    }
    usize::try_from(workers).map_err(|_| ConfigError::InvalidWorkers)
}

pub fn parse_override(value: &str) -> Result<(String, IpAddr), ConfigError> {
    let invalid = || ConfigError::InvalidOverride(value.to_string());
    let (name, ip) = value.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let ip = ip.trim().parse::<IpAddr>().map_err(|_| invalid())?;
    Ok((name.to_string(), ip))
}
