// File: target.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::InputError;
use std::net::IpAddr;

/// One line of input: the Host header to send and the origin to connect to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    host_header: String,
    origin: String,
}

impl ProbeTarget {
    pub fn new(host_header: impl Into<String>, origin: impl Into<String>) -> Self {
        ProbeTarget {
            host_header: host_header.into(),
            origin: origin.into(),
        }
    }

    pub fn host_header(&self) -> &str {
        &self.host_header
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The origin as an IP literal, if it is one.
    pub fn origin_ip(&self) -> Option<IpAddr> {
        self.origin.parse().ok()
    }
}

/// Parses a `hostHeader,origin` line. Anything that does not split into
/// exactly two comma separated fields is rejected.
pub fn parse_line(line: &str) -> Result<ProbeTarget, InputError> {
    let mut parts = line.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(host_header), Some(origin), None) => Ok(ProbeTarget::new(host_header, origin)),
        _ => Err(InputError::BadLine(line.to_string())),
    }
}
