// File: probe.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::error::ConfigError;
use crate::pool::Probe;
use crate::probelog::ProbeLog;
use crate::resolver::ResolverAdapter;
use crate::target::ProbeTarget;
use crate::tristate::TriState;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING, HOST, SERVER, VIA,
};
use reqwest::redirect::Policy;
use reqwest::{Client, Request, Url};
use std::error::Error as StdError;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

pub const ACCEPT_ENCODING_VALUE: &str = "gzip,deflate";
pub const DEFAULT_VIA: &str = "viascan 1.0";

/// What one HTTP attempt against an origin produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhaseResult {
    pub outcome: TriState,
    pub body_size: usize,
    pub content_encoding: String,
    pub server: String,
}

impl PhaseResult {
    pub fn failed() -> Self {
        PhaseResult {
            outcome: TriState::Failed,
            ..Default::default()
        }
    }

    pub fn succeeded(
        body_size: usize,
        content_encoding: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        PhaseResult {
            outcome: TriState::Succeeded,
            body_size,
            content_encoding: content_encoding.into(),
            server: server.into(),
        }
    }
}

/// Outcome of the paired probe for one target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeResult {
    origin: String,
    host_header: String,
    resolved: TriState,
    no_via: PhaseResult,
    via: PhaseResult,
}

impl ProbeResult {
    pub fn new(target: &ProbeTarget) -> Self {
        ProbeResult {
            origin: target.origin().to_string(),
            host_header: target.host_header().to_string(),
            resolved: TriState::NotRun,
            no_via: PhaseResult::default(),
            via: PhaseResult::default(),
        }
    }

    pub fn from_parts(
        target: &ProbeTarget,
        resolved: TriState,
        no_via: PhaseResult,
        via: PhaseResult,
    ) -> Self {
        ProbeResult {
            resolved,
            no_via,
            via,
            ..ProbeResult::new(target)
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn host_header(&self) -> &str {
        &self.host_header
    }

    pub fn resolved(&self) -> TriState {
        self.resolved
    }

    pub fn no_via(&self) -> &PhaseResult {
        &self.no_via
    }

    pub fn via(&self) -> &PhaseResult {
        &self.via
    }
}

/// Runs the no-Via / Via comparison against one origin at a time.
///
/// Each call to [`Prober::probe`] builds its own HTTP client, so concurrent
/// probes never share a connection.
#[derive(Clone)]
pub struct Prober {
    resolver: ResolverAdapter,
    log: Arc<ProbeLog>,
    port: u16,
    via: HeaderValue,
    timeout: Option<Duration>,
    dump: bool,
}

impl Prober {
    pub fn new(
        config: &ConfigParameter,
        resolver: ResolverAdapter,
        log: Arc<ProbeLog>,
    ) -> Result<Self, ConfigError> {
        let via = HeaderValue::from_str(config.via())
            .map_err(|_| ConfigError::InvalidVia(config.via().to_string()))?;
        Ok(Prober {
            resolver,
            log,
            port: config.port(),
            via,
            timeout: config.timeout().map(Duration::from_secs),
            dump: config.dump(),
        })
    }

    pub async fn probe(&self, target: ProbeTarget) -> ProbeResult {
        let mut result = ProbeResult::new(&target);
        let origin = target.origin();

        let resolution = match target.origin_ip() {
            Some(_) => Ok(()),
            None => self.resolver.check(origin).await,
        };
        result.resolved = TriState::from_success(resolution.is_ok());
        if let Err(e) = resolution {
            self.log.log(origin, format_args!("Error resolving name: {}", e));
            return result;
        }

        let (client, url, mut headers) = match self.prepare(&target) {
            Ok(prepared) => prepared,
            Err(message) => {
                self.log.log(origin, format_args!("Failed to build request: {}", message));
                result.no_via = PhaseResult::failed();
                return result;
            }
        };

        result.no_via = self.fetch(&client, &url, headers.clone(), origin).await;
        if !result.no_via.outcome.succeeded() {
            return result;
        }

        headers.insert(VIA, self.via.clone());
        result.via = self.fetch(&client, &url, headers, origin).await;
        result
    }

    fn prepare(&self, target: &ProbeTarget) -> Result<(Client, Url, HeaderMap), String> {
        let mut builder = Client::builder()
            .no_gzip()
            .no_deflate()
            .no_brotli()
            .no_proxy()
            .redirect(Policy::none())
            .pool_max_idle_per_host(0)
            .dns_resolver(Arc::new(self.resolver.clone()));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(error_chain)?;

        let url = origin_url(target.origin(), self.port)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
        let host = HeaderValue::from_str(target.host_header())
            .map_err(|_| format!("invalid Host header value '{}'", target.host_header()))?;
        headers.insert(HOST, host);

        Ok((client, url, headers))
    }

    async fn fetch(
        &self,
        client: &Client,
        url: &Url,
        headers: HeaderMap,
        origin: &str,
    ) -> PhaseResult {
        let request = match client.get(url.clone()).headers(headers).build() {
            Ok(request) => request,
            Err(e) => {
                self.log.log(
                    origin,
                    format_args!("Failed to build request: {}", error_chain(e)),
                );
                return PhaseResult::failed();
            }
        };
        let description = describe(&request);

        if self.dump {
            eprintln!("{:#?}", request);
        }
        let response = client.execute(request).await;

        let mut response = match response {
            Ok(response) => response,
            Err(e) => {
                if self.dump {
                    eprintln!("{:#?}", e);
                }
                self.log.log(
                    origin,
                    format_args!("HTTP request {} failed: {}", description, error_chain(e)),
                );
                return PhaseResult::failed();
            }
        };
        if self.dump {
            eprintln!("{:#?}", response);
        }

        let content_encoding = header_string(response.headers(), &CONTENT_ENCODING);
        let server = header_string(response.headers(), &SERVER);

        let mut body_size = 0;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body_size += chunk.len(),
                Ok(None) => break,
                Err(e) => {
                    self.log.log(
                        origin,
                        format_args!(
                            "Reading body of {} failed after {} bytes: {}",
                            description,
                            body_size,
                            error_chain(e)
                        ),
                    );
                    break;
                }
            }
        }

        PhaseResult::succeeded(body_size, content_encoding, server)
    }
}

impl Probe for Prober {
    async fn probe(&self, target: ProbeTarget) -> ProbeResult {
        Prober::probe(self, target).await
    }
}

fn origin_url(origin: &str, port: u16) -> Result<Url, String> {
    let authority = match origin.parse::<IpAddr>() {
        Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, port),
        _ => format!("{}:{}", origin, port),
    };
    Url::parse(&format!("http://{}/", authority))
        .map_err(|e| format!("invalid origin '{}': {}", origin, e))
}

fn header_string(headers: &HeaderMap, name: &HeaderName) -> String {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default()
}

fn describe(request: &Request) -> String {
    format!("{} {} {:?}", request.method(), request.url(), request.headers())
}

/// Renders `error` and all of its sources as `outer: inner: ...`.
fn error_chain<E>(error: E) -> String
where
    E: StdError + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(error))
}
