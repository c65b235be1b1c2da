// File: resolver.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

//! Name resolution for probes.
//!
//! Every lookup goes through a [`NameResolver`]. The production resolver
//! talks to one configured DNS endpoint instead of the system resolver, so
//! a scan can be pointed at a test DNS server. [`ResolverAdapter`] is what
//! the prober uses: it answers the "does this name resolve" question and
//! is installed into the HTTP client as the address-selection hook for
//! the actual connection.

use crate::error::ResolveError;
use hickory_resolver::{
    config::{LookupIpStrategy, NameServerConfigGroup, ResolveHosts, ResolverConfig},
    name_server::TokioConnectionProvider,
    TokioResolver,
};
use std::collections::HashMap;
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Future returned by a [`NameResolver`].
pub type Lookup = Pin<Box<dyn Future<Output = Result<Vec<IpAddr>, ResolveError>> + Send>>;

/// A source of name to address mappings. Implementations are shared by all
/// workers and must not need mutable access.
pub trait NameResolver: Send + Sync {
    fn lookup(&self, name: String) -> Lookup;
}

impl<R: NameResolver + ?Sized> NameResolver for Arc<R> {
    fn lookup(&self, name: String) -> Lookup {
        (**self).lookup(name)
    }
}

/// Resolver that queries a single DNS server over plain UDP/TCP. The
/// system hosts file and resolv.conf are ignored.
#[derive(Clone)]
pub struct HickoryResolver {
    endpoint: SocketAddr,
    resolver: Arc<TokioResolver>,
}

impl HickoryResolver {
    pub fn new(endpoint: SocketAddr) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(&[endpoint.ip()], endpoint.port(), true);
        let config = ResolverConfig::from_parts(None, Vec::new(), group);
        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        let options = builder.options_mut();
        options.ip_strategy = LookupIpStrategy::Ipv4thenIpv6;
        // Only the configured endpoint may answer, never the hosts file.
        options.use_hosts_file = ResolveHosts::Never;

        HickoryResolver {
            endpoint,
            resolver: Arc::new(builder.build()),
        }
    }

    pub fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }
}

impl std::fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryResolver")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl NameResolver for HickoryResolver {
    fn lookup(&self, name: String) -> Lookup {
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            let lookup = resolver
                .lookup_ip(name.as_str())
                .await
                .map_err(|e| ResolveError::lookup(name.as_str(), e))?;
            let ips: Vec<IpAddr> = lookup.iter().collect();
            log::trace!("{} resolved to {:?}", name, ips);
            Ok(ips)
        })
    }
}

/// Fixed name to address table. Names not in the table fail to resolve.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: impl Into<String>, ips: Vec<IpAddr>) -> Self {
        self.insert(name, ips);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, ips: Vec<IpAddr>) {
        self.entries.insert(name.into().to_ascii_lowercase(), ips);
    }

    /// Appends `ip` to whatever `name` already maps to.
    pub fn push(&mut self, name: impl Into<String>, ip: IpAddr) {
        self.entries
            .entry(name.into().to_ascii_lowercase())
            .or_default()
            .push(ip);
    }

    pub fn get(&self, name: &str) -> Option<&Vec<IpAddr>> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NameResolver for StaticResolver {
    fn lookup(&self, name: String) -> Lookup {
        let result = match self.get(&name) {
            Some(ips) => Ok(ips.clone()),
            None => Err(ResolveError::lookup(name, "no such host")),
        };
        Box::pin(async move { result })
    }
}

/// Consults a table of overrides first and falls back to the wrapped
/// resolver for everything else.
pub struct OverrideResolver {
    overrides: StaticResolver,
    fallback: Arc<dyn NameResolver>,
}

impl OverrideResolver {
    pub fn new(overrides: StaticResolver, fallback: Arc<dyn NameResolver>) -> Self {
        OverrideResolver {
            overrides,
            fallback,
        }
    }
}

impl NameResolver for OverrideResolver {
    fn lookup(&self, name: String) -> Lookup {
        match self.overrides.get(&name) {
            Some(ips) => {
                let ips = ips.clone();
                Box::pin(async move { Ok(ips) })
            }
            None => self.fallback.lookup(name),
        }
    }
}

/// Resolution as seen by the prober. Cheap to clone; all clones share the
/// same underlying resolver.
#[derive(Clone)]
pub struct ResolverAdapter {
    inner: Arc<dyn NameResolver>,
}

impl ResolverAdapter {
    pub fn new(inner: Arc<dyn NameResolver>) -> Self {
        ResolverAdapter { inner }
    }

    /// Resolves `name` to all of its addresses. IP literals are returned
    /// as-is without touching the network.
    pub async fn resolve(&self, name: &str) -> Result<Vec<IpAddr>, ResolveError> {
        if let Ok(ip) = name.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let ips = self.inner.lookup(name.to_string()).await?;
        if ips.is_empty() {
            return Err(ResolveError::NoAddresses {
                name: name.to_string(),
            });
        }
        Ok(ips)
    }

    /// Existence check: does `name` resolve at all.
    pub async fn check(&self, name: &str) -> Result<(), ResolveError> {
        self.resolve(name).await.map(|_| ())
    }

    /// Picks the address to connect to. Always the first one returned.
    pub async fn select_address(&self, name: &str) -> Result<IpAddr, ResolveError> {
        let ips = self.resolve(name).await?;
        ips.into_iter().next().ok_or_else(|| ResolveError::NoAddresses {
            name: name.to_string(),
        })
    }
}

impl reqwest::dns::Resolve for ResolverAdapter {
    fn resolve(&self, name: reqwest::dns::Name) -> reqwest::dns::Resolving {
        let adapter = self.clone();
        Box::pin(async move {
            let ip = adapter.select_address(name.as_str()).await?;
            log::trace!("connecting to {} via {}", name.as_str(), ip);
            // Port 0 lets the connector fill in the port from the URL.
            let addrs: reqwest::dns::Addrs = Box::new(std::iter::once(SocketAddr::new(ip, 0)));
            Ok(addrs)
        })
    }
}
