// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr, TcpListener};
use std::sync::Arc;
use viascan::config::ConfigParameter;
use viascan::probe::Prober;
use viascan::probelog::ProbeLog;
use viascan::resolver::{ResolverAdapter, StaticResolver};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn create_origin_response(body_size: usize, encoding: &str, server: &str) -> ResponseTemplate {
    let mut response = ResponseTemplate::new(200).set_body_bytes(vec![b'x'; body_size]);
    if !encoding.is_empty() {
        response = response.insert_header("content-encoding", encoding);
    }
    if !server.is_empty() {
        response = response.insert_header("server", server);
    }
    response
}

/// Origin that answers the same way whether or not Via is present.
pub async fn mount_static_origin(
    server: &MockServer,
    body_size: usize,
    encoding: &str,
    name: &str,
) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(create_origin_response(body_size, encoding, name))
        .mount(server)
        .await;
}

/// Origin that changes its answer when it sees a Via header.
pub async fn mount_via_sensitive_origin(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_exists("via"))
        .respond_with(create_origin_response(40, "", "via-origin"))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(create_origin_response(100, "gzip", "plain-origin"))
        .mount(server)
        .await;
}

pub fn config_for_port(port: u16) -> ConfigParameter {
    let mut config = ConfigParameter::new();
    config.set_port(port);
    config
}

pub fn config_for(server: &MockServer) -> ConfigParameter {
    config_for_port(server.address().port())
}

/// Resolver that knows `origin.test` and nothing else.
pub fn test_resolver() -> StaticResolver {
    StaticResolver::new().with_entry("origin.test", vec![LOOPBACK])
}

pub fn create_prober(config: &ConfigParameter, log: ProbeLog) -> Prober {
    Prober::new(
        config,
        ResolverAdapter::new(Arc::new(test_resolver())),
        Arc::new(log),
    )
    .unwrap()
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind((LOOPBACK, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
