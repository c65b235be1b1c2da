// File: config_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::config::{parse_override, parse_resolver, parse_workers, ConfigParameter};
    use crate::error::ConfigError;
    use clap::Parser;
    use log::LevelFilter;
    use rstest::*;
    use std::net::{IpAddr, SocketAddr};

    #[test]
    fn test_config_parameter_default() {
        let config = ConfigParameter::default();

        assert_eq!(config.resolver(), "127.0.0.1:53".parse::<SocketAddr>().unwrap());
        assert_eq!(config.workers(), 10);
        assert_eq!(config.dump(), false);
        assert_eq!(config.fields(), false);
        assert!(config.log_file().is_none());
        assert_eq!(config.port(), 80);
        assert_eq!(config.via(), "viascan 1.0");
        assert_eq!(config.timeout(), None);
        assert!(config.overrides().is_empty());
        assert_eq!(config.log_level(), LevelFilter::Warn);
        assert_eq!(config.progress(), false);
        assert_eq!(config.suppress_stats(), false);
    }

    #[test]
    fn test_from_cli_defaults_match_new() {
        let cli = Cli::parse_from(["viascan"]);
        let config = ConfigParameter::from_cli(&cli).unwrap();
        let default = ConfigParameter::new();

        assert_eq!(config.resolver(), default.resolver());
        assert_eq!(config.workers(), default.workers());
        assert_eq!(config.via(), default.via());
        assert_eq!(config.port(), default.port());
    }

    #[test]
    fn test_from_cli_carries_everything() {
        let cli = Cli::parse_from([
            "viascan",
            "--resolver",
            "10.0.0.53",
            "-w",
            "4",
            "--fields",
            "--dump",
            "-p",
            "8080",
            "-t",
            "7",
            "--resolve",
            "a.example=127.0.0.1",
            "--log-level",
            "debug",
            "--progress",
            "-s",
        ]);
        let config = ConfigParameter::from_cli(&cli).unwrap();

        assert_eq!(config.resolver(), "10.0.0.53:53".parse::<SocketAddr>().unwrap());
        assert_eq!(config.workers(), 4);
        assert_eq!(config.fields(), true);
        assert_eq!(config.dump(), true);
        assert_eq!(config.port(), 8080);
        assert_eq!(config.timeout(), Some(7));
        assert_eq!(
            config.overrides(),
            &[("a.example".to_string(), "127.0.0.1".parse::<IpAddr>().unwrap())]
        );
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.progress(), true);
        assert_eq!(config.suppress_stats(), true);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(-100)]
    fn test_non_positive_workers_rejected(#[case] workers: i64) {
        assert!(matches!(parse_workers(workers), Err(ConfigError::InvalidWorkers)));
    }

    #[rstest]
    #[case(1, 1)]
    #[case(10, 10)]
    #[case(250, 250)]
    fn test_positive_workers_accepted(#[case] workers: i64, #[case] expected: usize) {
        assert_eq!(parse_workers(workers).unwrap(), expected);
    }

    #[rstest]
    #[case("127.0.0.1", "127.0.0.1:53")]
    #[case("8.8.8.8:5353", "8.8.8.8:5353")]
    #[case("::1", "[::1]:53")]
    #[case("[::1]", "[::1]:53")]
    #[case("[2001:db8::1]:5300", "[2001:db8::1]:5300")]
    fn test_parse_resolver(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            parse_resolver(input).unwrap(),
            expected.parse::<SocketAddr>().unwrap()
        );
    }

    #[rstest]
    #[case("")]
    #[case("dns.example")]
    #[case("1.2.3.4:notaport")]
    fn test_parse_resolver_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_resolver(input),
            Err(ConfigError::InvalidResolver(_))
        ));
    }

    #[rstest]
    #[case("a.example=127.0.0.1", "a.example", "127.0.0.1")]
    #[case(" b.example = ::1 ", "b.example", "::1")]
    fn test_parse_override(#[case] input: &str, #[case] name: &str, #[case] ip: &str) {
        assert_eq!(
            parse_override(input).unwrap(),
            (name.to_string(), ip.parse::<IpAddr>().unwrap())
        );
    }

    #[rstest]
    #[case("a.example")]
    #[case("=127.0.0.1")]
    #[case("a.example=not-an-ip")]
    fn test_parse_override_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_override(input),
            Err(ConfigError::InvalidOverride(_))
        ));
    }

    #[test]
    fn test_from_cli_rejects_zero_workers() {
        let cli = Cli::parse_from(["viascan", "-w", "0"]);
        let err = ConfigParameter::from_cli(&cli).unwrap_err();
        assert_eq!(err.to_string(), "-workers must be a positive number");
    }

    #[test]
    fn test_from_cli_rejects_bad_log_level() {
        let cli = Cli::parse_from(["viascan", "--log-level", "loud"]);
        assert!(matches!(
            ConfigParameter::from_cli(&cli),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_set_via() {
        let mut config = ConfigParameter::new();
        config.set_via("1.1 edge".to_string());
        assert_eq!(config.via(), "1.1 edge");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(5))]
    #[case(Some(120))]
    fn test_set_timeout(#[case] timeout_value: Option<u64>) {
        let mut config = ConfigParameter::new();

        config.set_timeout(timeout_value);
        assert_eq!(config.timeout(), timeout_value);
    }
}
