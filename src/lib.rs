// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]

pub mod cli;
pub mod config;
pub mod error;
pub mod getstate;
pub mod pool;
pub mod probe;
pub mod probelog;
pub mod report;
pub mod resolver;
pub mod scan;
pub mod target;
pub mod tristate;

mod config_tests;
