// File: tristate.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

/// Outcome of a single probe step.
///
/// A step that was never attempted stays `NotRun`; only an attempted step
/// can be `Succeeded` or `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    #[default]
    NotRun,
    Succeeded,
    Failed,
}

impl TriState {
    pub fn from_success(success: bool) -> Self {
        if success {
            TriState::Succeeded
        } else {
            TriState::Failed
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, TriState::Succeeded)
    }

    pub fn failed(&self) -> bool {
        matches!(self, TriState::Failed)
    }

    pub fn symbol(&self) -> char {
        match self {
            TriState::NotRun => '-',
            TriState::Succeeded => 't',
            TriState::Failed => 'f',
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
