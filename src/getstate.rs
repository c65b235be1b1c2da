/*
Copyright 2022 Volker Schwaberow <volker@schwaberow.de>
Permission is hereby granted, free of charge, to any person obtaining a
copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including without
limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the
Software is furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.
Author(s): Volker Schwaberow
*/

use crate::probe::ProbeResult;
use chrono::{DateTime, Local};

/// Counters for one scan run.
#[derive(Debug, Clone, Copy)]
pub struct ScanState {
    queued: usize,
    malformed: usize,
    unresolved: usize,
    no_via_failed: usize,
    via_failed: usize,
    complete: usize,
    emitted: usize,
    start_time: DateTime<Local>,
    end_time: Option<DateTime<Local>>,
}

impl ScanState {
    pub fn new() -> ScanState {
        ScanState {
            queued: 0,
            malformed: 0,
            unresolved: 0,
            no_via_failed: 0,
            via_failed: 0,
            complete: 0,
            emitted: 0,
            start_time: Local::now(),
            end_time: None,
        }
    }

    pub fn add_queued(&mut self) {
        self.queued += 1;
    }

    pub fn add_malformed(&mut self) {
        self.malformed += 1;
    }

    pub fn record(&mut self, result: &ProbeResult) {
        self.emitted += 1;
        if result.resolved().failed() {
            self.unresolved += 1;
        } else if result.no_via().outcome.failed() {
            self.no_via_failed += 1;
        } else if result.via().outcome.failed() {
            self.via_failed += 1;
        } else if result.via().outcome.succeeded() {
            self.complete += 1;
        }
    }

    /// Folds the tallies gathered on the result side into this state.
    pub fn merge_results(&mut self, other: &ScanState) {
        self.unresolved += other.unresolved;
        self.no_via_failed += other.no_via_failed;
        self.via_failed += other.via_failed;
        self.complete += other.complete;
        self.emitted += other.emitted;
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Local::now());
    }

    pub fn queued(&self) -> usize {
        self.queued
    }

    pub fn malformed(&self) -> usize {
        self.malformed
    }

    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn no_via_failed(&self) -> usize {
        self.no_via_failed
    }

    pub fn via_failed(&self) -> usize {
        self.via_failed
    }

    pub fn complete(&self) -> usize {
        self.complete
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn elapsed_ms(&self) -> i64 {
        let end = self.end_time.unwrap_or_else(Local::now);
        (end - self.start_time).num_milliseconds()
    }

    pub fn summary(&self) -> String {
        let end = self.end_time.unwrap_or_else(Local::now);
        format!(
            "{} targets ({} bad lines). Started at {} / Ended at {}. {} ms. Unresolved: {}. No-Via failed: {}. Via failed: {}. Complete: {}.",
            self.queued,
            self.malformed,
            self.start_time.format("%Y-%m-%d %H:%M:%S"),
            end.format("%Y-%m-%d %H:%M:%S"),
            self.elapsed_ms(),
            self.unresolved,
            self.no_via_failed,
            self.via_failed,
            self.complete
        )
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::PhaseResult;
    use crate::target::ProbeTarget;
    use crate::tristate::TriState;

    fn target() -> ProbeTarget {
        ProbeTarget::new("a.example", "origin.example")
    }

    #[test]
    fn test_record_buckets_each_outcome() {
        let mut state = ScanState::new();

        state.record(&ProbeResult::from_parts(
            &target(),
            TriState::Failed,
            PhaseResult::default(),
            PhaseResult::default(),
        ));
        state.record(&ProbeResult::from_parts(
            &target(),
            TriState::Succeeded,
            PhaseResult::failed(),
            PhaseResult::default(),
        ));
        state.record(&ProbeResult::from_parts(
            &target(),
            TriState::Succeeded,
            PhaseResult::succeeded(10, "", ""),
            PhaseResult::failed(),
        ));
        state.record(&ProbeResult::from_parts(
            &target(),
            TriState::Succeeded,
            PhaseResult::succeeded(10, "gzip", "nginx"),
            PhaseResult::succeeded(12, "", "nginx"),
        ));

        assert_eq!(state.unresolved(), 1);
        assert_eq!(state.no_via_failed(), 1);
        assert_eq!(state.via_failed(), 1);
        assert_eq!(state.complete(), 1);
        assert_eq!(state.emitted(), 4);
    }

    #[test]
    fn test_merge_and_summary() {
        let mut input = ScanState::new();
        input.add_queued();
        input.add_queued();
        input.add_malformed();

        let mut output = ScanState::new();
        output.record(&ProbeResult::from_parts(
            &target(),
            TriState::Failed,
            PhaseResult::default(),
            PhaseResult::default(),
        ));

        input.merge_results(&output);
        input.finish();

        assert_eq!(input.queued(), 2);
        assert_eq!(input.malformed(), 1);
        assert_eq!(input.unresolved(), 1);
        assert_eq!(input.emitted(), 1);
        assert!(input.end_time().is_some());
        assert!(input.elapsed_ms() >= 0);
        assert!(input.summary().starts_with("2 targets (1 bad lines)."));
    }
}
