// File: pool.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::probe::ProbeResult;
use crate::target::ProbeTarget;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub const DEFAULT_WORKERS: usize = 10;

/// Anything that can turn a target into a result without failing.
pub trait Probe: Send + Sync + 'static {
    fn probe(&self, target: ProbeTarget) -> impl Future<Output = ProbeResult> + Send;
}

/// Fixed set of workers pulling targets from one channel and pushing
/// results into another. Results come out in completion order.
pub struct WorkerPool<P> {
    prober: Arc<P>,
    workers: usize,
}

impl<P: Probe> WorkerPool<P> {
    pub fn new(prober: P, workers: usize) -> Self {
        WorkerPool {
            prober: Arc::new(prober),
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs until `jobs` is closed and drained. The result channel is
    /// closed once every worker has exited.
    pub async fn run(
        &self,
        jobs: mpsc::Receiver<ProbeTarget>,
        results: mpsc::Sender<ProbeResult>,
    ) -> usize {
        let jobs = Arc::new(Mutex::new(jobs));

        let handles: Vec<_> = (0..self.workers)
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    Arc::clone(&self.prober),
                    Arc::clone(&jobs),
                    results.clone(),
                ))
            })
            .collect();
        drop(results);

        let mut probed = 0;
        for handle in join_all(handles).await {
            match handle {
                Ok(count) => probed += count,
                Err(e) => log::error!("Worker terminated abnormally: {}", e),
            }
        }
        log::debug!("All {} workers finished, {} targets probed", self.workers, probed);
        probed
    }
}

async fn worker<P: Probe>(
    id: usize,
    prober: Arc<P>,
    jobs: Arc<Mutex<mpsc::Receiver<ProbeTarget>>>,
    results: mpsc::Sender<ProbeResult>,
) -> usize {
    let mut probed = 0;
    loop {
        let next = jobs.lock().await.recv().await;
        let Some(target) = next else {
            break;
        };

        let result = prober.probe(target).await;
        probed += 1;
        if results.send(result).await.is_err() {
            log::warn!("Worker {}: result receiver dropped, stopping", id);
            break;
        }
    }
    log::trace!("Worker {} exiting after {} probes", id, probed);
    probed
}
