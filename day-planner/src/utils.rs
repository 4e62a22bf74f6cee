//! Lightweight timing instrumentation.
//!
//! Pure local accumulation: callers measure what they care about and decide
//! what to do with the numbers. Nothing is exported anywhere.

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

/// Per-name elapsed-time samples in seconds.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    samples: HashMap<String, Vec<f64>>,
}

/// Aggregates for one measured name.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub total: f64,
    pub count: usize,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample for `name`.
    pub fn record(&mut self, name: &str, seconds: f64) {
        self.samples.entry(name.to_string()).or_default().push(seconds);
    }

    /// Run `work`, recording its elapsed time under `name`.
    pub fn measure<T>(&mut self, name: &str, work: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = work();
        self.record(name, start.elapsed().as_secs_f64());
        result
    }

    /// Await `work`, recording its elapsed time under `name`.
    pub async fn measure_async<T, F>(&mut self, name: &str, work: F) -> T
    where
        F: Future<Output = T>,
    {
        let start = Instant::now();
        let result = work.await;
        self.record(name, start.elapsed().as_secs_f64());
        result
    }

    /// Average elapsed time for `name`; 0.0 when nothing was recorded.
    pub fn average(&self, name: &str) -> f64 {
        match self.samples.get(name) {
            Some(times) if !times.is_empty() => times.iter().sum::<f64>() / times.len() as f64,
            _ => 0.0,
        }
    }

    /// Aggregates for every measured name.
    pub fn summary(&self) -> HashMap<String, MetricSummary> {
        self.samples
            .iter()
            .filter(|(_, times)| !times.is_empty())
            .map(|(name, times)| {
                let total: f64 = times.iter().sum();
                let min = times.iter().copied().fold(f64::INFINITY, f64::min);
                let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (
                    name.clone(),
                    MetricSummary {
                        average: total / times.len() as f64,
                        min,
                        max,
                        total,
                        count: times.len(),
                    },
                )
            })
            .collect()
    }
}
