//! Bench command - post samples concurrently and measure throughput.

use super::scope::Target;
use anyhow::{Context, Result, bail};
use growthforecast_client::{Client, GraphUpdate};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of a bench run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchSummary {
    /// Requests issued.
    pub requests: usize,
    /// Requests that returned a result.
    pub succeeded: usize,
    /// Requests that failed, including panicked tasks.
    pub failed: usize,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

impl BenchSummary {
    /// Completed requests per second of wall time.
    pub fn requests_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.requests as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for BenchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Requests:    {}", self.requests)?;
        writeln!(f, "Succeeded:   {}", self.succeeded)?;
        writeln!(f, "Failed:      {}", self.failed)?;
        writeln!(f, "Elapsed:     {:.3}s", self.elapsed.as_secs_f64())?;
        write!(f, "Req/sec:     {:.1}", self.requests_per_sec())
    }
}

/// Run the bench command.
///
/// Issues `count` independent posts of `number` to the graph named by the
/// target URL, with at most `concurrency` in flight.
pub async fn run(
    client: &Client,
    target: &Target,
    count: usize,
    concurrency: usize,
    number: i64,
) -> Result<BenchSummary> {
    if concurrency == 0 {
        bail!("concurrency must be at least 1");
    }
    let (service, section, graph) = target.triple()?;

    tracing::info!(service, section, graph, count, concurrency, "Starting bench");

    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks: JoinSet<bool> = JoinSet::new();
    let params = Arc::new(GraphUpdate::new().number(number));
    let started = Instant::now();

    for _ in 0..count {
        // Backpressure: wait for a slot before spawning
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("Bench semaphore closed")?;

        let client = client.clone();
        let params = Arc::clone(&params);
        let (service, section, graph) = (service.to_string(), section.to_string(), graph.to_string());

        tasks.spawn(async move {
            let _permit = permit;
            match client.post_graph(&service, &section, &graph, &params).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(kind = e.kind(), error = %e, "Bench request failed");
                    false
                }
            }
        });
    }

    let mut succeeded = 0;
    let mut failed = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(true) => succeeded += 1,
            Ok(false) => failed += 1,
            Err(join_error) => {
                tracing::error!(error = %join_error, "Bench task join error");
                failed += 1;
            }
        }
    }

    Ok(BenchSummary {
        requests: count,
        succeeded,
        failed,
        elapsed: started.elapsed(),
    })
}
