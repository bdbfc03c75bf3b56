// src/aggregate.rs
// Fan-out/fan-in barrier: one concurrent fetch per configured source, all
// awaited to completion. Per-source failures never reach this layer (they
// are already empty vecs); only a faulted task escapes as an error.

use anyhow::{Context, Result};

use crate::source::SourceClient;

/// Fetch every `urls[i]` concurrently and return results index-aligned with
/// the input, independent of completion order. Total latency is bounded by
/// the client's per-source timeout, not by the number of sources.
pub async fn aggregate(client: &SourceClient, urls: &[String]) -> Result<Vec<Vec<f64>>> {
    let mut handles = Vec::with_capacity(urls.len());
    for url in urls {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move { client.fetch_numbers(&url).await }));
    }

    // Awaiting in spawn order keeps results joined to their source index.
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("source fetch task faulted")?);
    }
    Ok(results)
}
