// src/source.rs
// One bounded-time GET against one configured source. The client never
// surfaces an error: every failure mode degrades to an empty contribution,
// logged and counted, so the coordinator can treat all sources uniformly.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde_json::Value;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "aggregate_source_fetches_total",
            "Outbound source fetches attempted."
        );
        describe_counter!(
            "aggregate_source_errors_total",
            "Source fetches that degraded to an empty contribution."
        );
    });
}

#[derive(Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl SourceClient {
    /// Build a client whose requests are bounded by `timeout` end to end
    /// (connect + response). The bearer `token`, when present, is attached
    /// to every fetch.
    pub fn new(timeout: Duration, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building source http client")?;
        Ok(Self { http, token })
    }

    /// Fetch `{"numbers": [...]}` from one source. Timeouts, connection
    /// errors, non-2xx statuses, and malformed bodies all return an empty
    /// vec; the reason is only visible in logs and metrics.
    pub async fn fetch_numbers(&self, url: &str) -> Vec<f64> {
        ensure_metrics_described();
        counter!("aggregate_source_fetches_total").increment(1);

        match self.try_fetch(url).await {
            Ok(numbers) => numbers,
            Err(e) => {
                tracing::warn!(error = ?e, url, "source degraded to empty contribution");
                counter!("aggregate_source_errors_total").increment(1);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<f64>> {
        let mut req = self.http.get(url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let body: Value = req
            .send()
            .await
            .context("sending source request")?
            .error_for_status()
            .context("source status")?
            .json()
            .await
            .context("decoding source body")?;

        numbers_from_body(&body).ok_or_else(|| anyhow!("body has no `numbers` array"))
    }
}

/// Extract the numeric entries of the `numbers` field. Non-numeric entries
/// are dropped individually; a missing or non-array field is `None`.
fn numbers_from_body(body: &Value) -> Option<Vec<f64>> {
    let arr = body.get("numbers")?.as_array()?;
    Some(arr.iter().filter_map(Value::as_f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_field_filters_to_numeric_entries() {
        let body = json!({ "numbers": [1, "2", 3.5, null, -4, true] });
        assert_eq!(numbers_from_body(&body), Some(vec![1.0, 3.5, -4.0]));
    }

    #[test]
    fn missing_or_non_array_field_is_none() {
        assert_eq!(numbers_from_body(&json!({})), None);
        assert_eq!(numbers_from_body(&json!({ "numbers": "oops" })), None);
        assert_eq!(numbers_from_body(&json!({ "numbers": 7 })), None);
        assert_eq!(numbers_from_body(&json!([1, 2, 3])), None);
    }

    #[test]
    fn empty_array_is_a_valid_empty_contribution() {
        assert_eq!(numbers_from_body(&json!({ "numbers": [] })), Some(vec![]));
    }
}
