//! Batch pricing
//!
//! Prices many lanes at once. Each lane is an independent engine call, so
//! tasks share nothing but the semaphore that bounds how many run together.

mod request;

pub use request::{LaneRequest, MarketInput, RouteInput};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::{assemble, AssembledQuote, EngineSettings};
use crate::types::CustomerTier;

/// Request file contents
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchRequest {
    pub lanes: Vec<LaneRequest>,
}

impl BatchRequest {
    /// Read a YAML or JSON request file (by extension, YAML otherwise)
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let request = if is_json {
            serde_json::from_str(&raw).context("Failed to parse JSON request")?
        } else {
            serde_yaml::from_str(&raw).context("Failed to parse YAML request")?
        };
        Ok(request)
    }
}

/// Result for one lane, stamped for the caller's records
#[derive(Debug, Clone, Serialize)]
pub struct LaneOutcome {
    pub quote_id: Uuid,
    pub lane_id: String,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<AssembledQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LaneOutcome {
    pub fn is_priced(&self) -> bool {
        self.quote.is_some()
    }
}

/// Price a single lane synchronously
pub fn price_lane(
    lane: &LaneRequest,
    settings: &EngineSettings,
    default_tier: CustomerTier,
) -> LaneOutcome {
    let result = lane
        .to_quote_request(default_tier)
        .and_then(|request| assemble(&request, settings));

    let (quote, error) = match result {
        Ok(quote) => {
            debug!(
                "Lane {} priced: buy={} sell={} base={} ({})",
                lane.id,
                quote.quote.buy_rate,
                quote.quote.sell_rate,
                quote.quote.effective_base_rate,
                quote.quote.blend_label
            );
            if let Some(d) = quote.blend.discrepancy.filter(|d| d.is_flagged()) {
                warn!(
                    "Lane {}: market and predicted rates differ by {}%",
                    lane.id, d.pct
                );
            }
            (Some(quote), None)
        }
        Err(e) => {
            warn!("Lane {} not priced: {}", lane.id, e);
            (None, Some(e.to_string()))
        }
    };

    LaneOutcome {
        quote_id: Uuid::new_v4(),
        lane_id: lane.id.clone(),
        generated_at: Utc::now(),
        quote,
        error,
    }
}

/// Price every lane, at most `max_concurrency` at a time. Outcomes come back
/// in request order.
pub async fn price_batch(
    lanes: Vec<LaneRequest>,
    settings: EngineSettings,
    default_tier: CustomerTier,
    max_concurrency: usize,
) -> Result<Vec<LaneOutcome>> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let total = lanes.len();
    let mut handles = Vec::with_capacity(total);

    for lane in lanes {
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            Ok::<_, anyhow::Error>(price_lane(&lane, &settings, default_tier))
        }));
    }

    let mut outcomes = Vec::with_capacity(total);
    for handle in handles {
        let outcome = handle.await.context("Pricing task panicked")??;
        outcomes.push(outcome);
    }

    let priced = outcomes.iter().filter(|o| o.is_priced()).count();
    info!("Priced {}/{} lanes", priced, total);

    Ok(outcomes)
}
