use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::SignalEvent;
use crate::signals::SignalAggregator;
use crate::stream::roster;

/// Consume signal events until the source drops, feeding the aggregator.
/// First sightings get the roster tier baseline; the aggregator itself
/// never looks up tiers.
pub async fn run_pipeline(
    mut rx: mpsc::UnboundedReceiver<SignalEvent>,
    mut aggregator: SignalAggregator,
) -> SignalAggregator {
    info!("Pipeline started, waiting for signal events...");

    while let Some(event) = rx.recv().await {
        let baseline = roster::tier_for(&event.name).baseline();
        aggregator.ingest(&event, Some(baseline));
        debug!(vendor = %event.name, keywords = event.keywords.len(), "signal ingested");

        if aggregator.events_ingested() % 10 == 0 {
            info!(
                "Pipeline processed {} events across {} vendors",
                aggregator.events_ingested(),
                aggregator.vendor_count()
            );
        }
    }

    info!(
        "Pipeline finished: {} events, {} vendors",
        aggregator.events_ingested(),
        aggregator.vendor_count()
    );
    aggregator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::score::Scorer;
    use chrono::Utc;

    fn event(name: &str, country: &str, keywords: &[&str]) -> SignalEvent {
        SignalEvent {
            name: name.to_string(),
            country: country.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn pipeline_drains_channel_and_applies_baselines() {
        let (tx, rx) = mpsc::unbounded_channel();
        let aggregator = SignalAggregator::new(Scorer::default());

        // "Kalahari Extractives" is a high-tier roster vendor; an unknown
        // vendor defaults to the medium baseline.
        tx.send(event("Kalahari Extractives", "South Africa", &[]))
            .unwrap();
        tx.send(event("Acme", "Germany", &[])).unwrap();
        drop(tx);

        let aggregator = run_pipeline(rx, aggregator).await;
        assert_eq!(aggregator.events_ingested(), 2);
        assert_eq!(aggregator.vendor_count(), 2);

        let mut snap = aggregator.snapshot();
        snap.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(snap[0].name, "Acme");
        assert_eq!(snap[0].breakdown.ethics, 28.0);
        assert_eq!(snap[1].name, "Kalahari Extractives");
        assert_eq!(snap[1].breakdown.ethics, 55.0);
    }
}
