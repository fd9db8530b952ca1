pub mod lexicon;
pub mod score;

use std::collections::{BTreeMap, HashMap};

use crate::core::ids::make_vendor_key;
use crate::core::{Breakdown, SignalEvent, VendorAggregate};
use score::Scorer;

/// Streaming accumulator for one run. Owns the vendor-key → aggregate map
/// and the run-wide keyword counts; external callers only read snapshots.
///
/// `ingest` is order-sensitive (running sum of per-event deltas, not a
/// recomputation), so callers must apply events in production order and
/// serialize access to one instance.
pub struct SignalAggregator {
    scorer: Scorer,
    vendors: HashMap<String, VendorAggregate>,
    counts: BTreeMap<String, u64>,
    events_ingested: u64,
}

impl SignalAggregator {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            vendors: HashMap::new(),
            counts: BTreeMap::new(),
            events_ingested: 0,
        }
    }

    /// Scoring functions for derived-value computation without mutation.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn is_empty(&self) -> bool {
        self.events_ingested == 0
    }

    pub fn vendor_count(&self) -> usize {
        self.vendors.len()
    }

    pub fn events_ingested(&self) -> u64 {
        self.events_ingested
    }

    /// Run-wide keyword occurrence counts; repeats within one event count
    /// once per occurrence.
    pub fn keyword_counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Apply one signal event. `baseline` is an external prior-classification
    /// offset added only when the vendor is first seen; revisits ignore it.
    ///
    /// The keyword set is deduplicated, but the scored delta is not: the same
    /// keyword observed in two separate events contributes twice to the
    /// breakdown while the set stores it once.
    pub fn ingest(&mut self, event: &SignalEvent, baseline: Option<Breakdown>) {
        for k in &event.keywords {
            *self.counts.entry(k.clone()).or_insert(0) += 1;
        }

        let delta = self.scorer.score_keywords(&event.keywords);
        let cap = self.scorer.weights().axis_cap;
        let key = make_vendor_key(&event.name, &event.country);

        match self.vendors.get_mut(&key) {
            Some(agg) => {
                agg.keywords.extend(event.keywords.iter().cloned());
                agg.breakdown.accumulate(&delta, cap);
            }
            None => {
                let mut breakdown = delta;
                if let Some(base) = baseline {
                    breakdown.accumulate(&base, cap);
                }
                self.vendors.insert(
                    key.clone(),
                    VendorAggregate {
                        key,
                        name: event.name.clone(),
                        country: event.country.clone(),
                        keywords: event.keywords.iter().cloned().collect(),
                        breakdown,
                    },
                );
            }
        }

        self.events_ingested += 1;
    }

    /// Current aggregates in arbitrary order. Presentation sorts by
    /// recommendation score.
    pub fn snapshot(&self) -> Vec<VendorAggregate> {
        self.vendors.values().cloned().collect()
    }

    /// Drop all per-run state, returning to the empty state for a new run.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.vendors.clear();
        self.counts.clear();
        self.events_ingested = 0;
    }
}
