use serde::Deserialize;

use super::lexicon::{Category, KeywordMatch, Lexicon};
use crate::core::{Breakdown, VendorAggregate};

/// Per-keyword scoring weights. Demo tuning constants; configurable but the
/// defaults are load-bearing for downstream display thresholds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub bad_penalty: f64,
    pub good_credit: f64,
    pub neutral_penalty: f64,
    pub axis_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            bad_penalty: 12.0,
            good_credit: 6.0,
            neutral_penalty: 4.0,
            axis_cap: 100.0,
        }
    }
}

/// Axis blend for collapsing a breakdown into one risk number. Ethics is
/// weighted heaviest.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub finance: f64,
    pub ethics: f64,
    pub logistics: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            finance: 0.35,
            ethics: 0.40,
            logistics: 0.25,
        }
    }
}

/// Pure scoring functions over keyword lists and breakdowns. Holds no
/// per-run state, so it is safe to call from display code for hypothetical
/// recomputation.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    lexicon: Lexicon,
    weights: ScoreWeights,
    blend: BlendWeights,
}

impl Scorer {
    pub fn new(lexicon: Lexicon, weights: ScoreWeights, blend: BlendWeights) -> Self {
        Self {
            lexicon,
            weights,
            blend,
        }
    }

    /// Default lexicon with caller-supplied weights.
    pub fn with_weights(weights: ScoreWeights, blend: BlendWeights) -> Self {
        Self::new(Lexicon::default(), weights, blend)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score a keyword list into a per-axis delta. Repeated keywords
    /// contribute once per occurrence; credits floor the axis at zero and
    /// every axis is capped after the pass.
    pub fn score_keywords<S: AsRef<str>>(&self, keywords: &[S]) -> Breakdown {
        let mut b = Breakdown::default();
        for raw in keywords {
            let k = raw.as_ref().to_lowercase();
            let Some((category, matched)) = self.lexicon.classify(&k) else {
                continue;
            };
            let axis = match category {
                Category::Finance => &mut b.finance,
                Category::Ethics => &mut b.ethics,
                Category::Logistics => &mut b.logistics,
            };
            match matched {
                KeywordMatch::Bad => *axis += self.weights.bad_penalty,
                KeywordMatch::Good => *axis = (*axis - self.weights.good_credit).max(0.0),
                KeywordMatch::Neutral => *axis += self.weights.neutral_penalty,
            }
        }
        b.finance = b.finance.min(self.weights.axis_cap);
        b.ethics = b.ethics.min(self.weights.axis_cap);
        b.logistics = b.logistics.min(self.weights.axis_cap);
        b
    }

    /// Collapse a breakdown into a single risk number on [0, 100].
    pub fn risk_from_breakdown(&self, b: &Breakdown) -> u32 {
        let blended = b.finance * self.blend.finance
            + b.ethics * self.blend.ethics
            + b.logistics * self.blend.logistics;
        blended.round().clamp(0.0, 100.0) as u32
    }

    /// Complement of risk: always exactly `100 - risk` for risk on [0, 100].
    pub fn recommendation_score(&self, risk: u32) -> u32 {
        100u32.saturating_sub(risk)
    }

    /// Sort vendor aggregates by recommendation score, best first. Equal
    /// scores keep their incoming relative order.
    pub fn rank_by_recommendation(&self, vendors: &mut [VendorAggregate]) {
        vendors.sort_by_key(|v| {
            std::cmp::Reverse(self.recommendation_score(self.risk_from_breakdown(&v.breakdown)))
        });
    }
}
