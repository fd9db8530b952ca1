pub mod ids;
pub mod pipeline;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aoi::BoundingBox;

/// A geographic point in degrees. Latitude is expected in [-90, 90];
/// longitude is unrestricted and normalized where it matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Accumulated risk pressure per category axis. Axes accumulate
/// independently and are never normalized against each other.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub finance: f64,
    pub ethics: f64,
    pub logistics: f64,
}

impl Breakdown {
    pub fn new(finance: f64, ethics: f64, logistics: f64) -> Self {
        Self {
            finance,
            ethics,
            logistics,
        }
    }

    /// Add another breakdown axis-wise, then clamp each axis to [0, cap].
    pub fn accumulate(&mut self, delta: &Breakdown, cap: f64) {
        self.finance = (self.finance + delta.finance).clamp(0.0, cap);
        self.ethics = (self.ethics + delta.ethics).clamp(0.0, cap);
        self.logistics = (self.logistics + delta.logistics).clamp(0.0, cap);
    }
}

/// One observation associating a vendor with free-text keyword tags.
/// Duplicate keywords are meaningful: they amplify the scored delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub name: String,
    pub country: String,
    pub keywords: Vec<String>,
    pub at: DateTime<Utc>,
}

/// Per-vendor accumulated evidence for one run. Created on first sighting,
/// mutated in place by every later event for the same vendor key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorAggregate {
    pub key: String,
    pub name: String,
    pub country: String,
    pub keywords: BTreeSet<String>,
    pub breakdown: Breakdown,
}

/// The serialized form of one finished run, ready for a display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPayload {
    pub vendors: Vec<VendorAggregate>,
    pub counts: BTreeMap<String, u64>,
    pub aoi: Option<BoundingBox>,
    pub seed: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    High,   // ≥60
    Medium, // ≥30
    Low,    // <30
}

impl RiskTier {
    pub fn from_risk(risk: u32) -> Self {
        if risk >= 60 {
            RiskTier::High
        } else if risk >= 30 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskTier::High => "🔴",
            RiskTier::Medium => "🟡",
            RiskTier::Low => "🟢",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_adds_axis_wise() {
        let mut b = Breakdown::new(10.0, 20.0, 30.0);
        b.accumulate(&Breakdown::new(5.0, 5.0, 5.0), 100.0);
        assert_eq!(b, Breakdown::new(15.0, 25.0, 35.0));
    }

    #[test]
    fn accumulate_clamps_to_cap() {
        let mut b = Breakdown::new(95.0, 0.0, 0.0);
        b.accumulate(&Breakdown::new(20.0, 0.0, 0.0), 100.0);
        assert_eq!(b.finance, 100.0);
    }

    #[test]
    fn risk_tier_thresholds() {
        assert_eq!(RiskTier::from_risk(0), RiskTier::Low);
        assert_eq!(RiskTier::from_risk(29), RiskTier::Low);
        assert_eq!(RiskTier::from_risk(30), RiskTier::Medium);
        assert_eq!(RiskTier::from_risk(59), RiskTier::Medium);
        assert_eq!(RiskTier::from_risk(60), RiskTier::High);
        assert_eq!(RiskTier::from_risk(100), RiskTier::High);
    }
}
