use crate::core::{Breakdown, GeoPoint};

/// Prior classification of a roster company, supplied externally to the
/// scoring core. Maps to a one-time baseline bump applied when the vendor is
/// first seen in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorTier {
    Low,
    Medium,
    High,
}

impl VendorTier {
    /// One-time baseline offset for a first sighting.
    pub fn baseline(&self) -> Breakdown {
        match self {
            VendorTier::High => Breakdown::new(25.0, 55.0, 12.0),
            VendorTier::Medium => Breakdown::new(12.0, 28.0, 6.0),
            VendorTier::Low => Breakdown::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Company {
    pub name: &'static str,
    pub country: &'static str,
    pub tier: VendorTier,
}

pub const COMPANIES: [Company; 10] = [
    Company {
        name: "EarthMaterials Inc.",
        country: "China",
        tier: VendorTier::High,
    },
    Company {
        name: "Unique Trade Corp.",
        country: "Canada",
        tier: VendorTier::Low,
    },
    Company {
        name: "Kalahari Extractives",
        country: "South Africa",
        tier: VendorTier::High,
    },
    Company {
        name: "Platina Global",
        country: "Botswana",
        tier: VendorTier::Medium,
    },
    Company {
        name: "Meridian Metals",
        country: "Namibia",
        tier: VendorTier::Medium,
    },
    Company {
        name: "Trans-Continental Logistics",
        country: "UAE",
        tier: VendorTier::High,
    },
    Company {
        name: "Aurora Mineral AG",
        country: "Germany",
        tier: VendorTier::Low,
    },
    Company {
        name: "Sable Ridge Holdings",
        country: "South Africa",
        tier: VendorTier::High,
    },
    Company {
        name: "Pacific Crown Trading",
        country: "Singapore",
        tier: VendorTier::Medium,
    },
    Company {
        name: "NorthCape Commodities",
        country: "Norway",
        tier: VendorTier::Low,
    },
];

/// Tier for a company name; unknown names default to Medium.
pub fn tier_for(name: &str) -> VendorTier {
    COMPANIES
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.tier)
        .unwrap_or(VendorTier::Medium)
}

/// Map display centroid for a roster country.
pub fn country_center(country: &str) -> Option<GeoPoint> {
    let (lat, lon) = match country {
        "South Africa" => (-28.48, 24.67),
        "Namibia" => (-22.56, 17.08),
        "Botswana" => (-22.33, 24.68),
        "Germany" => (51.16, 10.45),
        "Singapore" => (1.35, 103.82),
        "Norway" => (60.47, 8.47),
        "Canada" => (56.13, -106.35),
        "China" => (35.86, 104.19),
        "UAE" => (23.42, 53.85),
        _ => return None,
    };
    Some(GeoPoint { lat, lon })
}

fn country_iso2(country: &str) -> Option<&'static str> {
    match country {
        "South Africa" => Some("ZA"),
        "Namibia" => Some("NA"),
        "Botswana" => Some("BW"),
        "Germany" => Some("DE"),
        "Singapore" => Some("SG"),
        "Norway" => Some("NO"),
        "Canada" => Some("CA"),
        "China" => Some("CN"),
        "UAE" => Some("AE"),
        _ => None,
    }
}

/// Regional-indicator flag emoji; white flag for unknown countries.
pub fn country_flag_emoji(country: &str) -> String {
    match country_iso2(country) {
        Some(iso) => iso
            .chars()
            .filter_map(|c| char::from_u32(0x1F1E6 + c as u32 - 'A' as u32))
            .collect(),
        None => "🏳️".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup() {
        assert_eq!(tier_for("Aurora Mineral AG"), VendorTier::Low);
        assert_eq!(tier_for("Platina Global"), VendorTier::Medium);
        assert_eq!(tier_for("Kalahari Extractives"), VendorTier::High);
        assert_eq!(tier_for("Unknown Vendor"), VendorTier::Medium);
    }

    #[test]
    fn low_tier_has_zero_baseline() {
        assert_eq!(VendorTier::Low.baseline(), Breakdown::default());
    }

    #[test]
    fn high_tier_baseline_leans_ethics() {
        let b = VendorTier::High.baseline();
        assert!(b.ethics > b.finance);
        assert!(b.finance > b.logistics);
    }

    #[test]
    fn every_roster_country_has_a_center() {
        for company in &COMPANIES {
            assert!(
                country_center(company.country).is_some(),
                "{} has no center",
                company.country
            );
        }
    }

    #[test]
    fn unknown_country_has_no_center() {
        assert!(country_center("Atlantis").is_none());
    }

    #[test]
    fn flag_emoji_for_known_country() {
        assert_eq!(country_flag_emoji("Germany"), "🇩🇪");
        assert_eq!(country_flag_emoji("South Africa"), "🇿🇦");
    }

    #[test]
    fn flag_emoji_fallback() {
        assert_eq!(country_flag_emoji("Atlantis"), "🏳️");
    }
}
