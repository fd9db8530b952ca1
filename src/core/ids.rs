/// Lowercase ASCII slug: apostrophes dropped, every other non-alphanumeric
/// run collapsed to a single dash, leading/trailing dashes trimmed.
pub fn to_slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_sep = false;
    for c in s.trim().chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Stable vendor identity derived from display name + country. Two events
/// with the same name and country always resolve to the same key regardless
/// of casing or incidental punctuation.
pub fn make_vendor_key(name: &str, country: &str) -> String {
    format!("{}__{}", to_slug(name), to_slug(country))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_dashes() {
        assert_eq!(to_slug("Aurora Mineral AG"), "aurora-mineral-ag");
    }

    #[test]
    fn slug_drops_apostrophes() {
        assert_eq!(to_slug("O'Brien's Metals"), "obriens-metals");
        assert_eq!(to_slug("O\u{2019}Brien"), "obrien");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(to_slug("Unique  Trade -- Corp."), "unique-trade-corp");
    }

    #[test]
    fn slug_trims_edge_separators() {
        assert_eq!(to_slug("  --EarthMaterials Inc.--  "), "earthmaterials-inc");
    }

    #[test]
    fn slug_of_only_punctuation_is_empty() {
        assert_eq!(to_slug("—"), "");
    }

    #[test]
    fn vendor_key_is_case_insensitive() {
        assert_eq!(
            make_vendor_key("Aurora Mineral AG", "Germany"),
            make_vendor_key("aurora mineral ag", "Germany")
        );
    }

    #[test]
    fn vendor_key_joins_with_double_underscore() {
        assert_eq!(
            make_vendor_key("Sable Ridge Holdings", "South Africa"),
            "sable-ridge-holdings__south-africa"
        );
    }

    #[test]
    fn different_countries_differ() {
        assert_ne!(
            make_vendor_key("Acme", "Germany"),
            make_vendor_key("Acme", "Norway")
        );
    }
}
