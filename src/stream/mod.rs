pub mod roster;

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::SignalEvent;
use roster::{COMPANIES, Company, VendorTier, tier_for};

/// Simulator cadence and duration.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    pub total: Duration,
    pub interval: Duration,
    pub seed: Option<String>,
}

// Positive/compliance signals (push green)
const POSITIVE: &[&str] = &[
    "renewable energy",
    "iso-14001",
    "reach compliant",
    "rohs compliant",
    "third-party audits",
    "living wage policy",
    "supplier code of conduct",
    "traceability",
    "grievance mechanism",
    "fair trade compliance",
];

// Moderate negatives (push amber)
const MODERATE_NEG: &[&str] = &[
    "coal power usage",
    "water stress region",
    "incomplete supplier audits",
    "overtime violations (minor)",
    "corrective action plan",
    "diesel fleet",
    "scope-3 not reported",
    "noise complaints",
    "lead times",
    "outsourcing",
];

// Severe negatives (push red)
const SEVERE_NEG: &[&str] = &[
    "bankruptcy",
    "deforestation risk",
    "illegal sourcing",
    "forced labor allegations",
    "child labor reports",
    "unsafe working conditions",
    "sanctions exposure",
    "ofac sdn proximity",
    "opaque supply chain",
    "beneficial ownership unknown",
    "water contamination",
    "no third-party audits",
    "anti-corruption policy missing",
    "conflict minerals",
];

// Low-impact ambience to keep the heatmap lively
const AMBIENT: &[&str] = &[
    "logistics",
    "tariffs",
    "permits",
    "chain-of-custody",
    "customs",
    "geopolitics",
    "export controls",
    "cobalt",
    "platinum",
    "nickel",
    "labor",
    "strike risk",
    "port delays",
    "currency",
    "HS codes",
    "environmental impact",
];

/// Draw up to `n` distinct entries.
fn pick<R: Rng>(rng: &mut R, pool: &[&str], n: usize) -> Vec<String> {
    pool.choose_multiple(rng, n.min(pool.len()))
        .map(|s| s.to_string())
        .collect()
}

/// Draw `n` entries with replacement; repeats amplify the scored delta.
fn pick_with_repeats<R: Rng>(rng: &mut R, pool: &[&str], n: usize) -> Vec<String> {
    (0..n)
        .filter_map(|_| pool.choose(rng))
        .map(|s| s.to_string())
        .collect()
}

fn word_match(haystack: &str, words: &[&str]) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| words.contains(&w))
}

/// Keywords appended to every event when the seed phrase mentions certain
/// topics.
fn seed_bias(seed: Option<&str>) -> Vec<String> {
    let Some(seed) = seed else {
        return Vec::new();
    };
    let s = seed.to_lowercase();
    let mut hits: Vec<&str> = Vec::new();
    if s.contains("south africa") {
        hits.extend(["cobalt", "platinum", "diamond"]);
    }
    if word_match(&s, &["sanction", "ofac", "sdn"]) {
        hits.extend(["sanctions exposure", "ofac sdn proximity"]);
    }
    if word_match(&s, &["child", "labor"]) {
        hits.extend(["child labor reports", "unsafe working conditions"]);
    }
    if word_match(&s, &["renewable", "green", "solar", "wind"]) {
        hits.extend(["renewable energy", "iso-14001"]);
    }
    hits.into_iter().map(String::from).collect()
}

/// Tier shaping of one event's keyword list:
///   LOW            4–5 positive + 0–1 ambient
///   MEDIUM new     2 moderate + 2 severe (with repeats) + 0–1 ambient
///   MEDIUM revisit 1 moderate + 2 severe (with repeats)
///   HIGH new       6–9 severe (with repeats) + 0–1 ambient
///   HIGH revisit   3–5 severe (with repeats)
/// Repeats are drawn on purpose to pump the scored delta.
fn make_keywords_for<R: Rng>(rng: &mut R, name: &str, revisit: bool) -> Vec<String> {
    match tier_for(name) {
        VendorTier::Low => {
            let n = 4 + rng.gen_range(0..2);
            let mut kws = pick(rng, POSITIVE, n);
            if rng.gen_bool(0.5) {
                kws.extend(pick(rng, AMBIENT, 1));
            }
            kws
        }
        VendorTier::Medium => {
            if revisit {
                let mut kws = pick(rng, MODERATE_NEG, 1);
                kws.extend(pick_with_repeats(rng, SEVERE_NEG, 2));
                kws
            } else {
                let mut kws = pick(rng, MODERATE_NEG, 2);
                kws.extend(pick_with_repeats(rng, SEVERE_NEG, 2));
                if rng.gen_bool(0.4) {
                    kws.extend(pick(rng, AMBIENT, 1));
                }
                kws
            }
        }
        VendorTier::High => {
            if revisit {
                let n = 3 + rng.gen_range(0..3);
                pick_with_repeats(rng, SEVERE_NEG, n)
            } else {
                let n = 6 + rng.gen_range(0..4);
                let mut kws = pick_with_repeats(rng, SEVERE_NEG, n);
                if rng.gen_bool(0.3) {
                    kws.extend(pick(rng, AMBIENT, 1));
                }
                kws
            }
        }
    }
}

/// Produce the next event: 70% chance of introducing an unseen company
/// (always, when none seen yet), otherwise revisit a seen one.
fn next_event(used: &mut HashSet<&'static str>, bias: &[String]) -> SignalEvent {
    let mut rng = rand::thread_rng();
    let fresh = used.is_empty() || rng.gen_bool(0.7);

    let (company, revisit) = if fresh {
        let pool: Vec<&Company> = COMPANIES.iter().filter(|c| !used.contains(c.name)).collect();
        match pool.choose(&mut rng) {
            Some(c) => (**c, false),
            // Roster exhausted; fall back to any company.
            None => (*COMPANIES.choose(&mut rng).expect("roster is non-empty"), false),
        }
    } else {
        let seen: Vec<&'static str> = used.iter().copied().collect();
        let name = *seen.choose(&mut rng).expect("used set is non-empty");
        let company = COMPANIES
            .iter()
            .find(|c| c.name == name)
            .copied()
            .expect("seen names come from the roster");
        (company, true)
    };

    used.insert(company.name);

    let mut keywords = make_keywords_for(&mut rng, company.name, revisit);
    keywords.extend(bias.iter().cloned());

    SignalEvent {
        name: company.name.to_string(),
        country: company.country.to_string(),
        keywords,
        at: Utc::now(),
    }
}

/// Spawn the signal simulator: one event immediately, then one per interval
/// until the duration elapses. Stopping is signalled by dropping the sender,
/// which ends the downstream pipeline.
pub fn start_simulator(
    options: StreamOptions,
    tx: mpsc::UnboundedSender<SignalEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let bias = seed_bias(options.seed.as_deref());
        if !bias.is_empty() {
            info!("seed bias active: {} extra keywords per event", bias.len());
        }

        let started = tokio::time::Instant::now();
        let mut ticker = tokio::time::interval(options.interval);
        let mut used: HashSet<&'static str> = HashSet::new();
        let mut events = 0u64;

        loop {
            ticker.tick().await;

            let event = next_event(&mut used, &bias);
            debug!(vendor = %event.name, keywords = event.keywords.len(), "signal emitted");
            if tx.send(event).is_err() {
                debug!("event channel closed, stopping simulator");
                break;
            }
            events += 1;

            if started.elapsed() >= options.total {
                break;
            }
        }

        info!("simulator finished after {events} events");
    })
}
