mod aoi;
mod config;
mod core;
mod signals;
mod store;
mod stream;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::aoi::convert::region_from_geojson;
use crate::aoi::{Located, Region};
use crate::config::{AoiConfig, AoiMode, Config};
use crate::core::pipeline::run_pipeline;
use crate::core::{GeoPoint, RiskTier, RunPayload, VendorAggregate};
use crate::signals::SignalAggregator;
use crate::signals::lexicon::Category;
use crate::signals::score::Scorer;
use crate::store::RunStore;
use crate::stream::{StreamOptions, roster, start_simulator};

/// VendorRadar - streams supply-chain vendor signals and scores vendors
/// across finance / ethics / logistics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Run duration in seconds (overrides config)
    #[arg(short, long)]
    duration_secs: Option<u64>,

    /// Event interval in milliseconds (overrides config)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Seed phrase biasing the simulated signals
    #[arg(short, long)]
    seed: Option<String>,

    /// Output directory for saved runs (overrides config)
    #[arg(short, long)]
    out_dir: Option<String>,

    /// Show the most recent saved run instead of streaming a new one
    #[arg(long)]
    replay_last: bool,
}

/// A snapshot entry paired with its display coordinates for AOI tests.
struct LocatedVendor {
    vendor: VendorAggregate,
    location: Option<GeoPoint>,
}

impl Located for LocatedVendor {
    fn location(&self) -> Option<GeoPoint> {
        self.location
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("vendorradar=info".parse()?),
        )
        .init();

    tracing::info!("📡 VendorRadar starting...");

    let args = Args::parse();
    let mut config = Config::load(&args.config);
    if let Some(secs) = args.duration_secs {
        config.stream.total_secs = secs;
    }
    if let Some(ms) = args.interval_ms {
        config.stream.interval_ms = ms;
    }
    if let Some(seed) = args.seed {
        config.stream.seed = Some(seed);
    }
    if let Some(dir) = args.out_dir {
        config.store.dir = dir;
    }

    let store = RunStore::new(&config.store.dir);
    let scorer = Scorer::with_weights(config.scoring.weights, config.scoring.blend);

    if args.replay_last {
        return replay_last_run(&store, &scorer);
    }

    let aggregator = SignalAggregator::new(scorer);
    let (tx, rx) = mpsc::unbounded_channel();
    let simulator = start_simulator(
        StreamOptions {
            total: config.stream.total(),
            interval: config.stream.interval(),
            seed: config.stream.seed.clone(),
        },
        tx,
    );
    tracing::info!(
        "Streaming signals for {}s at one event per {}ms",
        config.stream.total_secs,
        config.stream.interval_ms
    );

    let aggregator = run_pipeline(rx, aggregator).await;
    simulator.await?;

    if aggregator.is_empty() {
        tracing::warn!("No signals ingested during the run window");
    }

    let mut ranked = aggregator.snapshot();
    aggregator.scorer().rank_by_recommendation(&mut ranked);

    // Optional AOI restriction of the displayed leaderboard. The saved run
    // keeps the full snapshot alongside the AOI bounds.
    let visible = match &config.aoi {
        Some(aoi_cfg) => apply_aoi(ranked.clone(), aoi_cfg)?,
        None => ranked.clone(),
    };

    log_leaderboard(aggregator.scorer(), &visible);
    log_top_signals(&aggregator);

    let payload = RunPayload {
        vendors: ranked,
        counts: aggregator.keyword_counts().clone(),
        aoi: config.aoi.as_ref().map(|a| a.bounds()),
        seed: config.stream.seed.clone(),
        created_at: chrono::Utc::now(),
    };
    store.save(&payload)?;

    Ok(())
}

/// Build the AOI region (rectangle, or drawn-map GeoJSON when configured)
/// and filter or rank the vendor list against it.
fn apply_aoi(vendors: Vec<VendorAggregate>, aoi_cfg: &AoiConfig) -> Result<Vec<VendorAggregate>> {
    let bounds = aoi_cfg.bounds();
    let region = match &aoi_cfg.geojson {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read AOI geojson {path}"))?;
            let value: serde_json::Value =
                serde_json::from_str(&raw).with_context(|| format!("parse AOI geojson {path}"))?;
            // Accept either a Feature or a bare geometry.
            let geometry = value.get("geometry").unwrap_or(&value);
            region_from_geojson(Some(geometry), bounds)
        }
        None => Region::rectangle(bounds),
    };

    let total = vendors.len();
    let located: Vec<LocatedVendor> = vendors
        .into_iter()
        .map(|v| LocatedVendor {
            location: roster::country_center(&v.country),
            vendor: v,
        })
        .collect();

    let kept: Vec<VendorAggregate> = match aoi_cfg.mode {
        AoiMode::Filter => aoi::filter_inside(located, &region),
        AoiMode::Rank => aoi::rank_by_inside(located, &region),
    }
    .into_iter()
    .map(|lv| lv.vendor)
    .collect();

    tracing::info!(
        "AOI {:?} kept {} of {total} vendors on the board",
        aoi_cfg.mode,
        kept.len()
    );
    Ok(kept)
}

fn log_leaderboard(scorer: &Scorer, vendors: &[VendorAggregate]) {
    tracing::info!("── Vendor leaderboard ──");
    for v in vendors {
        let risk = scorer.risk_from_breakdown(&v.breakdown);
        let rec = scorer.recommendation_score(risk);
        let tier = RiskTier::from_risk(risk);
        tracing::info!(
            "{} {} {} · {} | recommendation {rec}/100 | risk {risk}",
            tier.emoji(),
            roster::country_flag_emoji(&v.country),
            v.name,
            v.country
        );
    }
}

/// The run's loudest keywords, tagged with their scoring category.
fn log_top_signals(aggregator: &SignalAggregator) {
    let mut counts: Vec<(&String, &u64)> = aggregator.keyword_counts().iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    tracing::info!("── Top signals ──");
    for (keyword, count) in counts.into_iter().take(8) {
        let tag = match aggregator.scorer().lexicon().category_for(keyword) {
            Some(Category::Finance) => "finance",
            Some(Category::Ethics) => "ethics",
            Some(Category::Logistics) => "logistics",
            None => "ambient",
        };
        tracing::info!("{count:>3}× {keyword} [{tag}]");
    }
}

fn replay_last_run(store: &RunStore, scorer: &Scorer) -> Result<()> {
    let Some(run) = store.load_latest()? else {
        tracing::info!("No saved runs in {}", store.dir().display());
        return Ok(());
    };

    tracing::info!(
        "Replaying run from {} ({} vendors, {} distinct keywords)",
        run.created_at,
        run.vendors.len(),
        run.counts.len()
    );
    let mut vendors = run.vendors;
    scorer.rank_by_recommendation(&mut vendors);
    log_leaderboard(scorer, &vendors);
    Ok(())
}
