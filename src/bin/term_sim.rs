//! Headless Term Simulator
//!
//! Plays whole terms with a random auto-player and prints a JSON report.
//! Useful for balancing the effect tables and heuristics.

use clap::Parser;
use persona_politics::core::config::SimulationConfig;
use persona_politics::core::random::{RandomSource, SeededRandom};
use persona_politics::core::types::MiniGameOutcome;
use persona_politics::persistence::{JsonFileLegacyStore, LegacyStore, MemoryLegacyStore};
use persona_politics::scoring::{TermSummary, TermTier};
use persona_politics::state::{GameResult, GameStore, TickOutcome};
use serde::Serialize;
use std::path::PathBuf;

/// Headless Term Simulator - auto-play terms and report outcomes
#[derive(Parser, Debug)]
#[command(name = "term_sim")]
#[command(about = "Auto-play political terms and output a JSON summary")]
struct Args {
    /// Number of terms to play
    #[arg(long, default_value_t = 10)]
    terms: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding simulation defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Persist the best legacy record to this file
    #[arg(long)]
    legacy_file: Option<PathBuf>,

    /// Term seconds between two decisions
    #[arg(long, default_value_t = 8)]
    play_every: u32,

    /// Chance that the auto-player passes a mini-game
    #[arg(long, default_value_t = 0.6)]
    pass_rate: f64,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct SimReport {
    seed: u64,
    terms: Vec<TermSummary>,
    wins: usize,
    losses: usize,
    timeouts: usize,
    mean_total: f64,
    best_legacy_index: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "persona_politics=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("term_sim: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> persona_politics::core::error::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let legacy: Box<dyn LegacyStore> = match &args.legacy_file {
        Some(path) => Box::new(JsonFileLegacyStore::new(path.clone())),
        None => Box::new(MemoryLegacyStore::new()),
    };

    let mut store = GameStore::new(config, Box::new(SeededRandom::new(seed)), legacy)?;
    // The player's choices draw from their own stream
    let mut player = SeededRandom::new(seed.wrapping_add(1));

    let mut terms = Vec::with_capacity(args.terms as usize);
    for _ in 0..args.terms {
        if let Some(summary) = play_term(&mut store, &mut player, args) {
            terms.push(summary);
        }
        store.reset_term();
    }

    let report = SimReport {
        seed,
        wins: terms.iter().filter(|t| t.result == Some(GameResult::Win)).count(),
        losses: terms.iter().filter(|t| t.result == Some(GameResult::Loss)).count(),
        timeouts: terms.iter().filter(|t| t.result.is_none()).count(),
        mean_total: if terms.is_empty() {
            0.0
        } else {
            terms.iter().map(|t| t.total as f64).sum::<f64>() / terms.len() as f64
        },
        best_legacy_index: store.legacy().best().best_index,
        terms,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

fn play_term(store: &mut GameStore, player: &mut dyn RandomSource, args: &Args) -> Option<TermSummary> {
    store.start_term();
    let play_every = args.play_every.max(1);

    loop {
        if store.elapsed() % play_every == 0 {
            let hand: Vec<_> = store.hand().into_iter().map(|c| (c.id.clone(), c.difficulty)).collect();
            if !hand.is_empty() {
                let (id, difficulty) = hand[player.index(hand.len())].clone();
                let approved = player.next_f64() < args.pass_rate;
                let rounds = store.config().minigame_rounds;
                let misses = player.below(rounds as i32 + 1) as u32;
                match store.resolve_policy(&id, difficulty, MiniGameOutcome::new(approved, misses, rounds)) {
                    Ok(Some(report)) => {
                        for _ in &report.resignations {
                            store.shuffle_cabinet();
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("Resolution failed: {}", e),
                }
            }
        }
        if store.term().is_over() {
            break;
        }
        if store.tick() == TickOutcome::Expired {
            break;
        }
    }

    store.term_summary()
}

fn print_text(report: &SimReport) {
    println!("Seed {}: {} terms", report.seed, report.terms.len());
    for (i, term) in report.terms.iter().enumerate() {
        println!(
            "  #{:<3} {:<9} total {:>3} | legacy {:>5.1} {:<20} | {} policies, {} events{}",
            i + 1,
            term.result.map(|r| format!("{:?}", r)).unwrap_or_else(|| "Timeout".into()),
            term.total,
            term.legacy_index,
            term.legacy_title.label(),
            term.policies_resolved,
            term.world_events_seen,
            if term.tier == TermTier::Legendary { " *" } else { "" }
        );
    }
    println!(
        "Wins {} | Losses {} | Timeouts {} | Mean total {:.1} | Best legacy {:.1}",
        report.wins, report.losses, report.timeouts, report.mean_total, report.best_legacy_index
    );
}
