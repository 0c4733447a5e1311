//! Persona Politics - Entry Point
//!
//! A line-oriented terminal loop around one game store. Wall-clock ticks are
//! pumped between commands; the optional advisor is awaited between the two
//! phases of a policy resolution.

use clap::Parser;
use persona_politics::core::config::SimulationConfig;
use persona_politics::core::error::Result;
use persona_politics::core::random::SeededRandom;
use persona_politics::core::types::{AgeBracket, Decision, Difficulty, Gender, MiniGameOutcome};
use persona_politics::llm::advisor::Advisor;
use persona_politics::persistence::JsonFileLegacyStore;
use persona_politics::policy::pipeline::ResolutionReport;
use persona_politics::state::term::{format_clock, TickOutcome};
use persona_politics::state::{GameStore, TermTicker};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "persona-politics", about = "Play a political term in the terminal")]
struct Args {
    /// TOML file overriding simulation defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every random draw
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best legacy record is kept
    #[arg(long)]
    legacy_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "persona_politics=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    let legacy_path = args.legacy_file.clone().unwrap_or_else(|| config.legacy_path.clone());
    let rng = match args.seed {
        Some(seed) => SeededRandom::new(seed),
        None => SeededRandom::from_entropy(),
    };
    let advisor = Advisor::from_env(Duration::from_millis(config.advisor_timeout_ms));

    let mut store = GameStore::new(
        config,
        Box::new(rng),
        Box::new(JsonFileLegacyStore::new(legacy_path)),
    )?;
    let mut ticker = TermTicker::new();

    tracing::info!("Persona Politics starting...");
    print_help(advisor.is_online());

    let mut lines = spawn_stdin_reader();

    loop {
        pump_ticks(&mut store, &mut ticker);
        prompt(&store)?;

        let line = loop {
            let wait = ticker.until_next(Instant::now()).unwrap_or(Duration::from_secs(3600));
            tokio::select! {
                line = lines.recv() => break line,
                _ = tokio::time::sleep(wait) => {
                    if pump_ticks(&mut store, &mut ticker) {
                        prompt(&store)?;
                    }
                }
            }
        };
        let Some(line) = line else {
            break;
        };
        pump_ticks(&mut store, &mut ticker);

        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = words.first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "?" => print_help(advisor.is_online()),
            "start" => {
                if store.start_term() {
                    ticker.arm(Instant::now());
                    println!("Term started. {} on the clock.", format_clock(store.term().seconds_left()));
                } else {
                    println!("The term is not idle. Use 'reset' first.");
                }
            }
            "end" => {
                if store.end_term() {
                    ticker.disarm();
                    print_summary(&store);
                } else {
                    println!("No term is running.");
                }
            }
            "reset" => {
                store.reset_term();
                ticker.disarm();
                println!("Fresh term ready. Best legacy: {:.1}", store.legacy().best().best_index);
            }
            "status" | "s" => print_status(&store),
            "hand" | "h" => print_hand(&store),
            "econ" => print_economy(&store),
            "foreign" => print_foreign(&store),
            "cabinet" => print_cabinet(&store),
            "poll" => print_poll(&store),
            "events" => print_events(&store),
            "dismiss" => match words.get(1).and_then(|w| w.parse::<u64>().ok()) {
                Some(id) if store.remove_world_event(id) => println!("Dismissed event {}.", id),
                Some(id) => println!("No event {}.", id),
                None => println!("Usage: dismiss <event id>"),
            },
            "shuffle" => match store.shuffle_cabinet() {
                Some(key) => println!(
                    "New {} minister sworn in with loyalty {}.",
                    key.label(),
                    store.cabinet().get(key).loyalty
                ),
                None => println!("No resignation to acknowledge."),
            },
            "remark" => match store.shift_remark() {
                Some(remark) => println!("Secretary ({:?}): {}", remark.tone, remark.text),
                None => println!("The secretary has nothing to add."),
            },
            "play" | "p" => {
                play(&mut store, &mut ticker, &advisor, &words[1..]).await;
            }
            _ => println!("Unknown command '{}'. Type 'help'.", command),
        }
    }

    tracing::info!("Goodbye.");
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Apply every tick owed; returns whether the term ended
fn pump_ticks(store: &mut GameStore, ticker: &mut TermTicker) -> bool {
    let due = ticker.due_ticks(Instant::now());
    for _ in 0..due {
        if store.tick() == TickOutcome::Expired {
            ticker.disarm();
            println!("\nTime is up.");
            print_summary(store);
            return true;
        }
    }
    false
}

fn prompt(store: &GameStore) -> io::Result<()> {
    let s = store.stats();
    print!(
        "[{} | A {} P {} S {}] > ",
        format_clock(store.term().seconds_left()),
        s.approval,
        s.power,
        s.standing
    );
    io::stdout().flush()
}

fn parse_difficulty(word: &str) -> Option<Difficulty> {
    match word {
        "easy" | "e" => Some(Difficulty::Easy),
        "medium" | "m" => Some(Difficulty::Medium),
        "hard" | "h" => Some(Difficulty::Hard),
        _ => None,
    }
}

/// `play <card # or id> [pass|fail] [misses]`
async fn play(store: &mut GameStore, ticker: &mut TermTicker, advisor: &Advisor, args: &[&str]) {
    let Some(which) = args.first() else {
        println!("Usage: play <card # or id> [pass|fail] [misses] [easy|medium|hard]");
        return;
    };
    let hand = store.hand();
    let card = match which.parse::<usize>() {
        Ok(n) if n >= 1 && n <= hand.len() => Some(hand[n - 1].clone()),
        _ => store.catalog().get(which).cloned(),
    };
    let Some(card) = card else {
        println!("No card '{}'.", which);
        return;
    };
    let approved = !matches!(args.get(1).copied(), Some("fail") | Some("f"));
    let rounds = store.config().minigame_rounds;
    let misses = args
        .get(2)
        .and_then(|w| w.parse::<u32>().ok())
        .unwrap_or(0)
        .min(rounds);
    let difficulty = args
        .get(3)
        .and_then(|w| parse_difficulty(w))
        .unwrap_or(card.difficulty);
    let outcome = MiniGameOutcome::new(approved, misses, rounds);

    let was_running = store.term().is_running();
    let pending = match store.begin_resolution(&card.id, difficulty, outcome) {
        Ok(Some(pending)) => pending,
        Ok(None) => {
            println!("The term is over. Use 'reset' to play again.");
            return;
        }
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    if !was_running {
        ticker.arm(Instant::now());
    }

    let advice = advisor.comment(&pending.comment_request()).await;
    // The clock kept running while the advisor thought
    pump_ticks(store, ticker);

    match store.commit_resolution(pending, advice) {
        Some(report) => {
            print_report(&report);
            if report.game_result.is_some() {
                ticker.disarm();
                print_summary(store);
            }
        }
        None => println!("Too late: the term ended before the decision landed."),
    }
}

fn print_help(advisor_online: bool) {
    println!("\n=== PERSONA POLITICS ===");
    println!("Govern for one term. Keep approval, power and standing above zero.");
    println!();
    println!("Commands:");
    println!("  start / end / reset      - Term lifecycle");
    println!("  hand / h                 - Show the policy cards on the desk");
    println!("  play <#|id> [pass|fail] [misses] [difficulty]");
    println!("                           - Resolve a policy");
    println!("  status / s               - Headline stats and clock");
    println!("  econ / foreign / cabinet / poll / events");
    println!("  dismiss <id>             - Dismiss a world event");
    println!("  shuffle                  - Replace a resigned minister");
    println!("  remark                   - Hear the next secretary remark");
    println!("  quit / q                 - Exit");
    if !advisor_online {
        println!("(Advisor offline: set OLLAMA_URL or LLM_API_KEY for live comments)");
    }
    println!();
}

fn print_status(store: &GameStore) {
    let s = store.stats();
    println!(
        "Term {:?}, {} left. Approval {}, Power {}, Standing {}.",
        store.term().phase(),
        format_clock(store.term().seconds_left()),
        s.approval,
        s.power,
        s.standing
    );
    println!(
        "Policies resolved: {}. Legacy now {:.1}, best {:.1}.",
        store.policy_log().len(),
        store.current_legacy_index(),
        store.legacy().best().best_index
    );
    if store.cabinet().has_pending_shuffle() {
        println!("A minister has resigned. Use 'shuffle'.");
    }
}

fn print_hand(store: &GameStore) {
    for (i, card) in store.hand().iter().enumerate() {
        let (_, on_approve) = store.preview_economy(&card.id, card.difficulty, Decision::Approve);
        println!(
            "  {}. {} [{}] - {} (business: {:?})",
            i + 1,
            card.title,
            card.difficulty.as_str(),
            card.description,
            on_approve
        );
    }
}

fn print_economy(store: &GameStore) {
    let e = store.economy();
    println!(
        "GDP {:.1} | Inflation {:.1}% | Unemployment {:.1}% | Market {:.1} | Confidence {:.1}",
        e.gdp(),
        e.infl(),
        e.unemp(),
        e.market(),
        e.conf()
    );
}

fn print_foreign(store: &GameStore) {
    for (bloc, opinion) in store.foreign().iter() {
        println!(
            "  {:<6} {:>5.1} {:?} - {}",
            bloc.label(),
            opinion.score,
            opinion.stance,
            opinion.reason
        );
    }
}

fn print_cabinet(store: &GameStore) {
    for (key, minister) in store.cabinet().iter() {
        println!(
            "  {:<8} {:<20} loyalty {:>3} {:?}{}",
            key.label(),
            minister.name,
            minister.loyalty,
            minister.status,
            minister
                .last_reason
                .as_deref()
                .map(|r| format!(" ({})", r))
                .unwrap_or_default()
        );
    }
}

fn print_poll(store: &GameStore) {
    let poll = store.exit_poll();
    println!("Sample {} | MoE +/-{:.1}", poll.sample, poll.moe);
    for bracket in AgeBracket::ALL {
        println!("  age {:<6} {:>5.1}", bracket.label(), poll.age(bracket));
    }
    for gender in Gender::ALL {
        println!("  {:<10} {:>5.1}", gender.label(), poll.gender(gender));
    }
    println!(
        "  own party {:.1} | urban {:.1} | rural {:.1} | undecided {:.1} | overall {:.1}",
        poll.own_party,
        poll.urban,
        poll.rural,
        poll.undecided,
        poll.overall()
    );
}

fn print_events(store: &GameStore) {
    if store.world_events().is_empty() {
        println!("No world events.");
    }
    for event in store.world_events() {
        println!("  #{} [{:?}] {} - {}", event.id, event.urgency, event.headline, event.detail);
    }
}

fn print_report(report: &ResolutionReport) {
    let d = report.stat_delta;
    println!(
        "{} {:?}: approval {:+}, power {:+}, standing {:+}",
        report.title, report.decision, d.approval, d.power, d.standing
    );
    println!("Advisor: {}", report.advisor_comment);
    for r in &report.resignations {
        println!("{} has resigned as {} minister.", r.name, r.minister.label());
    }
    if let Some(event) = &report.world_event {
        println!("BREAKING: {} - {}", event.headline, event.detail);
    }
    if let Some(next) = &report.next_card {
        println!("New card on the desk: {}", next);
    }
}

fn print_summary(store: &GameStore) {
    let Some(summary) = store.term_summary() else {
        return;
    };
    println!("\n=== TERM OVER ===");
    if let Some(result) = summary.result {
        println!("Result: {:?}", result);
    }
    println!("{} ({}): {}", summary.tier.title(), summary.total, summary.tier.line());
    println!(
        "Policies: {} | World events: {} | Legacy {:.1} {}{}",
        summary.policies_resolved,
        summary.world_events_seen,
        summary.legacy_index,
        summary.legacy_title.label(),
        if summary.new_best { " (new best!)" } else { "" }
    );
}
