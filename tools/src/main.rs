//! boxscore-runner: aggregate play-by-play feeds into box-score tables.
//!
//! Usage:
//!   boxscore-runner --db stats.db feeds/746123.json feeds/746124.json
//!   boxscore-runner --config sync.json --workers 4 feeds/*.json
//!   boxscore-runner --dry-run feeds/746123.json
//!
//! Each file holds one game's `playByPlay` document and is named
//! `<game_id>.json`.

use anyhow::{Context, Result};
use boxscore_core::{
    config::{load_known_players, SyncConfig},
    engine::{GameStatRows, GameStatsEngine},
    feed::GameFeed,
    store::{StatsStore, SyncRunSummary},
    types::GameId,
};
use chrono::Utc;
use rayon::prelude::*;
use std::env;
use std::io::{self, Write};
use std::path::Path;

/// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 3] = ["--config", "--db", "--workers"];

enum GameOutcome {
    Aggregated(GameStatRows),
    Empty { game_id: GameId },
    Failed { path: String, reason: String },
}

#[derive(serde::Serialize)]
struct DryRunLine<'a, T: serde::Serialize> {
    table: &'static str,
    row:   &'a T,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => SyncConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => SyncConfig::default(),
    };
    if let Some(db) = flag_value(&args, "--db") {
        config.db_path = db.to_string();
    }
    config.max_workers = parse_arg(&args, "--workers", config.max_workers);
    config.validate()?;

    let dry_run = args.iter().any(|a| a == "--dry-run");
    let files = positional_args(&args);
    if files.is_empty() {
        anyhow::bail!("no play-by-play files given");
    }

    let known_players = config
        .known_players_path
        .as_deref()
        .map(|path| {
            load_known_players(path).with_context(|| format!("loading known players {path}"))
        })
        .transpose()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_workers)
        .build()?;

    let store = if dry_run {
        None
    } else {
        let store = StatsStore::open(&config.db_path)?;
        store.migrate()?;
        Some(store)
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    if let Some(store) = &store {
        store.insert_sync_run(&run_id, Utc::now())?;
    }

    let mut summary = SyncRunSummary::default();
    let mut rows_written = 0usize;
    let total = files.len();

    for (batch_no, batch) in files.chunks(config.game_batch_size).enumerate() {
        let start = batch_no * config.game_batch_size;
        log::info!("Processing batch {start} to {} of {total}", start + batch.len());

        // Order of `collect` follows the input, so output stays deterministic.
        let outcomes: Vec<GameOutcome> = pool.install(|| {
            batch
                .par_iter()
                .map_init(GameStatsEngine::new, |engine, path| aggregate_file(engine, path))
                .collect()
        });

        let mut games = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                GameOutcome::Aggregated(rows) => {
                    summary.games_ok += 1;
                    games.push(rows);
                }
                GameOutcome::Empty { game_id } => {
                    summary.games_skipped += 1;
                    log::info!("game={game_id}: no plays, skipped");
                }
                GameOutcome::Failed { path, reason } => {
                    summary.games_failed += 1;
                    log::warn!("{path}: {reason}");
                }
            }
        }

        if let Some(known) = &known_players {
            for rows in &mut games {
                rows.retain_players(known);
            }
        }

        match &store {
            Some(store) => rows_written += store.upsert_batch(&games)?,
            None => print_rows(&games)?,
        }
        log::info!("Batch {batch_no} committed ({} games)", games.len());
    }

    if let Some(store) = &store {
        store.finish_sync_run(&run_id, Utc::now(), summary)?;
    }

    eprintln!("=== SYNC SUMMARY ===");
    eprintln!("  run_id:        {run_id}");
    eprintln!("  files:         {total}");
    eprintln!("  games ok:      {}", summary.games_ok);
    eprintln!("  games skipped: {}", summary.games_skipped);
    eprintln!("  games failed:  {}", summary.games_failed);
    if store.is_some() {
        eprintln!("  rows written:  {rows_written}");
        eprintln!("  db:            {}", config.db_path);
    }
    Ok(())
}

fn aggregate_file(engine: &mut GameStatsEngine, path: &str) -> GameOutcome {
    let failed = |reason: String| GameOutcome::Failed { path: path.to_string(), reason };

    let Some(game_id) = game_id_from_path(path) else {
        return failed("file name is not <game_id>.json".into());
    };
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return failed(format!("read failed: {e}")),
    };
    let feed = match GameFeed::from_json(&content) {
        Ok(f) => f,
        Err(e) => return failed(format!("game={game_id}: {e}")),
    };
    if feed.is_empty() {
        return GameOutcome::Empty { game_id };
    }
    GameOutcome::Aggregated(engine.aggregate(game_id, &feed))
}

fn game_id_from_path(path: &str) -> Option<GameId> {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.parse().ok())
}

fn print_rows(games: &[GameStatRows]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for rows in games {
        for row in &rows.batting {
            let line = DryRunLine { table: "batting", row };
            writeln!(stdout, "{}", serde_json::to_string(&line)?)?;
        }
        for row in &rows.pitching {
            let line = DryRunLine { table: "pitching", row };
            writeln!(stdout, "{}", serde_json::to_string(&line)?)?;
        }
        for row in &rows.baserunning {
            let line = DryRunLine { table: "baserunning", row };
            writeln!(stdout, "{}", serde_json::to_string(&line)?)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.clone());
        }
    }
    out
}
