// Replay module for checking logged decisions against the current engine
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay every logged game through a fresh agent, tick by tick
// 3. Compare logged vs replayed moves
// 4. Report match rates and reversal counts

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::agent::Agent;
use crate::config::Config;
use crate::debug_logger::LogEntry;
use crate::types::Move;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to open log file: {0}")]
    Open(#[source] std::io::Error),
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid move: {0}")]
    InvalidMove(String),
    #[error("game {0} not found in log")]
    GameNotFound(String),
}

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub game_id: String,
    pub turn: u32,
    pub original_move: Move,
    pub replayed_move: Move,
    pub matches: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub games: usize,
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
    /// Replayed moves that immediately undo the previous move of the same game
    pub reversals: usize,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, ReplayError> {
        let file = File::open(log_path.as_ref()).map_err(ReplayError::Open)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ReplayError::Read {
                line: idx + 1,
                source,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|source| {
                ReplayError::Parse {
                    line: idx + 1,
                    source,
                }
            })?;
            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Splits entries into games, in order of each game's first appearance,
    /// with every game's ticks sorted by turn
    pub fn group_games(entries: &[LogEntry]) -> Vec<(String, Vec<LogEntry>)> {
        let mut games: Vec<(String, Vec<LogEntry>)> = Vec::new();
        for entry in entries {
            match games.iter_mut().find(|(id, _)| *id == entry.game_id) {
                Some((_, ticks)) => ticks.push(entry.clone()),
                None => games.push((entry.game_id.clone(), vec![entry.clone()])),
            }
        }
        for (_, ticks) in games.iter_mut() {
            ticks.sort_by_key(|e| e.turn);
        }
        games
    }

    /// Replays one game's ticks, in order, through a single fresh agent
    pub fn replay_game(&self, ticks: &[LogEntry]) -> Result<Vec<ReplayResult>, ReplayError> {
        let Some(first) = ticks.first() else {
            return Ok(Vec::new());
        };
        let mut agent = Agent::new(first.you.id, &self.config);
        let mut results = Vec::with_capacity(ticks.len());

        for entry in ticks {
            let original_move = Move::parse(&entry.chosen_move)
                .ok_or_else(|| ReplayError::InvalidMove(entry.chosen_move.clone()))?;

            agent.place(entry.you.position);
            let replayed_move =
                agent.determine_next_move(&entry.board, &entry.enemies, &entry.game_info);
            let matches = original_move == replayed_move;

            if self.verbose {
                if matches {
                    info!(
                        "Game {} turn {}: MATCH - {}",
                        entry.game_id,
                        entry.turn,
                        replayed_move.as_str()
                    );
                } else {
                    warn!(
                        "Game {} turn {}: MISMATCH - Original: {}, Replayed: {}",
                        entry.game_id,
                        entry.turn,
                        original_move.as_str(),
                        replayed_move.as_str()
                    );
                }
            }

            results.push(ReplayResult {
                game_id: entry.game_id.clone(),
                turn: entry.turn,
                original_move,
                replayed_move,
                matches,
            });
        }

        Ok(results)
    }

    /// Replays every game in the log, games in parallel
    pub fn replay_all(&self, entries: &[LogEntry]) -> Result<Vec<ReplayResult>, ReplayError> {
        let games = Self::group_games(entries);
        let per_game: Vec<Result<Vec<ReplayResult>, ReplayError>> = games
            .par_iter()
            .map(|(_, ticks)| self.replay_game(ticks))
            .collect();

        let mut results = Vec::new();
        for game in per_game {
            results.extend(game?);
        }
        Ok(results)
    }

    /// Replays a single game by id
    pub fn replay_one(
        &self,
        entries: &[LogEntry],
        game_id: &str,
    ) -> Result<Vec<ReplayResult>, ReplayError> {
        let games = Self::group_games(entries);
        let (_, ticks) = games
            .iter()
            .find(|(id, _)| id == game_id)
            .ok_or_else(|| ReplayError::GameNotFound(game_id.to_string()))?;
        self.replay_game(ticks)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        let mut games = 0;
        let mut reversals = 0;
        for (idx, result) in results.iter().enumerate() {
            let previous = idx.checked_sub(1).map(|p| &results[p]);
            match previous {
                Some(prev) if prev.game_id == result.game_id => {
                    if result.replayed_move.is_cardinal()
                        && prev.replayed_move.opposite() == result.replayed_move
                    {
                        reversals += 1;
                    }
                }
                _ => games += 1,
            }
        }

        ReplayStats {
            games,
            total_turns,
            matches,
            mismatches,
            match_rate,
            reversals,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Games:          {}", stats.games);
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Reversals:      {}", stats.reversals);
        println!("═══════════════════════════════════════════════════════════\n");

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Game {} turn {}: {} → {}",
                    result.game_id,
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed_move.as_str()
                );
            }
            println!();
        }
    }
}
