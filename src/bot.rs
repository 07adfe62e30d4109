// Game session registry behind the HTTP endpoints
//
// The server may play several games at once. Each game gets its own Agent,
// created on /start and dropped on /end, so no state leaks between games.
// Games whose /end never arrives are evicted least-recently-used first once the
// table is full.

use log::{info, warn};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;

use crate::agent::Agent;
use crate::config::Config;
use crate::debug_logger::{DebugLogger, LogEntry};
use crate::types::{Move, TurnRequest};

/// Games kept in memory before the least recently used one is dropped
pub const DEFAULT_MAX_SESSIONS: usize = 256;

struct Session {
    agent: Agent,
    last_used: u64,
}

#[derive(Default)]
struct SessionTable {
    games: HashMap<String, Session>,
    clock: u64,
}

impl SessionTable {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Evicts idle games until one more fits under `max_sessions`
    fn make_room(&mut self, max_sessions: usize) {
        while self.games.len() >= max_sessions {
            let stalest = self
                .games
                .iter()
                .min_by_key(|(_, session)| session.last_used)
                .map(|(game_id, _)| game_id.clone());
            match stalest {
                Some(game_id) => {
                    warn!("Session table full, dropping idle game {}", game_id);
                    self.games.remove(&game_id);
                }
                None => break,
            }
        }
    }
}

/// Territory bot with one decision engine per running game
pub struct Bot {
    config: Config,
    sessions: Mutex<SessionTable>,
    max_sessions: usize,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `logger` - Decision log sink, `DebugLogger::disabled()` to turn it off
    pub fn new(config: Config, logger: DebugLogger) -> Self {
        Bot {
            config,
            sessions: Mutex::new(SessionTable::default()),
            max_sessions: DEFAULT_MAX_SESSIONS,
            logger,
        }
    }

    /// Caps the number of concurrently tracked games (at least one)
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": self.config.identity.author,
            "name": self.config.identity.name,
            "color": self.config.identity.color,
        })
    }

    /// Called when a game starts; replaces any stale session for the same game id
    /// Corresponds to POST /start endpoint
    pub fn start(&self, req: &TurnRequest) {
        info!("GAME START {} as agent {}", req.game_id, req.you.id);
        let mut table = self.sessions.lock();
        let now = table.tick();
        if !table.games.contains_key(&req.game_id) {
            table.make_room(self.max_sessions);
        }
        table.games.insert(
            req.game_id.clone(),
            Session {
                agent: Agent::new(req.you.id, &self.config),
                last_used: now,
            },
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, req: &TurnRequest) {
        info!("GAME OVER {}", req.game_id);
        self.sessions.lock().games.remove(&req.game_id);
    }

    /// Computes the next move for one game
    /// Corresponds to POST /move endpoint
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move
    pub fn get_move(&self, req: &TurnRequest) -> Value {
        let chosen_move = self.decide(req);
        json!({ "move": chosen_move.as_str() })
    }

    /// Runs the game's agent for one tick, creating it if /start was missed.
    /// A turn-0 request for a game that already moved starts it over.
    pub fn decide(&self, req: &TurnRequest) -> Move {
        let start_time = Instant::now();

        let chosen_move = {
            let mut table = self.sessions.lock();
            let now = table.tick();

            if req.turn == 0 {
                if let Some(session) = table.games.get_mut(&req.game_id) {
                    if session.agent.last_target().is_some() {
                        info!("Game {} restarted at turn 0, resetting its agent", req.game_id);
                        session.agent = Agent::new(req.you.id, &self.config);
                    }
                }
            }

            if !table.games.contains_key(&req.game_id) {
                warn!(
                    "Turn {}: no session for game {}, starting one",
                    req.turn, req.game_id
                );
                table.make_room(self.max_sessions);
            }
            let session = table
                .games
                .entry(req.game_id.clone())
                .or_insert_with(|| Session {
                    agent: Agent::new(req.you.id, &self.config),
                    last_used: now,
                });
            session.last_used = now;
            session.agent.place(req.you.position);
            session
                .agent
                .determine_next_move(&req.board, &req.enemies, &req.game_info)
        };

        info!(
            "Turn {}: Chose {} (game: {}, time: {}us)",
            req.turn,
            chosen_move.as_str(),
            req.game_id,
            start_time.elapsed().as_micros()
        );

        self.logger.log_move(LogEntry::from_request(req, chosen_move));
        chosen_move
    }

    /// Number of games currently being played
    pub fn session_count(&self) -> usize {
        self.sessions.lock().games.len()
    }
}
