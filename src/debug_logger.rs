// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each decision is written as one JSONL line.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Board, Enemy, GameInfo, Move, TurnRequest, You};

/// One logged decision: the full tick input plus the move returned
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub game_id: String,
    pub turn: u32,
    pub you: You,
    pub board: Board,
    pub enemies: Vec<Enemy>,
    pub game_info: GameInfo,
    pub chosen_move: String,
    pub timestamp: String,
}

impl LogEntry {
    pub fn from_request(req: &TurnRequest, chosen_move: Move) -> Self {
        LogEntry {
            game_id: req.game_id.clone(),
            turn: req.turn,
            you: req.you,
            board: req.board.clone(),
            enemies: req.enemies.clone(),
            game_info: req.game_info,
            chosen_move: chosen_move.as_str().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a decision asynchronously (fire-and-forget).
    /// Must be called from inside a tokio runtime when enabled.
    pub fn log_move(&self, entry: LogEntry) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: LogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }

    /// Logs a decision and waits until it is on disk
    pub async fn log_move_now(&self, entry: LogEntry) {
        if self.enabled {
            Self::write_entry(self.file.clone(), entry).await;
        }
    }
}
