// Per-game decision engine
//
// One Agent lives for one game. Its move history and ring table are the only
// state carried between ticks; everything else arrives fresh with each call.

use log::debug;

use crate::config::Config;
use crate::direction::DirectionSelector;
use crate::dominance;
use crate::history::MoveHistory;
use crate::rings::{RingSearch, SearchContext, ThreatZone};
use crate::scoring::CandidateScorer;
use crate::types::{Board, Enemy, GameInfo, Move, Position};

pub struct Agent {
    id: u32,
    position: Position,
    name: String,
    contributor: String,
    history: MoveHistory,
    search: RingSearch,
    scorer: CandidateScorer,
    selector: DirectionSelector,
    zone: ThreatZone,
    last_target: Option<Position>,
}

impl Agent {
    /// Creates an agent for one game
    ///
    /// # Arguments
    /// * `id` - Ownership tag this agent paints the board with
    /// * `config` - Validated configuration; an invalid history order falls back to the default
    pub fn new(id: u32, config: &Config) -> Self {
        Agent {
            id,
            position: Position::ORIGIN,
            name: config.identity.name.clone(),
            contributor: config.identity.author.clone(),
            history: MoveHistory::with_order(config.history.initial_order).unwrap_or_default(),
            search: RingSearch::new(&config.search),
            scorer: CandidateScorer::new(&config.scores),
            selector: DirectionSelector::new(config.scores.win_bonus),
            zone: ThreatZone {
                model: config.search.threat_model,
                distance: config.search.threat_distance,
            },
            last_target: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Sets the agent's current cell; the host calls this before every tick
    pub fn place(&mut self, position: Position) {
        self.position = position;
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Target chosen on the most recent non-stay tick
    pub fn last_target(&self) -> Option<Position> {
        self.last_target
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contributor(&self) -> &str {
        &self.contributor
    }

    /// Decides this tick's move.
    ///
    /// Holds position when the current cell is already won and no enemy threatens
    /// it. Otherwise searches for a target, steers toward it and records the move.
    pub fn determine_next_move(
        &mut self,
        board: &Board,
        enemies: &[Enemy],
        game_info: &GameInfo,
    ) -> Move {
        let enemies: Vec<Enemy> = enemies.iter().filter(|e| e.id != self.id).copied().collect();

        let ctx = SearchContext {
            self_id: self.id,
            origin: self.position,
            board,
            enemies: &enemies,
            grid_size: game_info.grid_size,
            zone: self.zone,
        };

        if self.should_stay(&ctx) {
            debug!("Agent {} holding {}", self.id, self.position);
            return Move::Stay;
        }

        let target = self
            .search
            .find_target(&ctx, self.history.order(), &self.scorer);
        let chosen = self.selector.select(&ctx, &target, &self.history);
        self.history.commit(chosen);
        self.last_target = Some(target);

        debug!(
            "Agent {} at {} targeting {} via {}",
            self.id,
            self.position,
            target,
            chosen.as_str()
        );
        chosen
    }

    // Holding always uses Manhattan distance, whichever model filters candidates
    fn should_stay(&self, ctx: &SearchContext) -> bool {
        ctx.origin.is_valid(ctx.grid_size)
            && ctx
                .enemies
                .iter()
                .all(|e| e.position.manhattan(&ctx.origin) >= ctx.zone.distance)
            && dominance::wins_cell(self.id, ctx.board, &ctx.origin)
    }
}
