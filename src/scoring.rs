// Candidate ranking for the ranked ring search

use serde::{Deserialize, Serialize};

use crate::config::ScoresConfig;
use crate::rings::{Candidate, SearchContext};
use crate::types::{Move, Position};

/// How penalties from several nearby enemies combine
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThreatAggregation {
    /// Every enemy inside the horizon contributes
    Sum,
    /// Only the closest enemy contributes
    Nearest,
}

#[derive(Debug, Clone)]
pub struct CandidateScorer {
    ring_penalty: i32,
    flexibility_bonus: i32,
    threat_horizon: i32,
    aggregation: ThreatAggregation,
}

impl CandidateScorer {
    pub fn new(config: &ScoresConfig) -> Self {
        CandidateScorer {
            ring_penalty: config.ring_penalty,
            flexibility_bonus: config.flexibility_bonus,
            threat_horizon: config.threat_horizon,
            aggregation: config.threat_aggregation,
        }
    }

    /// Total score of one candidate: ring distance, follow-up room and enemy pressure
    pub fn score(&self, ctx: &SearchContext, candidate: &Candidate) -> i32 {
        (candidate.radius - 1) * self.ring_penalty + self.flexibility(ctx, &candidate.position)
            - self.threat_penalty(ctx, &candidate.position)
    }

    fn flexibility(&self, ctx: &SearchContext, target: &Position) -> i32 {
        let has_follow_up = Move::cardinals()
            .iter()
            .any(|&mv| ctx.is_winnable(&target.step(mv)));
        if has_follow_up {
            self.flexibility_bonus
        } else {
            0
        }
    }

    fn threat_penalty(&self, ctx: &SearchContext, target: &Position) -> i32 {
        let penalties = ctx
            .enemies
            .iter()
            .map(|e| e.position.manhattan(target))
            .filter(|&d| d < self.threat_horizon)
            .map(|d| self.threat_horizon - d);

        match self.aggregation {
            ThreatAggregation::Sum => penalties.sum::<i32>(),
            ThreatAggregation::Nearest => penalties.max().unwrap_or(0),
        }
    }

    /// Highest scoring candidate; the earliest discovered wins ties
    pub fn best(&self, ctx: &SearchContext, candidates: &[Candidate]) -> Option<Position> {
        let mut best: Option<(Position, i32)> = None;
        for candidate in candidates {
            let score = self.score(ctx, candidate);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate.position, score));
            }
        }
        best.map(|(position, _)| position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rings::{ThreatModel, ThreatZone};
    use crate::types::{Board, Enemy};

    fn scorer() -> CandidateScorer {
        CandidateScorer::new(&Config::default_hardcoded().scores)
    }

    fn ctx<'a>(board: &'a Board, enemies: &'a [Enemy]) -> SearchContext<'a> {
        SearchContext {
            self_id: 1,
            origin: Position::new(2, 2),
            board,
            enemies,
            grid_size: board.size() as i32,
            zone: ThreatZone {
                model: ThreatModel::Manhattan,
                distance: 3,
            },
        }
    }

    fn candidate(x: i32, y: i32, radius: i32) -> Candidate {
        Candidate {
            position: Position::new(x, y),
            radius,
        }
    }

    #[test]
    fn test_ring_penalty_and_flexibility() {
        let board = Board::filled(5, 0);
        let ctx = ctx(&board, &[]);
        assert_eq!(scorer().score(&ctx, &candidate(2, 3, 1)), 1000);
        assert_eq!(scorer().score(&ctx, &candidate(2, 4, 2)), 500);
        assert_eq!(scorer().score(&ctx, &candidate(0, 2, 3)), 0);
    }

    #[test]
    fn test_no_flexibility_when_neighbours_are_lost() {
        // Only (1, 1) is capturable; all of its neighbours belong to id 4
        let mut board = Board::filled(3, 4);
        board.set_owner(&Position::new(1, 1), 0);
        let ctx = ctx(&board, &[]);
        assert_eq!(scorer().score(&ctx, &candidate(1, 1, 1)), 0);
    }

    #[test]
    fn test_threat_penalty_sums_enemies_inside_horizon() {
        let board = Board::filled(5, 0);
        let enemies = [
            Enemy { id: 2, position: Position::new(0, 0) },
            Enemy { id: 3, position: Position::new(4, 4) },
            Enemy { id: 5, position: Position::new(200, 200) },
        ];
        let ctx = ctx(&board, &enemies);
        // Distances from (2, 3): 5 and 3; the far enemy is ignored
        assert_eq!(scorer().score(&ctx, &candidate(2, 3, 1)), 1000 - 95 - 97);
    }

    #[test]
    fn test_nearest_aggregation_uses_closest_enemy_only() {
        let mut config = Config::default_hardcoded().scores;
        config.threat_aggregation = ThreatAggregation::Nearest;
        let nearest = CandidateScorer::new(&config);
        let board = Board::filled(5, 0);
        let enemies = [
            Enemy { id: 2, position: Position::new(0, 0) },
            Enemy { id: 3, position: Position::new(4, 4) },
        ];
        let ctx = ctx(&board, &enemies);
        assert_eq!(nearest.score(&ctx, &candidate(2, 3, 1)), 1000 - 97);
    }

    #[test]
    fn test_ties_go_to_first_discovered() {
        let board = Board::filled(5, 0);
        let ctx = ctx(&board, &[]);
        let pool = [candidate(3, 2, 1), candidate(2, 3, 1), candidate(1, 2, 1)];
        assert_eq!(scorer().best(&ctx, &pool), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_best_prefers_higher_score_over_order() {
        let board = Board::filled(5, 0);
        let ctx = ctx(&board, &[]);
        let pool = [candidate(0, 2, 2), candidate(2, 3, 1)];
        assert_eq!(scorer().best(&ctx, &pool), Some(Position::new(2, 3)));
    }

    #[test]
    fn test_enemy_pressure_overrides_discovery_order() {
        let board = Board::filled(5, 0);
        let enemies = [Enemy { id: 2, position: Position::new(4, 2) }];
        let ctx = ctx(&board, &enemies);
        // Same ring; (3, 2) is one step from the enemy, (1, 2) three
        let pool = [candidate(3, 2, 1), candidate(1, 2, 1)];
        assert_eq!(scorer().score(&ctx, &pool[0]), 1000 - 99);
        assert_eq!(scorer().score(&ctx, &pool[1]), 1000 - 97);
        assert_eq!(scorer().best(&ctx, &pool), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_best_of_nothing_is_none() {
        let board = Board::filled(5, 0);
        assert_eq!(scorer().best(&ctx(&board, &[]), &[]), None);
    }
}
