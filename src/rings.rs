// Expanding diamond-ring search for capturable cells
//
// Rings are Manhattan shells around the agent. Each shell is split into four
// quarters, one per cardinal direction, and the quarters are visited in the
// agent's move-history order so recent directions are preferred on ties.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::dominance;
use crate::scoring::CandidateScorer;
use crate::types::{Board, Enemy, Move, Position};

/// How the ring scan stops and how a target is chosen from what it found
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetSearchStrategy {
    /// Take the first candidate in scan order
    FirstMatch,
    /// Collect whole rings until enough candidates exist, then score them
    Ranked,
}

/// Which cells count as too close to an enemy
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThreatModel {
    /// Enemy Manhattan distance below the configured threat distance
    Manhattan,
    /// The 3x3 block centred on each enemy
    Neighborhood,
}

/// Per-radius, per-direction offsets tracing each quarter of a diamond shell.
/// Consecutive offsets within a quarter are diagonal neighbours on the shell.
#[derive(Debug, Clone)]
pub struct RingOffsetTable {
    // rings[r - 1][direction slot]
    rings: Vec<[Vec<(i32, i32)>; 4]>,
}

impl RingOffsetTable {
    pub fn new(max_radius: i32) -> Self {
        let rings = (1..=max_radius.max(0))
            .map(|r| {
                [
                    Self::quarter(r, Move::Up),
                    Self::quarter(r, Move::Right),
                    Self::quarter(r, Move::Down),
                    Self::quarter(r, Move::Left),
                ]
            })
            .collect();
        RingOffsetTable { rings }
    }

    /// Quarter of the radius-`r` shell starting on the `direction` axis and
    /// turning clockwise (Up starts at (0, r), Right at (r, 0), ...)
    fn quarter(r: i32, direction: Move) -> Vec<(i32, i32)> {
        match direction {
            Move::Up => (0..r).map(|i| (i, r - i)).collect(),
            Move::Right => (0..r).map(|i| (r - i, -i)).collect(),
            Move::Down => (0..r).map(|i| (-i, -r + i)).collect(),
            Move::Left => (0..r).map(|i| (-r + i, i)).collect(),
            Move::Stay => Vec::new(),
        }
    }

    pub fn max_radius(&self) -> i32 {
        self.rings.len() as i32
    }

    /// Offsets of one shell quarter; empty for radii outside the table or `Stay`
    pub fn offsets(&self, radius: i32, direction: Move) -> &[(i32, i32)] {
        let slot = match direction {
            Move::Up => 0,
            Move::Right => 1,
            Move::Down => 2,
            Move::Left => 3,
            Move::Stay => return &[],
        };
        if radius < 1 {
            return &[];
        }
        self.rings
            .get(radius as usize - 1)
            .map(|quarters| quarters[slot].as_slice())
            .unwrap_or(&[])
    }
}

/// Enemy proximity rule used by the ring scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatZone {
    pub model: ThreatModel,
    pub distance: i32,
}

impl ThreatZone {
    pub fn is_threatened(&self, pos: &Position, enemies: &[Enemy]) -> bool {
        enemies.iter().any(|e| match self.model {
            ThreatModel::Manhattan => e.position.manhattan(pos) < self.distance,
            ThreatModel::Neighborhood => e.position.chebyshev(pos) <= 1,
        })
    }
}

/// Read-only view of one tick, shared by every decision step
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub self_id: u32,
    pub origin: Position,
    pub board: &'a Board,
    pub enemies: &'a [Enemy],
    pub grid_size: i32,
    pub zone: ThreatZone,
}

impl<'a> SearchContext<'a> {
    /// In bounds and capturable, ignoring enemies. Cells the board does not carry never are.
    pub fn is_winnable(&self, pos: &Position) -> bool {
        pos.is_valid(self.grid_size) && dominance::wins_cell(self.self_id, self.board, pos)
    }

    /// In bounds, capturable and out of every enemy's reach
    pub fn is_candidate(&self, pos: &Position) -> bool {
        self.is_winnable(pos) && !self.zone.is_threatened(pos, self.enemies)
    }
}

/// A capturable cell and the ring it was discovered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: Position,
    pub radius: i32,
}

/// Ring scan plus target selection, built once per agent
#[derive(Debug, Clone)]
pub struct RingSearch {
    table: RingOffsetTable,
    strategy: TargetSearchStrategy,
    min_candidates: usize,
    fallback: Position,
}

impl RingSearch {
    pub fn new(config: &SearchConfig) -> Self {
        RingSearch {
            table: RingOffsetTable::new(config.max_radius),
            strategy: config.strategy,
            min_candidates: config.min_candidates,
            fallback: config.fallback,
        }
    }

    /// Scans rings outward and returns candidates in discovery order.
    ///
    /// First-match returns at most one candidate. Ranked finishes the ring on
    /// which the candidate count reaches `min_candidates`, then stops.
    pub fn candidates(&self, ctx: &SearchContext, order: &[Move; 4]) -> Vec<Candidate> {
        let last_radius = (ctx.grid_size - 1).min(self.table.max_radius());
        let mut found = Vec::new();

        for radius in 1..=last_radius {
            for &direction in order {
                for &offset in self.table.offsets(radius, direction) {
                    let position = ctx.origin.add(offset);
                    if !ctx.is_candidate(&position) {
                        continue;
                    }
                    found.push(Candidate { position, radius });
                    if self.strategy == TargetSearchStrategy::FirstMatch {
                        return found;
                    }
                }
            }
            if found.len() >= self.min_candidates {
                break;
            }
        }

        found
    }

    /// Chooses the cell to head for this tick, or the fallback when nothing is capturable
    pub fn find_target(
        &self,
        ctx: &SearchContext,
        order: &[Move; 4],
        scorer: &CandidateScorer,
    ) -> Position {
        let candidates = self.candidates(ctx, order);
        let chosen = match self.strategy {
            TargetSearchStrategy::FirstMatch => candidates.first().map(|c| c.position),
            TargetSearchStrategy::Ranked => scorer.best(ctx, &candidates),
        };
        chosen.unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashSet;

    fn manhattan_zone() -> ThreatZone {
        ThreatZone {
            model: ThreatModel::Manhattan,
            distance: 3,
        }
    }

    fn search(strategy: TargetSearchStrategy) -> RingSearch {
        let mut config = Config::default_hardcoded().search;
        config.strategy = strategy;
        RingSearch::new(&config)
    }

    #[test]
    fn test_ring_quarters_cover_shell_exactly_once() {
        let table = RingOffsetTable::new(6);
        for r in 1..=6 {
            let mut seen = HashSet::new();
            for mv in Move::cardinals() {
                let quarter = table.offsets(r, mv);
                assert_eq!(quarter.len() as i32, r);
                for &(dx, dy) in quarter {
                    assert_eq!(dx.abs() + dy.abs(), r);
                    assert!(seen.insert((dx, dy)), "duplicate offset {:?}", (dx, dy));
                }
            }
            assert_eq!(seen.len() as i32, 4 * r);
        }
    }

    #[test]
    fn test_quarter_offsets_are_adjacent_on_shell() {
        let table = RingOffsetTable::new(5);
        for mv in Move::cardinals() {
            for pair in table.offsets(5, mv).windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert_eq!((a.0 - b.0).abs(), 1);
                assert_eq!((a.1 - b.1).abs(), 1);
            }
        }
    }

    #[test]
    fn test_quarter_starts_on_its_axis() {
        let table = RingOffsetTable::new(3);
        assert_eq!(table.offsets(3, Move::Up)[0], (0, 3));
        assert_eq!(table.offsets(3, Move::Right)[0], (3, 0));
        assert_eq!(table.offsets(3, Move::Down)[0], (0, -3));
        assert_eq!(table.offsets(3, Move::Left)[0], (-3, 0));
    }

    #[test]
    fn test_offsets_outside_table_are_empty() {
        let table = RingOffsetTable::new(2);
        assert!(table.offsets(0, Move::Up).is_empty());
        assert!(table.offsets(3, Move::Up).is_empty());
        assert!(table.offsets(1, Move::Stay).is_empty());
    }

    #[test]
    fn test_manhattan_and_neighborhood_threats_differ() {
        let enemies = [Enemy {
            id: 2,
            position: Position::new(5, 5),
        }];
        let neighborhood = ThreatZone {
            model: ThreatModel::Neighborhood,
            distance: 3,
        };
        // Diagonal neighbour: threatened under both
        assert!(manhattan_zone().is_threatened(&Position::new(6, 6), &enemies));
        assert!(neighborhood.is_threatened(&Position::new(6, 6), &enemies));
        // Two steps straight out: Manhattan only
        assert!(manhattan_zone().is_threatened(&Position::new(7, 5), &enemies));
        assert!(!neighborhood.is_threatened(&Position::new(7, 5), &enemies));
    }

    #[test]
    fn test_first_match_returns_first_scan_hit() {
        let board = Board::filled(5, 0);
        let ctx = SearchContext {
            self_id: 1,
            origin: Position::new(2, 2),
            board: &board,
            enemies: &[],
            grid_size: 5,
            zone: manhattan_zone(),
        };
        let order = [Move::Left, Move::Up, Move::Right, Move::Down];
        let found = search(TargetSearchStrategy::FirstMatch).candidates(&ctx, &order);
        assert_eq!(
            found,
            vec![Candidate {
                position: Position::new(1, 2),
                radius: 1
            }]
        );
    }

    #[test]
    fn test_ranked_finishes_the_threshold_ring() {
        let board = Board::filled(7, 0);
        let ctx = SearchContext {
            self_id: 1,
            origin: Position::new(3, 3),
            board: &board,
            enemies: &[],
            grid_size: 7,
            zone: manhattan_zone(),
        };
        let order = Config::default_hardcoded().history.initial_order;
        let found = search(TargetSearchStrategy::Ranked).candidates(&ctx, &order);
        // Ring 1 yields 4, ring 2 is scanned in full for 8 more
        assert_eq!(found.len(), 12);
        assert!(found[..4].iter().all(|c| c.radius == 1));
        assert!(found[4..].iter().all(|c| c.radius == 2));
    }

    #[test]
    fn test_unwinnable_board_falls_back_to_origin() {
        // Id 4 shares agent 1's class, so nothing can be taken
        let board = Board::filled(6, 4);
        let ctx = SearchContext {
            self_id: 1,
            origin: Position::new(3, 2),
            board: &board,
            enemies: &[],
            grid_size: 6,
            zone: manhattan_zone(),
        };
        let scorer = CandidateScorer::new(&Config::default_hardcoded().scores);
        let order = [Move::Up, Move::Right, Move::Down, Move::Left];
        for strategy in [TargetSearchStrategy::FirstMatch, TargetSearchStrategy::Ranked] {
            let ring_search = search(strategy);
            assert!(ring_search.candidates(&ctx, &order).is_empty());
            let target = ring_search.find_target(&ctx, &order, &scorer);
            assert_eq!(target, Position::ORIGIN);
        }
    }

    #[test]
    fn test_candidates_stay_in_bounds_from_corner() {
        let board = Board::filled(4, 0);
        let ctx = SearchContext {
            self_id: 1,
            origin: Position::new(0, 0),
            board: &board,
            enemies: &[],
            grid_size: 4,
            zone: manhattan_zone(),
        };
        let order = [Move::Down, Move::Left, Move::Up, Move::Right];
        let found = search(TargetSearchStrategy::Ranked).candidates(&ctx, &order);
        assert!(!found.is_empty());
        assert!(found.iter().all(|c| c.position.is_valid(4)));
    }

    #[test]
    fn test_scan_is_capped_by_table_radius() {
        let mut config = Config::default_hardcoded().search;
        config.max_radius = 2;
        let ring_search = RingSearch::new(&config);
        let mut board = Board::filled(10, 4);
        board.set_owner(&Position::new(0, 9), 0);
        let ctx = SearchContext {
            self_id: 1,
            origin: Position::new(9, 0),
            board: &board,
            enemies: &[],
            grid_size: 10,
            zone: manhattan_zone(),
        };
        let order = [Move::Up, Move::Right, Move::Down, Move::Left];
        assert!(ring_search.candidates(&ctx, &order).is_empty());
    }
}
