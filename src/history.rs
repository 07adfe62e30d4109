// Most-recent-first record of committed cardinal moves

use crate::types::Move;

/// Permutation of the four cardinal moves, most recently committed first.
/// Doubles as the ring scan priority and the source of the reversal veto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistory {
    order: [Move; 4],
}

impl MoveHistory {
    /// Canonical starting order before any move is committed
    pub const DEFAULT_ORDER: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    pub fn new() -> Self {
        MoveHistory {
            order: Self::DEFAULT_ORDER,
        }
    }

    /// Builds a history from an explicit order. Returns `None` unless the order
    /// is a permutation of the four cardinals.
    pub fn with_order(order: [Move; 4]) -> Option<Self> {
        let is_permutation = Move::cardinals()
            .iter()
            .all(|mv| order.iter().filter(|o| *o == mv).count() == 1);
        is_permutation.then_some(MoveHistory { order })
    }

    pub fn order(&self) -> &[Move; 4] {
        &self.order
    }

    pub fn most_recent(&self) -> Move {
        self.order[0]
    }

    /// Moves `mv` to the front, shifting the moves ahead of it back one slot.
    ///
    /// # Panics
    /// If `mv` is `Stay`.
    pub fn commit(&mut self, mv: Move) {
        assert!(mv.is_cardinal(), "cannot commit {:?} to move history", mv);
        // A permutation always contains every cardinal
        let slot = self.order.iter().position(|o| *o == mv).unwrap_or(0);
        self.order[..=slot].rotate_right(1);
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}
