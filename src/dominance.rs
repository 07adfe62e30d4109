// Ownership dominance: which agent may capture which cell
//
// Ids fall into three classes by their residue mod 3. Each class beats exactly one
// other class; ids in the same class cannot take each other's cells.

use crate::types::{Board, Position};

/// Whether an agent with `self_id` can capture a cell owned by `owner_id`
pub fn wins(self_id: u32, owner_id: u32) -> bool {
    owner_id == 0 || (self_id as i64 - owner_id as i64).rem_euclid(3) == 2
}

/// Whether `self_id` can capture the cell at `pos`; cells off the board cannot be captured
pub fn wins_cell(self_id: u32, board: &Board, pos: &Position) -> bool {
    board.owner(pos).is_some_and(|owner| wins(self_id, owner))
}
