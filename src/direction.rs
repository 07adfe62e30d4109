// Turns a target cell into the single move committed this tick

use crate::history::MoveHistory;
use crate::rings::SearchContext;
use crate::types::{Move, Position};

#[derive(Debug, Clone)]
pub struct DirectionSelector {
    win_bonus: i32,
}

impl DirectionSelector {
    pub fn new(win_bonus: i32) -> Self {
        DirectionSelector { win_bonus }
    }

    /// Picks a cardinal move toward `target`. Never returns `Stay`.
    ///
    /// On a diagonal the move reversing the last committed move is vetoed.
    /// Otherwise the axis with the larger remaining distance wins, plus a
    /// bonus when its first step lands on a capturable cell; horizontal wins ties.
    pub fn select(&self, ctx: &SearchContext, target: &Position, history: &MoveHistory) -> Move {
        let (dx, dy) = ctx.origin.vector_to(target);
        let vertical = if dy > 0 { Move::Up } else { Move::Down };
        let horizontal = if dx > 0 { Move::Right } else { Move::Left };

        if dx == 0 {
            return vertical;
        }
        if dy == 0 {
            return horizontal;
        }

        let counter = history.most_recent().opposite();
        if counter == horizontal {
            return vertical;
        }
        if counter == vertical {
            return horizontal;
        }

        let horizontal_weight = dx.abs() + self.step_bonus(ctx, horizontal);
        let vertical_weight = dy.abs() + self.step_bonus(ctx, vertical);
        if vertical_weight > horizontal_weight {
            vertical
        } else {
            horizontal
        }
    }

    fn step_bonus(&self, ctx: &SearchContext, mv: Move) -> i32 {
        if ctx.is_winnable(&ctx.origin.step(mv)) {
            self.win_bonus
        } else {
            0
        }
    }
}
