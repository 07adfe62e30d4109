// Territory game types
// Positions, moves, the ownership board and the wire formats exchanged with the host

use serde::{Deserialize, Serialize};

/// 2D cell coordinate on the board, 0-indexed
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Translates the position by an offset vector
    pub fn add(&self, vector: (i32, i32)) -> Position {
        Position {
            x: self.x + vector.0,
            y: self.y + vector.1,
        }
    }

    /// Position reached by taking one move; `Stay` leaves it unchanged
    pub fn step(&self, mv: Move) -> Position {
        self.add(mv.vector())
    }

    /// Offset from this position to `target`
    pub fn vector_to(&self, target: &Position) -> (i32, i32) {
        (target.x - self.x, target.y - self.y)
    }

    /// Manhattan distance to `target`
    pub fn manhattan(&self, target: &Position) -> i32 {
        let (dx, dy) = self.vector_to(target);
        dx.abs() + dy.abs()
    }

    /// Chebyshev distance to `target`
    pub fn chebyshev(&self, target: &Position) -> i32 {
        let (dx, dy) = self.vector_to(target);
        dx.abs().max(dy.abs())
    }

    /// Whether the position lies on an NxN board
    pub fn is_valid(&self, grid_size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < grid_size && self.y < grid_size
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The five moves an agent can return each tick
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Stay,
}

impl Move {
    /// Returns the four cardinal directions (never `Stay`)
    pub fn cardinals() -> [Move; 4] {
        [Move::Up, Move::Right, Move::Down, Move::Left]
    }

    /// Converts move to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
            Move::Stay => "stay",
        }
    }

    /// Parses the lowercase or mixed-case API name of a move
    pub fn parse(s: &str) -> Option<Move> {
        match s.to_lowercase().as_str() {
            "up" => Some(Move::Up),
            "down" => Some(Move::Down),
            "left" => Some(Move::Left),
            "right" => Some(Move::Right),
            "stay" => Some(Move::Stay),
            _ => None,
        }
    }

    /// Unit offset of the move. Up increases y.
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Move::Up => (0, 1),
            Move::Down => (0, -1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Stay => (0, 0),
        }
    }

    /// The move that undoes this one; `Stay` is its own opposite
    pub fn opposite(&self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::Stay => Move::Stay,
        }
    }

    pub fn is_cardinal(&self) -> bool {
        *self != Move::Stay
    }
}

/// Square ownership matrix, indexed `cells[y][x]`. 0 means unclaimed.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Board {
    cells: Vec<Vec<u32>>,
}

impl Board {
    pub fn from_rows(cells: Vec<Vec<u32>>) -> Self {
        Board { cells }
    }

    /// NxN board with every cell carrying the same ownership tag
    pub fn filled(size: usize, tag: u32) -> Self {
        Board {
            cells: vec![vec![tag; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Ownership tag of a cell, or None when the board does not carry it
    pub fn owner(&self, pos: &Position) -> Option<u32> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.cells.get(y)?.get(x).copied()
    }

    pub fn set_owner(&mut self, pos: &Position, tag: u32) {
        self.cells[pos.y as usize][pos.x as usize] = tag;
    }
}

/// Another agent visible this tick
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    pub id: u32,
    pub position: Position,
}

/// Static facts about the running game
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameInfo {
    pub grid_size: i32,
}

/// The requesting agent's own id and location
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct You {
    pub id: u32,
    pub position: Position,
}

/// Request body for /start, /move and /end
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TurnRequest {
    pub game_id: String,
    pub turn: u32,
    pub you: You,
    pub board: Board,
    pub enemies: Vec<Enemy>,
    pub game_info: GameInfo,
}
