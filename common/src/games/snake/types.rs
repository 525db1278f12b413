use serde::{Deserialize, Serialize};

/// Default pixel pitch of the logical grid.
pub const DEFAULT_BLOCK: u32 = 20;

/// A grid cell in pixel units. Coordinates may leave the board (negative or past the edge)
/// when the head steps through a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction, block: u32) -> Cell {
        let (dx, dy) = direction.unit();
        let block = block as i32;
        Cell::new(self.x + dx * block, self.y + dy * block)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    fn unit(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Ticks suspended; still a live game.
    Paused,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPlacement {
    /// Resample until the cell is free of the snake.
    #[default]
    Rejection,
    /// One unconditional sample; food may land on the snake.
    SingleSample,
}

/// Snapshot handed to the presenter after every successful tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub board_width: u32,
    pub board_height: u32,
    pub block: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Ok,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        assert!(Direction::Up.is_opposite(&Direction::Down));
        assert!(Direction::Left.is_opposite(&Direction::Right));
        assert!(!Direction::Up.is_opposite(&Direction::Left));
        assert!(!Direction::Right.is_opposite(&Direction::Right));
    }

    #[test]
    fn test_step_moves_one_block_on_one_axis() {
        let cell = Cell::new(40, 60);
        assert_eq!(cell.step(Direction::Up, 20), Cell::new(40, 40));
        assert_eq!(cell.step(Direction::Down, 20), Cell::new(40, 80));
        assert_eq!(cell.step(Direction::Left, 20), Cell::new(20, 60));
        assert_eq!(cell.step(Direction::Right, 20), Cell::new(60, 60));
    }

    #[test]
    fn test_step_can_leave_the_board() {
        assert_eq!(Cell::new(0, 0).step(Direction::Left, 20), Cell::new(-20, 0));
    }
}
