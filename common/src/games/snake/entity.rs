use std::collections::VecDeque;

use super::types::{Cell, Direction};

pub const INITIAL_LENGTH: usize = 3;

/// Ordered body, head at the front. Never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    block: u32,
}

impl Snake {
    /// Builds a straight snake with its head at `head`, trailing away from `direction`.
    pub fn new(head: Cell, direction: Direction, length: usize, block: u32) -> Self {
        let length = length.max(1);
        let mut body = VecDeque::with_capacity(length);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.step(direction.opposite(), block);
        }
        Self { body, block }
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Cell], block: u32) -> Self {
        assert!(!cells.is_empty());
        Self {
            body: cells.iter().copied().collect(),
            block,
        }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Cell {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Prepends the next head. Without growth the tail is dropped in the same step,
    /// so moving into the cell the tail is leaving is legal.
    pub fn advance(&mut self, direction: Direction, grow: bool) -> Cell {
        let new_head = self.head().step(direction, self.block);
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
        new_head
    }

    /// Membership over every segment after the head.
    pub fn contains_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == cell)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn self_collides(&self) -> bool {
        self.contains_body(self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: u32 = 20;

    fn cell(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn test_new_lays_body_behind_head() {
        let snake = Snake::new(cell(320, 240), Direction::Right, INITIAL_LENGTH, BLOCK);
        let cells: Vec<Cell> = snake.cells().copied().collect();
        assert_eq!(cells, vec![cell(320, 240), cell(300, 240), cell(280, 240)]);
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let mut snake = Snake::new(cell(320, 240), Direction::Right, 3, BLOCK);
        let head = snake.advance(Direction::Up, false);
        assert_eq!(head, cell(320, 220));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), cell(300, 240));
    }

    #[test]
    fn test_advance_with_growth_keeps_tail() {
        let mut snake = Snake::new(cell(320, 240), Direction::Right, 3, BLOCK);
        snake.advance(Direction::Right, true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), cell(280, 240));
    }

    #[test]
    fn test_contains_body_ignores_head() {
        let snake = Snake::new(cell(320, 240), Direction::Right, 3, BLOCK);
        assert!(!snake.contains_body(cell(320, 240)));
        assert!(snake.contains_body(cell(300, 240)));
        assert!(snake.occupies(cell(320, 240)));
    }

    #[test]
    fn test_chasing_own_tail_is_not_a_collision() {
        // 2x2 loop: head moves into the cell the tail vacates this step.
        let mut snake = Snake::from_cells(&[cell(20, 20), cell(40, 20), cell(40, 40), cell(20, 40)], BLOCK);
        snake.advance(Direction::Down, false);
        assert_eq!(snake.head(), cell(20, 40));
        assert!(!snake.self_collides());
    }

    #[test]
    fn test_chasing_own_tail_while_growing_collides() {
        let mut snake = Snake::from_cells(&[cell(20, 20), cell(40, 20), cell(40, 40), cell(20, 40)], BLOCK);
        snake.advance(Direction::Down, true);
        assert!(snake.self_collides());
    }
}
