use crate::{log, games::RandomSource};
use super::board::Board;
use super::entity::{Snake, INITIAL_LENGTH};
use super::input::InputArbiter;
use super::types::{Cell, DeathReason, Direction, EngineState, FoodPlacement, Frame};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced { frame: Frame, ate: bool },
    /// Emitted once per game, on the tick that ends it.
    Terminated { final_score: u32, reason: DeathReason },
    /// The engine is paused or already terminated.
    Idle,
}

/// Single-player state machine. Owns every piece of mutable game state and is
/// only ever touched from one task, so nothing in here is locked.
pub struct Engine<R: RandomSource> {
    board: Board,
    rng: R,
    placement: FoodPlacement,
    snake: Snake,
    food: Cell,
    score: u32,
    input: InputArbiter,
    state: EngineState,
    death_reason: Option<DeathReason>,
}

impl<R: RandomSource> Engine<R> {
    /// Builds the centered starting snake, places food and enters `Running`.
    pub fn start(board: Board, mut rng: R, placement: FoodPlacement) -> Self {
        let snake = initial_snake(&board);
        let food = place_food(&board, &mut rng, placement, &snake);
        log!(
            "Game started on {}x{} board, food at ({}, {})",
            board.columns(),
            board.rows(),
            food.x,
            food.y
        );
        Self {
            board,
            rng,
            placement,
            snake,
            food,
            score: 0,
            input: InputArbiter::new(INITIAL_DIRECTION),
            state: EngineState::Running,
            death_reason: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    pub fn direction(&self) -> Direction {
        self.input.current()
    }

    pub fn frame(&self) -> Frame {
        Frame {
            snake: self.snake.cells().copied().collect(),
            food: self.food,
            score: self.score,
            board_width: self.board.width(),
            board_height: self.board.height(),
            block: self.board.block(),
        }
    }

    /// Queues a turn for the next tick. Ignored unless the game is running.
    pub fn request(&mut self, intent: Direction) -> bool {
        if self.state != EngineState::Running {
            return false;
        }
        self.input.request(intent)
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != EngineState::Running {
            return TickOutcome::Idle;
        }

        let direction = self.input.commit();
        let next_head = self.snake.head().step(direction, self.board.block());
        let ate = next_head == self.food;
        let head = self.snake.advance(direction, ate);

        if ate {
            self.score += 1;
            self.food = place_food(&self.board, &mut self.rng, self.placement, &self.snake);
            log!(
                "Ate food at ({}, {}). Score: {}. Next food at ({}, {})",
                head.x,
                head.y,
                self.score,
                self.food.x,
                self.food.y
            );
        }

        let failure = if !self.board.in_bounds(head) {
            Some(DeathReason::WallCollision)
        } else if self.snake.self_collides() {
            Some(DeathReason::SelfCollision)
        } else {
            None
        };

        if let Some(reason) = failure {
            self.state = EngineState::Terminated;
            self.death_reason = Some(reason);
            log!("Game over at ({}, {}): {:?}, final score {}", head.x, head.y, reason, self.score);
            return TickOutcome::Terminated {
                final_score: self.score,
                reason,
            };
        }

        TickOutcome::Advanced {
            frame: self.frame(),
            ate,
        }
    }

    /// Returns `true` when the call changed state.
    pub fn pause(&mut self) -> bool {
        if self.state == EngineState::Running {
            self.state = EngineState::Paused;
            return true;
        }
        false
    }

    /// Returns `true` when the call changed state. No-op from `Running` and `Terminated`.
    pub fn resume(&mut self) -> bool {
        if self.state == EngineState::Paused {
            self.state = EngineState::Running;
            return true;
        }
        false
    }

    /// Unconditionally starts a fresh game on the same board.
    pub fn restart(&mut self) {
        self.snake = initial_snake(&self.board);
        self.food = place_food(&self.board, &mut self.rng, self.placement, &self.snake);
        self.score = 0;
        self.input.reset(INITIAL_DIRECTION);
        self.state = EngineState::Running;
        self.death_reason = None;
        log!("Game restarted, food at ({}, {})", self.food.x, self.food.y);
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Cell) {
        self.food = food;
    }
}

fn initial_snake(board: &Board) -> Snake {
    Snake::new(board.center(), INITIAL_DIRECTION, INITIAL_LENGTH, board.block())
}

fn place_food(board: &Board, rng: &mut impl RandomSource, placement: FoodPlacement, snake: &Snake) -> Cell {
    match placement {
        FoodPlacement::SingleSample => board.random_cell(rng),
        FoodPlacement::Rejection => {
            let attempts = board.cell_count() * 4;
            for _ in 0..attempts {
                let candidate = board.random_cell(rng);
                if !snake.occupies(candidate) {
                    return candidate;
                }
            }

            // Nearly full board: pick uniformly among what is left.
            let free: Vec<Cell> = board.cells().filter(|cell| !snake.occupies(*cell)).collect();
            if free.is_empty() {
                return board.random_cell(rng);
            }
            free[rng.next_int(free.len() as u32) as usize]
        }
    }
}
