use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::Cell;
use crate::snake::{Snake, Direction::{self, *}};

pub const FOOD_REWARD: u32 = 10;

const START_HEAD: Cell = (5, 5);
const INITIAL_SNAKE_LENGTH: usize = 3;
const START_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Self {
        Grid { columns, rows }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.1 >= 0 && cell.0 < self.columns && cell.1 < self.rows
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| (x, y)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Collision,
    BoardFull,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Ended(Outcome),
}

/// What a single tick did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// The game was not running, nothing changed.
    Stalled,
    Moved,
    Ate { score: u32 },
    Collided { score: u32 },
    BoardFull { score: u32 },
}

impl TickEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickEvent::Collided { .. } | TickEvent::BoardFull { .. })
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    run_state: RunState,
}

impl GameState {
    pub fn new(grid: Grid) -> Self {
        GameState {
            grid,
            snake: Snake::new(START_HEAD, INITIAL_SNAKE_LENGTH, START_DIRECTION),
            food: None,
            score: 0,
            run_state: RunState::Idle,
        }
    }

    /// Discards whatever run was in progress and begins a fresh one.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.snake = Snake::new(START_HEAD, INITIAL_SNAKE_LENGTH, START_DIRECTION);
        self.score = 0;
        self.food = place_food(&self.grid, &self.snake, rng);
        self.run_state = match self.food {
            Some(_) => RunState::Running,
            None => RunState::Ended(Outcome::BoardFull),
        };
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickEvent {
        if self.run_state != RunState::Running {
            return TickEvent::Stalled;
        }

        let new_head = self.snake.next_head();

        // The tail still counts: it only moves away after the head is placed
        if !self.grid.contains(new_head) || self.snake.occupies(new_head) {
            debug!("Collision at {:?} with score {}", new_head, self.score);
            self.run_state = RunState::Ended(Outcome::Collision);
            return TickEvent::Collided { score: self.score };
        }

        let ate = self.food == Some(new_head);
        self.snake.advance(new_head, ate);

        if !ate {
            return TickEvent::Moved;
        }

        self.score += FOOD_REWARD;
        self.food = place_food(&self.grid, &self.snake, rng);

        match self.food {
            Some(food) => {
                debug!("Food eaten, score {}, next food at {:?}", self.score, food);
                TickEvent::Ate { score: self.score }
            },
            None => {
                self.run_state = RunState::Ended(Outcome::BoardFull);
                TickEvent::BoardFull { score: self.score }
            },
        }
    }

    /// Changes direction for the next tick. Ignored unless a run is active.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }

        self.snake.set_direction(direction)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }
}

/// Picks a free cell uniformly at random, or `None` if the snake fills the grid.
pub fn place_food<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    let choices: Vec<Cell> = grid.cells().filter(|pos| !snake.occupies(*pos)).collect();
    choices.choose(rng).copied()
}

#[cfg(test)]
impl GameState {
    fn with_snake(grid: Grid, snake: Snake, food: Option<Cell>) -> Self {
        GameState { grid, snake, food, score: 0, run_state: RunState::Running }
    }
}
