//! Snake simulation shared by the idle backdrop and the playable mode.
//! Grid coordinates only; drawing and input wiring live in the components.

use std::rc::Rc;

/// Grid cell edge in px. Cells are painted one px smaller to leave a gap.
pub const CELL_PX: f64 = 20.0;
/// Simulation cadence. Each tick schedules the next one this far out.
pub const TICK_MS: i32 = 100;

pub const START_CELL: Cell = Cell { x: 5, y: 5 };
pub const START_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Screen-space delta: y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Background ambience: the snake chases food on its own and may
    /// overlap itself freely.
    Autonomous,
    /// The visitor drives; self collision resets the snake.
    Player,
}

/// The whole game state. `rng` arguments take a uniform sampler over
/// `[0, 1)`, same contract as [`HelixField`](crate::model::HelixField).
pub struct SnakeGame {
    pub cols: i32,
    pub rows: i32,
    /// Head first.
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub dir: Direction,
    pub mode: Mode,
    mode_sink: Option<Rc<dyn Fn(Mode)>>,
}

impl SnakeGame {
    /// Degenerate viewports are clamped to a 1x1 grid so stepping stays safe.
    pub fn new(cols: i32, rows: i32, rng: &mut impl FnMut() -> f64) -> Self {
        let mut game = Self {
            cols: cols.max(1),
            rows: rows.max(1),
            snake: vec![START_CELL],
            food: Cell { x: 0, y: 0 },
            dir: START_DIRECTION,
            mode: Mode::Autonomous,
            mode_sink: None,
        };
        game.food = game.random_cell(rng);
        game
    }

    /// Observer for mode transitions, so the page chrome can follow along.
    pub fn set_mode_sink(&mut self, sink: Rc<dyn Fn(Mode)>) {
        self.mode_sink = Some(sink);
    }

    pub fn resize(&mut self, cols: i32, rows: i32) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    fn random_cell(&self, rng: &mut impl FnMut() -> f64) -> Cell {
        Cell {
            x: (rng() * self.cols as f64).floor() as i32,
            y: (rng() * self.rows as f64).floor() as i32,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.snake.iter().any(|c| *c == cell)
    }

    /// Accept a steering input unless it would reverse the snake onto
    /// itself. Judged against the latest accepted direction, so of two
    /// inputs in one tick the second is measured against the first.
    pub fn steer(&mut self, dir: Direction) {
        if dir != self.dir.opposite() {
            self.dir = dir;
        }
    }

    /// Greedy chase: close the x gap, then the y gap, skipping any move that
    /// would reverse. No obstacle avoidance; overlaps are tolerated in
    /// [`Mode::Autonomous`].
    pub fn ai_direction(&self) -> Direction {
        let head = self.snake[0];
        if head.x < self.food.x && self.dir != Direction::Left {
            Direction::Right
        } else if head.x > self.food.x && self.dir != Direction::Right {
            Direction::Left
        } else if head.y < self.food.y && self.dir != Direction::Up {
            Direction::Down
        } else if head.y > self.food.y && self.dir != Direction::Down {
            Direction::Up
        } else {
            self.dir
        }
    }

    /// One simulation tick: pick a direction (autonomous mode only), move the
    /// head with toroidal wrapping, grow on food, and in player mode reset on
    /// self collision.
    pub fn step(&mut self, rng: &mut impl FnMut() -> f64) {
        if self.mode == Mode::Autonomous {
            self.dir = self.ai_direction();
        }
        let (dx, dy) = self.dir.delta();
        let head = self.snake[0];
        let next = Cell {
            x: (head.x + dx).rem_euclid(self.cols),
            y: (head.y + dy).rem_euclid(self.rows),
        };

        if next == self.food {
            // The new spot is not checked against the body and may land on
            // it; the snake simply eats again when it gets there.
            self.food = self.random_cell(rng);
        } else {
            self.snake.pop();
        }

        if self.mode == Mode::Player && self.contains(next) {
            self.snake = vec![START_CELL];
            self.dir = START_DIRECTION;
            return;
        }
        self.snake.insert(0, next);
    }

    /// Enter player mode when `cell` lies on the snake. Returns whether the
    /// hand-off happened.
    pub fn try_enter_player(&mut self, cell: Cell) -> bool {
        if self.mode == Mode::Autonomous && self.contains(cell) {
            self.set_mode(Mode::Player);
            true
        } else {
            false
        }
    }

    /// Hand control back to the chase AI. The snake keeps its length and
    /// position.
    pub fn exit_player(&mut self) {
        if self.mode == Mode::Player {
            self.set_mode(Mode::Autonomous);
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if let Some(sink) = &self.mode_sink {
            sink(mode);
        }
    }
}
