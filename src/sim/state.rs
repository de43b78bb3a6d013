//! Game state and core simulation types
//!
//! Everything the frame driver mutates lives in [`GameState`]; there is no
//! ambient global state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::TransitionQueue;
use crate::tuning::Tuning;
use crate::{Rgba, hsl_to_rgba};

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a click
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Level cleared, waiting for the next level to start
    Cleared,
    /// All balls lost
    GameOver,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center in canvas pixels
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Copy of this ball travelling the opposite horizontal direction
    pub fn mirrored(&self) -> Self {
        Self {
            pos: self.pos,
            vel: Vec2::new(-self.vel.x, self.vel.y),
        }
    }
}

/// Whether a brick is still standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickStatus {
    #[default]
    Alive,
    Destroyed,
}

/// A single brick in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub col: usize,
    pub row: usize,
    /// Top-left corner in canvas pixels
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BrickStatus,
    pub color: Rgba,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == BrickStatus::Alive
    }

    /// Strict containment: points on the edge are outside
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }

    /// Center of the brick
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Dense column-major brick grid, sized once per level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Brick>,
}

impl BrickGrid {
    /// Build a fully alive grid with random hues
    pub fn new(columns: usize, rows: usize, tuning: &Tuning, rng: &mut Pcg32) -> Self {
        let size = Vec2::new(tuning.brick_width, tuning.brick_height);
        let mut cells = Vec::with_capacity(columns * rows);
        for col in 0..columns {
            for row in 0..rows {
                cells.push(Brick {
                    col,
                    row,
                    pos: brick_origin(col, row, tuning),
                    size,
                    status: BrickStatus::Alive,
                    color: hsl_to_rgba(rng.random_range(0.0..360.0), 0.7, 0.5),
                });
            }
        }
        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        if col < self.columns && row < self.rows {
            self.cells.get(col * self.rows + row)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Brick> {
        if col < self.columns && row < self.rows {
            self.cells.get_mut(col * self.rows + row)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.cells.iter_mut()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_alive()).count()
    }

    /// Mark every brick destroyed (debug skip / tests)
    pub fn destroy_all(&mut self) {
        for brick in &mut self.cells {
            brick.status = BrickStatus::Destroyed;
        }
    }
}

/// Top-left corner of the brick at a grid position
pub fn brick_origin(col: usize, row: usize, tuning: &Tuning) -> Vec2 {
    Vec2::new(
        col as f32 * (tuning.brick_width + tuning.brick_padding) + tuning.brick_offset_left,
        row as f32 * (tuning.brick_height + tuning.brick_padding) + tuning.brick_offset_top,
    )
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge in canvas pixels
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centered horizontally on the playfield
    pub fn centered(tuning: &Tuning) -> Self {
        Self {
            x: (tuning.canvas_width - tuning.paddle_width) / 2.0,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Move by `dx`, staying inside [0, canvas_width - width]
    pub fn nudge(&mut self, dx: f32, canvas_width: f32) {
        let max_x = (canvas_width - self.width).max(0.0);
        self.x = (self.x + dx).clamp(0.0, max_x);
    }
}

/// Something that happened during a tick, for audio/particle collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    LevelStarted { level: u32 },
    BrickDestroyed { pos: Vec2, color: Rgba },
    WallBounce { pos: Vec2 },
    PaddleBounce { pos: Vec2 },
    BallLost { pos: Vec2 },
    MultiBall { added: usize },
    LevelCleared { level: u32 },
    GameOver { level: u32, score: u64 },
    ReturnedToTitle,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance knobs for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    /// Score
    pub score: u64,
    /// Player paddle
    pub paddle: Paddle,
    /// Active balls
    pub balls: Vec<Ball>,
    /// Brick grid for the current level
    pub bricks: BrickGrid,
    /// Pending timed transitions
    pub transitions: TransitionQueue,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Timestamp of the most recent tick (seconds)
    pub clock: f64,
    /// Ticks simulated in the Playing phase
    pub time_ticks: u64,
    /// Brick color RNG
    rng: Pcg32,
}

impl GameState {
    /// Create a session sitting on the title screen
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let paddle = Paddle::centered(&tuning);
        Self {
            tuning,
            phase: GamePhase::Title,
            level: 1,
            score: 0,
            paddle,
            balls: Vec::new(),
            bricks: BrickGrid::default(),
            transitions: TransitionQueue::default(),
            events: Vec::new(),
            clock: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Session with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), seed)
    }

    /// Rebuild the brick grid for the current level
    pub fn init_bricks(&mut self) {
        let rows = self.tuning.rows_for_level(self.level);
        self.bricks = BrickGrid::new(self.tuning.brick_columns, rows, &self.tuning, &mut self.rng);
    }

    /// Replace the ball set with one level-scaled ball above the paddle
    pub fn spawn_serve_ball(&mut self) {
        let speed = self.tuning.ball_speed_for_level(self.level);
        let pos = Vec2::new(
            self.tuning.canvas_width / 2.0,
            self.tuning.canvas_height - self.tuning.ball_spawn_offset,
        );
        self.balls.clear();
        self.balls.push(Ball::new(pos, Vec2::new(speed, -speed)));
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
