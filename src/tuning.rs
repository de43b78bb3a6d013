//! Data-driven game balance
//!
//! Every gameplay constant lives here so a level designer can override it from
//! JSON without recompiling. Missing fields fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the score behaves across level boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Score keeps accumulating until the session ends
    #[default]
    Cumulative,
    /// Score restarts at zero whenever a level starts
    PerLevel,
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,
    pub paddle_deflection: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_speed_step: f32,
    pub ball_spawn_offset: f32,

    // === Bricks ===
    pub brick_columns: usize,
    pub brick_base_rows: usize,
    pub brick_rows_per_level: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,

    // === Rules ===
    pub multi_ball_cap: usize,
    pub clear_delay_secs: f64,
    /// Return to the title screen this long after game over (None = wait for a click)
    pub gameover_reset_secs: Option<f64>,
    pub score_mode: ScoreMode,

    // === Effects ===
    pub particles_per_brick: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            paddle_deflection: PADDLE_DEFLECTION,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_step: BALL_SPEED_STEP,
            ball_spawn_offset: BALL_SPAWN_OFFSET,

            brick_columns: BRICK_COLUMNS,
            brick_base_rows: BRICK_BASE_ROWS,
            brick_rows_per_level: BRICK_ROWS_PER_LEVEL,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,

            multi_ball_cap: MULTI_BALL_CAP,
            clear_delay_secs: CLEAR_DELAY_SECS,
            gameover_reset_secs: None,
            score_mode: ScoreMode::Cumulative,

            particles_per_brick: PARTICLES_PER_BRICK,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse tuning overrides, logging and falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring invalid tuning JSON: {}", e);
                Self::default()
            }
        }
    }

    /// Brick rows for a level: base rows plus one more per level past the first
    pub fn rows_for_level(&self, level: u32) -> usize {
        self.brick_base_rows + level.saturating_sub(1) as usize * self.brick_rows_per_level
    }

    /// Per-axis ball speed at spawn for a level
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        self.ball_base_speed + level.saturating_sub(1) as f32 * self.ball_speed_step
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.canvas_height - self.paddle_height
    }

    /// Largest legal paddle x
    pub fn paddle_max_x(&self) -> f32 {
        (self.canvas_width - self.paddle_width).max(0.0)
    }
}
