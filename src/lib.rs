//! Brick Breaker - a multi-ball Breakout arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (state machine, collisions, multi-ball)
//! - `particles`: Cosmetic brick-burst particles
//! - `audio`: Procedural sound effects
//! - `renderer`: Draw-list scene building and the WebGPU backend
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod particles;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ScoreMode, Tuning};

/// Color as linear RGBA in 0..1
pub type Rgba = [f32; 4];

/// Game configuration defaults (overridable through [`Tuning`])
pub mod consts {
    /// Playfield size in canvas pixels
    pub const CANVAS_WIDTH: f32 = 480.0;
    pub const CANVAS_HEIGHT: f32 = 320.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Pixels the paddle moves per tick while a direction key is held
    pub const PADDLE_STEP: f32 = 5.0;
    /// Horizontal velocity per pixel of hit offset from paddle center
    pub const PADDLE_DEFLECTION: f32 = 0.15;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball speed at level 1 (pixels/tick on each axis)
    pub const BALL_BASE_SPEED: f32 = 2.0;
    /// Extra speed per level
    pub const BALL_SPEED_STEP: f32 = 0.5;
    /// Spawn height above the bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 30.0;

    /// Brick layout
    pub const BRICK_COLUMNS: usize = 5;
    pub const BRICK_BASE_ROWS: usize = 3;
    pub const BRICK_ROWS_PER_LEVEL: usize = 1;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;

    /// Multi-ball trigger is ignored once this many balls are active
    pub const MULTI_BALL_CAP: usize = 10;

    /// Seconds between the last brick breaking and the next level starting
    pub const CLEAR_DELAY_SECS: f64 = 1.5;

    /// Particles spawned per destroyed brick
    pub const PARTICLES_PER_BRICK: usize = 12;
}

/// Convert an HSL color (hue in degrees, saturation/lightness in 0..1) to RGBA
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

/// Format an RGBA color as a CSS `rgba()` string
pub fn css_color(color: Rgba) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}
