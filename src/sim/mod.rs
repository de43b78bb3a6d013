//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Time is passed in by the caller, never read from a clock
//! - Seeded RNG only
//! - Balls and bricks are processed in storage order

pub mod collision;
pub mod level;
pub mod multiball;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{StepOutcome, step_ball, sweep_bricks};
pub use level::{advance_level, apply_transition, handle_click, reset_level, return_to_title, start_game};
pub use multiball::{split_balls, trigger_multi_ball};
pub use schedule::{Transition, TransitionQueue};
pub use state::{Ball, Brick, BrickGrid, BrickStatus, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
