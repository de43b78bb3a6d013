//! Per-frame simulation tick
//!
//! One call per display refresh. Velocities are in pixels per tick, so the
//! simulation speed follows the refresh rate; only timed transitions use the
//! supplied clock.

use super::collision::{step_ball, sweep_bricks};
use super::level::{apply_transition, check_cleared, check_game_over, handle_click};
use super::multiball::trigger_multi_ball;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Split every ball (one-shot)
    pub split: bool,
    /// Pointer click on the play surface (one-shot)
    pub click: bool,
    /// Idle/demo mode - AI steers the paddle and clicks through menus
    pub idle_mode: bool,
}

/// Advance the game by one frame. `now` is the frame timestamp in seconds.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    state.clock = now;

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    if input.click {
        handle_click(state);
    }

    for transition in state.transitions.pop_due(now) {
        apply_transition(state, transition);
    }

    // Title, Cleared and GameOver only render
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.split {
        trigger_multi_ball(state);
    }

    state.time_ticks += 1;

    let destroyed = sweep_bricks(&mut state.balls, &mut state.bricks, &mut state.events);
    state.score += u64::from(destroyed);
    check_cleared(state);

    advance_balls(state);
    check_game_over(state);

    let step = state.tuning.paddle_step;
    let width = state.tuning.canvas_width;
    if input.right {
        state.paddle.nudge(step, width);
    }
    if input.left {
        state.paddle.nudge(-step, width);
    }
}

/// Resolve walls/paddle for every ball, dropping the ones that were missed
fn advance_balls(state: &mut GameState) {
    let paddle = state.paddle;
    let tuning = &state.tuning;
    let events = &mut state.events;

    state.balls.retain_mut(|ball| {
        let outcome = step_ball(ball, &paddle, tuning);
        if outcome.missed {
            log::debug!("Ball lost at x={:.1}", ball.pos.x);
            events.push(GameEvent::BallLost { pos: ball.pos });
            return false;
        }
        if outcome.wall {
            events.push(GameEvent::WallBounce { pos: ball.pos });
        }
        if outcome.paddle {
            events.push(GameEvent::PaddleBounce { pos: ball.pos });
        }
        true
    });
}

/// Steer toward the most urgent ball and click through the menus
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Title | GamePhase::GameOver => {
            input.click = true;
            return;
        }
        GamePhase::Cleared => return,
        GamePhase::Playing => {}
    }

    // Lowest descending ball first, otherwise the lowest ball overall
    let target = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| state.balls.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)));

    let Some(ball) = target else { return };

    // Aim slightly off center so the ball doesn't settle into a vertical loop
    let offset = ((state.time_ticks as f32) * 0.02).sin() * state.paddle.width * 0.25;
    let delta = ball.pos.x + offset - state.paddle.center_x();
    let dead_zone = state.tuning.paddle_step;
    input.left = delta < -dead_zone;
    input.right = delta > dead_zone;
}
