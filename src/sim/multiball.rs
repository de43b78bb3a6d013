//! Multi-ball split

use super::state::{Ball, GameEvent, GamePhase, GameState};

/// Append a horizontally mirrored clone of every ball.
///
/// The cap is checked against the count before the split, so a split below
/// the cap always doubles the set. Clones are taken from a snapshot and never
/// split again within the same call. Returns the number of balls added.
pub fn split_balls(balls: &mut Vec<Ball>, cap: usize) -> usize {
    if balls.len() >= cap {
        return 0;
    }
    let clones: Vec<Ball> = balls.iter().map(Ball::mirrored).collect();
    let added = clones.len();
    balls.extend(clones);
    added
}

/// Split the active balls if the session is playing
pub fn trigger_multi_ball(state: &mut GameState) -> usize {
    if state.phase != GamePhase::Playing {
        return 0;
    }
    let added = split_balls(&mut state.balls, state.tuning.multi_ball_cap);
    if added > 0 {
        state.events.push(GameEvent::MultiBall { added });
        log::debug!("Multi-ball: {} active", state.balls.len());
    }
    added
}
