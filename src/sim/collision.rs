//! Collision detection and response
//!
//! Bricks are hit when their box strictly contains a ball center; walls and
//! the paddle are tested against the ball's next position.

use glam::Vec2;

use super::state::{Ball, BrickGrid, BrickStatus, GameEvent, Paddle};
use crate::tuning::Tuning;

/// Sweep every ball against every alive brick.
///
/// Each containing brick is destroyed and flips the ball's vertical velocity,
/// so a ball inside two bricks in one tick scores twice and ends up with its
/// original direction. Returns the number of bricks destroyed.
pub fn sweep_bricks(balls: &mut [Ball], bricks: &mut BrickGrid, events: &mut Vec<GameEvent>) -> u32 {
    if bricks.is_empty() || balls.is_empty() {
        return 0;
    }

    let mut destroyed = 0;
    for ball in balls.iter_mut() {
        for brick in bricks.iter_mut() {
            if brick.is_alive() && brick.contains(ball.pos) {
                brick.status = BrickStatus::Destroyed;
                ball.vel.y = -ball.vel.y;
                destroyed += 1;
                events.push(GameEvent::BrickDestroyed {
                    pos: ball.pos,
                    color: brick.color,
                });
            }
        }
    }
    destroyed
}

/// Whether the next x position leaves `[radius, width - radius]`
#[inline]
pub fn crosses_side_wall(next_x: f32, radius: f32, width: f32) -> bool {
    next_x > width - radius || next_x < radius
}

/// Whether the next y position goes above the top wall
#[inline]
pub fn crosses_ceiling(next_y: f32, radius: f32) -> bool {
    next_y < radius
}

/// Whether the next y position passes the plane the paddle sits on
#[inline]
pub fn crosses_paddle_plane(next_y: f32, radius: f32, paddle_top: f32) -> bool {
    next_y > paddle_top - radius
}

/// Whether the ball's horizontal extent overlaps the paddle's
#[inline]
pub fn overlaps_paddle(ball_x: f32, radius: f32, paddle: &Paddle) -> bool {
    ball_x + radius > paddle.x && ball_x - radius < paddle.x + paddle.width
}

/// Velocity after a paddle hit.
///
/// Horizontal speed grows linearly with distance from the paddle center;
/// vertical speed keeps its magnitude and always points up.
#[inline]
pub fn paddle_deflection(ball_x: f32, vel: Vec2, paddle: &Paddle, factor: f32) -> Vec2 {
    let hit_point = ball_x - paddle.center_x();
    Vec2::new(hit_point * factor, -vel.y.abs())
}

/// What happened to a ball during one wall/paddle step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub wall: bool,
    pub paddle: bool,
    pub missed: bool,
}

/// Resolve walls and the paddle for one ball, then advance it.
///
/// A missed ball is left where it was; the caller removes it.
pub fn step_ball(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) -> StepOutcome {
    let r = tuning.ball_radius;
    let next = ball.pos + ball.vel;
    let mut outcome = StepOutcome::default();

    if crosses_side_wall(next.x, r, tuning.canvas_width) {
        ball.vel.x = -ball.vel.x;
        outcome.wall = true;
    }

    if crosses_ceiling(next.y, r) {
        ball.vel.y = -ball.vel.y;
        outcome.wall = true;
    } else if crosses_paddle_plane(next.y, r, tuning.paddle_top()) {
        if overlaps_paddle(ball.pos.x, r, paddle) {
            ball.vel = paddle_deflection(ball.pos.x, ball.vel, paddle, tuning.paddle_deflection);
            outcome.paddle = true;
        } else {
            outcome.missed = true;
            return outcome;
        }
    }

    ball.pos += ball.vel;
    outcome
}
