//! Frame composition for every game phase

use glam::Vec2;

use super::vertex::colors;
use super::{Painter, TextAlign, TextStyle};
use crate::particles::ParticleSystem;
use crate::sim::{GamePhase, GameState};

const HUD_FONT: f32 = 16.0;
const HEADLINE_FONT: f32 = 30.0;
const PROMPT_FONT: f32 = 20.0;

/// Draw the current frame
pub fn draw_scene(state: &GameState, particles: &ParticleSystem, painter: &mut impl Painter) {
    painter.clear(colors::BACKGROUND);

    match state.phase {
        GamePhase::Title => draw_title(state, painter),
        GamePhase::Playing => {
            draw_playfield(state, painter);
            draw_particles(particles, painter);
            draw_hud(state, painter);
        }
        GamePhase::Cleared => {
            draw_particles(particles, painter);
            headline(state, "Level cleared! Next level...", colors::TITLE, 0.0, painter);
        }
        GamePhase::GameOver => draw_game_over(state, painter),
    }
}

fn center(state: &GameState) -> Vec2 {
    Vec2::new(state.tuning.canvas_width / 2.0, state.tuning.canvas_height / 2.0)
}

/// Centered text offset vertically from the middle of the playfield
fn headline(state: &GameState, text: &str, color: crate::Rgba, dy: f32, painter: &mut impl Painter) {
    painter.text(
        text,
        center(state) + Vec2::new(0.0, dy),
        TextStyle {
            size: HEADLINE_FONT,
            align: TextAlign::Center,
            color,
        },
    );
}

fn prompt(state: &GameState, text: &str, color: crate::Rgba, dy: f32, painter: &mut impl Painter) {
    painter.text(
        text,
        center(state) + Vec2::new(0.0, dy),
        TextStyle {
            size: PROMPT_FONT,
            align: TextAlign::Center,
            color,
        },
    );
}

fn draw_title(state: &GameState, painter: &mut impl Painter) {
    headline(state, "Brick Breaker", colors::TITLE, -20.0, painter);
    prompt(state, "Click to start", colors::TITLE, 20.0, painter);
}

fn draw_game_over(state: &GameState, painter: &mut impl Painter) {
    headline(state, "Game Over!", colors::GAME_OVER, 0.0, painter);
    let summary = format!("Level {}  Score {}", state.level, state.score);
    prompt(state, &summary, colors::TEXT, 35.0, painter);
    prompt(state, "Click to return to title", colors::GAME_OVER, 65.0, painter);
}

fn draw_playfield(state: &GameState, painter: &mut impl Painter) {
    for brick in state.bricks.iter().filter(|b| b.is_alive()) {
        painter.fill_rect(brick.pos, brick.size, brick.color);
    }

    for ball in &state.balls {
        painter.fill_circle(ball.pos, state.tuning.ball_radius, colors::BALL);
    }

    let paddle = &state.paddle;
    painter.fill_rect(
        Vec2::new(paddle.x, state.tuning.canvas_height - paddle.height),
        Vec2::new(paddle.width, paddle.height),
        colors::PADDLE,
    );
}

fn draw_particles(particles: &ParticleSystem, painter: &mut impl Painter) {
    for p in particles.iter() {
        painter.fill_circle(p.pos, p.radius, p.faded_color());
    }
}

fn draw_hud(state: &GameState, painter: &mut impl Painter) {
    let style = TextStyle {
        size: HUD_FONT,
        align: TextAlign::Left,
        color: colors::TEXT,
    };
    painter.text(&format!("Score: {}", state.score), Vec2::new(10.0, 20.0), style);
    painter.text(
        &format!("Level: {}", state.level),
        Vec2::new(state.tuning.canvas_width - 80.0, 20.0),
        style,
    );
}
