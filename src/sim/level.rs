//! Session state machine
//!
//! Title → Playing → Cleared → Playing (next level), Playing → GameOver → Title.
//! Timed transitions go through the state's [`TransitionQueue`](super::TransitionQueue).

use super::schedule::Transition;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::ScoreMode;

/// Start a fresh session from the title screen
pub fn start_game(state: &mut GameState) {
    state.transitions.cancel_all();
    state.level = 1;
    state.score = 0;
    state.time_ticks = 0;
    reset_level(state);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::GameStarted);
    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!("Game started");
}

/// Rebuild bricks, ball and paddle for the current level
pub fn reset_level(state: &mut GameState) {
    state.init_bricks();
    state.spawn_serve_ball();
    state.paddle.x = (state.tuning.canvas_width - state.paddle.width) / 2.0;
    if state.tuning.score_mode == ScoreMode::PerLevel {
        state.score = 0;
    }
}

/// Enter Cleared if no brick is left standing while playing.
///
/// Returns true when the transition happened.
pub fn check_cleared(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.bricks.alive_count() != 0 {
        return false;
    }

    state.phase = GamePhase::Cleared;
    state
        .transitions
        .schedule(state.clock, state.tuning.clear_delay_secs, Transition::NextLevel);
    state.events.push(GameEvent::LevelCleared { level: state.level });
    log::info!("Level {} cleared (score {})", state.level, state.score);
    true
}

/// Enter GameOver if the last ball is gone while playing
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || !state.balls.is_empty() {
        return false;
    }

    state.phase = GamePhase::GameOver;
    if let Some(delay) = state.tuning.gameover_reset_secs {
        state
            .transitions
            .schedule(state.clock, delay, Transition::ReturnToTitle);
    }
    state.events.push(GameEvent::GameOver {
        level: state.level,
        score: state.score,
    });
    log::info!("Game over at level {} with score {}", state.level, state.score);
    true
}

/// Leave Cleared and start the next level
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    reset_level(state);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!(
        "Level {} started: {} rows, ball speed {}",
        state.level,
        state.bricks.rows(),
        state.tuning.ball_speed_for_level(state.level)
    );
}

/// Leave GameOver for the title screen
pub fn return_to_title(state: &mut GameState) {
    state.transitions.cancel_all();
    state.phase = GamePhase::Title;
    state.events.push(GameEvent::ReturnedToTitle);
    log::info!("Returned to title");
}

/// Apply a due transition; stale transitions for another phase are dropped
pub fn apply_transition(state: &mut GameState, transition: Transition) {
    match (transition, state.phase) {
        (Transition::NextLevel, GamePhase::Cleared) => advance_level(state),
        (Transition::ReturnToTitle, GamePhase::GameOver) => return_to_title(state),
        (transition, phase) => {
            log::debug!("Dropping stale {:?} in {:?}", transition, phase);
        }
    }
}

/// Handle a pointer click on the play surface
pub fn handle_click(state: &mut GameState) {
    match state.phase {
        GamePhase::Title => start_game(state),
        GamePhase::GameOver => return_to_title(state),
        GamePhase::Playing | GamePhase::Cleared => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_start_game_spawns_level_one() {
        let mut state = GameState::with_seed(5);
        start_game(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.bricks.rows(), 3);
        assert_eq!(state.bricks.columns(), 5);
        assert_eq!(state.bricks.alive_count(), 15);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].vel.x, 2.0);
        assert_eq!(state.balls[0].vel.y, -2.0);
        assert_eq!(state.balls[0].pos.x, 240.0);
        assert_eq!(state.balls[0].pos.y, 290.0);
    }

    #[test]
    fn test_clear_schedules_next_level() {
        let mut state = GameState::with_seed(5);
        start_game(&mut state);
        state.clock = 10.0;
        state.bricks.destroy_all();

        assert!(check_cleared(&mut state));
        assert_eq!(state.phase, GamePhase::Cleared);
        assert_eq!(state.transitions.next_due(), Some(11.5));
        // Only once
        assert!(!check_cleared(&mut state));
        assert_eq!(state.transitions.len(), 1);
    }

    #[test]
    fn test_not_cleared_with_bricks_left() {
        let mut state = GameState::with_seed(5);
        start_game(&mut state);
        assert!(!check_cleared(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_advance_level_scales() {
        let mut state = GameState::with_seed(5);
        start_game(&mut state);
        state.score = 15;
        state.phase = GamePhase::Cleared;
        apply_transition(&mut state, Transition::NextLevel);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.bricks.rows(), 4);
        assert_eq!(state.balls[0].vel.x, 2.5);
        assert_eq!(state.balls[0].vel.y, -2.5);
        assert_eq!(state.score, 15);
    }

    #[test]
    fn test_per_level_score_resets() {
        let tuning = Tuning {
            score_mode: ScoreMode::PerLevel,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 5);
        start_game(&mut state);
        state.score = 15;
        state.phase = GamePhase::Cleared;
        advance_level(&mut state);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_stale_transition_dropped() {
        let mut state = GameState::with_seed(5);
        apply_transition(&mut state, Transition::NextLevel);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_game_over_and_click_to_title() {
        let mut state = GameState::with_seed(5);
        start_game(&mut state);
        state.balls.clear();

        assert!(check_game_over(&mut state));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.transitions.is_empty());

        handle_click(&mut state);
        assert_eq!(state.phase, GamePhase::Title);
        handle_click(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_auto_reset_after_game_over() {
        let tuning = Tuning {
            gameover_reset_secs: Some(2.0),
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 5);
        start_game(&mut state);
        state.clock = 3.0;
        state.balls.clear();
        check_game_over(&mut state);

        assert!(state.transitions.is_pending(Transition::ReturnToTitle));
        assert_eq!(state.transitions.next_due(), Some(5.0));
    }

    #[test]
    fn test_click_ignored_while_playing() {
        let mut state = GameState::with_seed(5);
        start_game(&mut state);
        state.score = 3;
        handle_click(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_start_cancels_pending() {
        let mut state = GameState::with_seed(5);
        state.transitions.schedule(0.0, 1.0, Transition::NextLevel);
        start_game(&mut state);
        assert!(state.transitions.is_empty());
    }
}
