//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files needed. Event to
//! sound mapping is platform independent; synthesis only exists on wasm32.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    /// Ball breaks a brick or bounces off the paddle
    Hit,
    /// Ball bounces off a wall or the ceiling
    Wall,
    /// Multi-ball split
    Split,
    /// Level cleared
    Clear,
    /// Last ball lost
    GameOver,
}

/// Sound to play for a simulation event, if any
pub fn sound_for_event(event: &GameEvent) -> Option<SoundKind> {
    match event {
        GameEvent::BrickDestroyed { .. } | GameEvent::PaddleBounce { .. } => Some(SoundKind::Hit),
        GameEvent::WallBounce { .. } => Some(SoundKind::Wall),
        GameEvent::MultiBall { .. } => Some(SoundKind::Split),
        GameEvent::LevelCleared { .. } => Some(SoundKind::Clear),
        GameEvent::GameOver { .. } => Some(SoundKind::GameOver),
        GameEvent::GameStarted
        | GameEvent::LevelStarted { .. }
        | GameEvent::BallLost { .. }
        | GameEvent::ReturnedToTitle => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundKind, sound_for_event};
    use crate::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Pick up volume/mute changes
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play whatever sound belongs to `event`
        pub fn handle_event(&self, event: &GameEvent) {
            if let Some(kind) = sound_for_event(event) {
                self.play(kind);
            }
        }

        /// Play a sound effect
        pub fn play(&self, kind: SoundKind) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match kind {
                SoundKind::Hit => self.play_hit(ctx, vol),
                SoundKind::Wall => self.play_wall(ctx, vol),
                SoundKind::Split => self.play_split(ctx, vol),
                SoundKind::Clear => self.play_clear(ctx, vol),
                SoundKind::GameOver => self.play_game_over(ctx, vol),
            }
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short percussive blip with exponential decay
        fn blip(&self, ctx: &AudioContext, freq: f32, osc_type: OscillatorType, level: f32, decay: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + decay)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + decay + 0.02).ok();
        }

        /// Brick/paddle hit - square wave tick
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, 520.0, OscillatorType::Square, vol * 0.2, 0.06);
        }

        /// Wall - soft sine ping
        fn play_wall(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, 300.0, OscillatorType::Sine, vol * 0.25, 0.08);
        }

        /// Split - upward sweep
        fn play_split(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(900.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Level clear - rising arpeggio
        fn play_clear(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Game over - descending tones
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_collision_sounds() {
        let brick = GameEvent::BrickDestroyed {
            pos: Vec2::ZERO,
            color: [1.0; 4],
        };
        assert_eq!(sound_for_event(&brick), Some(SoundKind::Hit));
        assert_eq!(
            sound_for_event(&GameEvent::PaddleBounce { pos: Vec2::ZERO }),
            Some(SoundKind::Hit)
        );
        assert_eq!(
            sound_for_event(&GameEvent::WallBounce { pos: Vec2::ZERO }),
            Some(SoundKind::Wall)
        );
        assert_eq!(
            sound_for_event(&GameEvent::MultiBall { added: 2 }),
            Some(SoundKind::Split)
        );
    }

    #[test]
    fn test_phase_sounds() {
        assert_eq!(
            sound_for_event(&GameEvent::LevelCleared { level: 1 }),
            Some(SoundKind::Clear)
        );
        assert_eq!(
            sound_for_event(&GameEvent::GameOver { level: 3, score: 20 }),
            Some(SoundKind::GameOver)
        );
        assert_eq!(sound_for_event(&GameEvent::GameStarted), None);
        assert_eq!(sound_for_event(&GameEvent::BallLost { pos: Vec2::ZERO }), None);
    }
}
