//! Cosmetic particles for brick bursts
//!
//! Driven by [`GameEvent`]s drained from the simulation; nothing here feeds
//! back into gameplay.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Rgba;
use crate::sim::GameEvent;

/// A single particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub color: Rgba,
    pub radius: f32,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Fraction of life remaining (1 at spawn, 0 when expired)
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }

    /// Color with alpha scaled by remaining life
    pub fn faded_color(&self) -> Rgba {
        let [r, g, b, a] = self.color;
        [r, g, b, a * self.fade()]
    }
}

/// Owns every live particle
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
    per_burst: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub const DRAG: f32 = 2.5;
    pub const GRAVITY: f32 = 220.0;
    pub const MIN_SPEED: f32 = 40.0;
    pub const MAX_SPEED: f32 = 160.0;
    pub const MIN_LIFE: f32 = 0.35;
    pub const MAX_LIFE: f32 = 0.8;

    pub fn new(max_particles: usize, per_burst: usize, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(1024)),
            max_particles,
            per_burst,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Change the live-particle cap, dropping the oldest particles if needed
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        if self.particles.len() > max {
            let excess = self.particles.len() - max;
            self.particles.drain(..excess);
        }
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Spawn up to `count` particles radiating from `pos`
    pub fn burst(&mut self, pos: Vec2, color: Rgba, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.rng.random_range(Self::MIN_SPEED..Self::MAX_SPEED);
            let life = self.rng.random_range(Self::MIN_LIFE..Self::MAX_LIFE);
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                radius: self.rng.random_range(1.5..3.5),
                life,
                max_life: life,
            });
        }
    }

    /// React to a simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::BrickDestroyed { pos, color } => self.burst(pos, color, self.per_burst),
            GameEvent::BallLost { pos } => self.burst(pos, [1.0, 1.0, 1.0, 0.8], self.per_burst / 2),
            GameEvent::GameStarted | GameEvent::LevelStarted { .. } => self.clear(),
            _ => {}
        }
    }

    /// Advance all particles by `dt` seconds and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        let damping = (1.0 - Self::DRAG * dt).max(0.0);
        for p in &mut self.particles {
            p.vel *= damping;
            p.vel.y += Self::GRAVITY * dt;
            p.pos += p.vel * dt;
            p.life -= dt;
            // Shrink toward the end of life
            p.radius *= 1.0 - 0.5 * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
