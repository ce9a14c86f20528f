//! Canvas particle simulation: floating hearts and confetti bursts.
//!
//! Units are surface pixels and display frames. The field owns its random
//! source so tests can drive it with seeded or stepped generators.

use crate::constants::*;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Heart,
    Confetti,
}

/// One animated particle. `life` runs from 1 down to 0 by `decay` per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    pub kind: ParticleKind,
    pub rotation: f32,
    pub spin: f32,
}

impl Particle {
    /// New particle at `position` with randomized defaults. Emitters that need
    /// a specific launch velocity follow up with [`Particle::with_velocity`].
    pub fn spawn<R: Rng + ?Sized>(position: Vec2, kind: ParticleKind, rng: &mut R) -> Self {
        Self {
            position,
            velocity: Vec2::new(
                uniform(rng, -SPAWN_DRIFT_MAX, SPAWN_DRIFT_MAX),
                -uniform(rng, SPAWN_RISE_MIN, SPAWN_RISE_MAX),
            ),
            life: 1.0,
            decay: uniform(rng, DECAY_MIN, DECAY_MAX),
            size: uniform(rng, SIZE_MIN, SIZE_MAX),
            kind,
            rotation: uniform(rng, 0.0, FULL_TURN),
            spin: uniform(rng, -SPIN_MAX, SPIN_MAX),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// One frame of motion: move, fall, fade, turn.
    #[inline]
    pub fn step(&mut self) {
        self.position += self.velocity;
        self.velocity.y += GRAVITY_PER_FRAME;
        self.life -= self.decay;
        self.rotation += self.spin;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Everything the drawing layer needs for one particle in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub rotation: f32,
    pub size: f32,
    pub opacity: f32,
    pub color: &'static str,
}

/// 2D drawing surface the field renders onto once per frame.
pub trait ParticleSurface {
    fn clear(&mut self, width: f32, height: f32);
    fn draw(&mut self, sprite: &Sprite);
}

pub struct ParticleField<R> {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(width: f32, height: f32, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            width,
            height,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn insert(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Spawn one rising heart below the bottom edge unless the field already
    /// holds [`AMBIENT_SOFT_CAP`] particles. Returns whether one was added.
    pub fn emit_ambient(&mut self) -> bool {
        if self.particles.len() >= AMBIENT_SOFT_CAP {
            return false;
        }
        let x = uniform(&mut self.rng, 0.0, self.width);
        let y = self.height + AMBIENT_SPAWN_BELOW_PX;
        let velocity = Vec2::new(
            uniform(&mut self.rng, -AMBIENT_DRIFT_MAX, AMBIENT_DRIFT_MAX),
            -uniform(&mut self.rng, AMBIENT_RISE_SPEED_MIN, AMBIENT_RISE_SPEED_MAX),
        );
        let heart =
            Particle::spawn(Vec2::new(x, y), ParticleKind::Heart, &mut self.rng).with_velocity(velocity);
        self.particles.push(heart);
        true
    }

    /// Spawn [`BURST_COUNT`] particles evenly around `origin`, flying outward.
    /// Even indices are confetti, odd ones hearts. Ignores the ambient cap.
    pub fn emit_burst(&mut self, origin: Vec2) {
        self.particles.reserve(BURST_COUNT);
        for i in 0..BURST_COUNT {
            let angle = FULL_TURN * i as f32 / BURST_COUNT as f32;
            let speed = uniform(&mut self.rng, BURST_SPEED_MIN, BURST_SPEED_MAX);
            let kind = if i % 2 == 0 {
                ParticleKind::Confetti
            } else {
                ParticleKind::Heart
            };
            let particle = Particle::spawn(origin, kind, &mut self.rng)
                .with_velocity(Vec2::from_angle(angle) * speed);
            self.particles.push(particle);
        }
        log::debug!("[particles] burst at ({:.0},{:.0}) live={}", origin.x, origin.y, self.len());
    }

    pub fn burst_at_center(&mut self) {
        self.emit_burst(self.size() * 0.5);
    }

    /// Advance every particle one frame and drop the expired ones.
    pub fn advance_frame(&mut self) {
        self.particles.retain_mut(|p| {
            p.step();
            p.is_alive()
        });
    }

    /// Clear the surface and draw every live particle. Confetti colour is
    /// picked from the palette each frame.
    pub fn render(&mut self, surface: &mut impl ParticleSurface) {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            let color = match p.kind {
                ParticleKind::Heart => HEART_COLOR,
                ParticleKind::Confetti => CONFETTI_PALETTE
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(HEART_COLOR),
            };
            surface.draw(&Sprite {
                kind: p.kind,
                position: p.position,
                rotation: p.rotation,
                size: p.size,
                opacity: p.life.clamp(0.0, 1.0),
                color,
            });
        }
    }
}

/// Uniform sample in `[min, max)`; collapses to `min` for empty ranges.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn zero_rng_samples_range_minimum() {
        let mut rng = StepRng::new(0, 0);
        let p = Particle::spawn(Vec2::ZERO, ParticleKind::Heart, &mut rng);
        assert_eq!(p.velocity, Vec2::new(-SPAWN_DRIFT_MAX, -SPAWN_RISE_MIN));
        assert_eq!(p.decay, DECAY_MIN);
        assert_eq!(p.size, SIZE_MIN);
        assert_eq!(p.rotation, 0.0);
        assert_eq!(p.life, 1.0);
    }

    #[test]
    fn with_velocity_keeps_other_fields() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = Particle::spawn(Vec2::new(3.0, 4.0), ParticleKind::Confetti, &mut rng);
        let q = p.clone().with_velocity(Vec2::new(1.0, -1.0));
        assert_eq!(q.velocity, Vec2::new(1.0, -1.0));
        assert_eq!(q.position, p.position);
        assert_eq!(q.decay, p.decay);
        assert_eq!(q.kind, ParticleKind::Confetti);
    }

    #[test]
    fn step_applies_velocity_before_gravity() {
        let mut rng = StepRng::new(0, 0);
        let mut p = Particle::spawn(Vec2::ZERO, ParticleKind::Heart, &mut rng)
            .with_velocity(Vec2::new(1.0, -2.0));
        p.step();
        assert_eq!(p.position, Vec2::new(1.0, -2.0));
        assert!((p.velocity.y - (-2.0 + GRAVITY_PER_FRAME)).abs() < 1e-6);
    }

    #[test]
    fn uniform_handles_empty_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(uniform(&mut rng, 0.0, -3.0), 0.0);
    }
}
