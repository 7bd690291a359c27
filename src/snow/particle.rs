use crate::engine::{Point, Rgba, Size, Surface};
use rand::Rng;
use std::f64::consts::TAU;

// physics consts
pub const MIN_RADIUS: f64 = 1.0;
pub const MAX_RADIUS: f64 = 3.0;
pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 1.5;
pub const MIN_OPACITY: f64 = 0.4;
pub const MAX_OPACITY: f64 = 0.8;
pub const MAX_DRIFT: f64 = 0.25;
pub const PHASE_STEP: f64 = 0.01; // radians per frame
pub const WOBBLE: f64 = 0.3;
pub const EDGE_MARGIN: f64 = 10.0; // off-screen distance before recycling

/// Where a freshly created particle starts vertically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Spawn {
    /// anywhere on the surface, used when the field is (re)built
    Initial,
    /// just above the top edge, used when a flake falls out the bottom
    Recycle,
}

/// One falling flake.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub radius: f64,
    pub speed: f64,
    pub drift: f64,
    pub phase: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Size, spawn: Spawn) -> Self {
        let mut particle = Particle {
            position: Point::default(),
            radius: MIN_RADIUS,
            speed: MIN_SPEED,
            drift: 0.0,
            phase: 0.0,
            opacity: MIN_OPACITY,
        };
        particle.randomize(rng, bounds, spawn);
        particle
    }

    /// Re-rolls every attribute, the column included.
    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Size, spawn: Spawn) {
        self.position.x = uniform(rng, 0.0, bounds.width);
        self.position.y = match spawn {
            Spawn::Initial => uniform(rng, 0.0, bounds.height),
            Spawn::Recycle => -EDGE_MARGIN,
        };
        self.radius = uniform(rng, MIN_RADIUS, MAX_RADIUS);
        self.speed = uniform(rng, MIN_SPEED, MAX_SPEED);
        self.drift = uniform(rng, -MAX_DRIFT, MAX_DRIFT);
        self.phase = uniform(rng, 0.0, TAU);
        self.opacity = uniform(rng, MIN_OPACITY, MAX_OPACITY);
    }

    /// ::update per frame
    /// - fall by speed
    /// - wobble sideways around the drift bias
    /// - recycle above the top edge once past the bottom margin
    ///
    /// Returns true when the particle was recycled.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Size) -> bool {
        self.position.y += self.speed;
        self.phase += PHASE_STEP;
        self.position.x += self.phase.sin() * WOBBLE + self.drift;

        if self.position.y > bounds.height + EDGE_MARGIN {
            self.randomize(rng, bounds, Spawn::Recycle);
            true
        } else {
            false
        }
    }

    pub fn render(&self, surface: &dyn Surface) {
        surface.fill_circle(self.position, self.radius, Rgba::white(self.opacity));
    }
}

// gen_range panics on an empty range, which a zero-sized surface produces
fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
