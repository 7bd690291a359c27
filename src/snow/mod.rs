//! Falling snow over the full-viewport canvas.
//!
//! ```text
//! frame()
//!   ├─► surface.clear()
//!   └─► for each particle (in order)
//!        ├─► update()  fall, wobble, recycle past the bottom
//!        └─► render()  white circle at its opacity
//! ```
use crate::config::SnowConfig;
use crate::engine::{Animation, Size, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod particle;

pub use self::particle::{Particle, Spawn};

/// How many particles a surface of a given width gets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Density {
    pub per_pixel: f64,
    pub minimum: usize,
}

impl Density {
    pub fn count(&self, width: f64) -> usize {
        let scaled = (width * self.per_pixel).floor();
        let scaled = if scaled.is_finite() && scaled > 0.0 {
            scaled as usize
        } else {
            0
        };
        scaled.max(self.minimum)
    }
}

impl Default for Density {
    fn default() -> Self {
        Density::from(&SnowConfig::default())
    }
}

impl From<&SnowConfig> for Density {
    fn from(config: &SnowConfig) -> Self {
        Density {
            per_pixel: config.density,
            minimum: config.min_particles,
        }
    }
}

pub struct ParticleField<S: Surface> {
    surface: S,
    bounds: Size,
    density: Density,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl<S: Surface> ParticleField<S> {
    pub fn new(surface: S, density: Density) -> Self {
        Self::with_rng(surface, density, StdRng::from_entropy())
    }

    pub fn with_rng(surface: S, density: Density, rng: StdRng) -> Self {
        let bounds = surface.size();
        let mut field = ParticleField {
            surface,
            bounds,
            density,
            particles: Vec::new(),
            rng,
        };
        field.initialize(bounds.width, bounds.height);
        field
    }

    /// Resizes the surface and throws away every particle.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(Size::new(width, height));
        self.initialize(width, height);
    }

    pub fn initialize(&mut self, width: f64, height: f64) {
        self.bounds = Size::new(width, height);
        let count = self.density.count(width);
        let bounds = self.bounds;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle::spawn(&mut *rng, bounds, Spawn::Initial))
            .collect();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface> Animation for ParticleField<S> {
    fn frame(&mut self) {
        self.surface.clear();
        for particle in self.particles.iter_mut() {
            particle.update(&mut self.rng, self.bounds);
            particle.render(&self.surface);
        }
    }
}
