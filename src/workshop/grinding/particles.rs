//! Tea-dust particle field for the grinding station.
//!
//! Coordinates are in a logical canvas of `CANVAS_WIDTH` x `CANVAS_HEIGHT`
//! units; the renderer maps them onto whatever it draws into.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CANVAS_WIDTH: f64 = 400.0;
pub const CANVAS_HEIGHT: f64 = 300.0;

/// Particles appear within this square around the stone centre.
pub const SPAWN_SPREAD: f64 = 100.0;

pub const SIZE_DECAY: f64 = 0.05;
pub const OPACITY_DECAY: f64 = 0.01;

/// Per-frame spawn probability contributed by each pressure level.
pub const SPAWN_CHANCE_PER_LEVEL: f64 = 0.3;

/// Grinding pressure. Picks the leaf consumption band and the dust rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl PressureLevel {
    pub const ALL: [PressureLevel; 3] = [Self::Light, Self::Medium, Self::Heavy];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn level(&self) -> u32 {
        match self {
            Self::Light => 1,
            Self::Medium => 2,
            Self::Heavy => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
        }
    }

    /// Position of this level on the shared 0-100 control scale.
    pub fn control_value(&self) -> f64 {
        match self {
            Self::Light => 20.0,
            Self::Medium => 50.0,
            Self::Heavy => 80.0,
        }
    }

    pub fn spawn_chance(&self) -> f64 {
        SPAWN_CHANCE_PER_LEVEL * self.level() as f64
    }

    /// Particles added by one successful spawn roll.
    pub fn burst_size(&self) -> usize {
        2 * self.level() as usize
    }

    pub fn heavier(&self) -> Self {
        match self {
            Self::Light => Self::Medium,
            _ => Self::Heavy,
        }
    }

    pub fn lighter(&self) -> Self {
        match self {
            Self::Heavy => Self::Medium,
            _ => Self::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn spawn<R: Rng>(rng: &mut R, cx: f64, cy: f64) -> Self {
        Self {
            x: cx + (rng.gen::<f64>() - 0.5) * SPAWN_SPREAD,
            y: cy + (rng.gen::<f64>() - 0.5) * SPAWN_SPREAD,
            vx: (rng.gen::<f64>() - 0.5) * 2.0,
            vy: (rng.gen::<f64>() - 0.5) * 2.0,
            size: rng.gen::<f64>() * 5.0 + 2.0,
            opacity: rng.gen::<f64>() * 0.5 + 0.3,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.size -= SIZE_DECAY;
        self.opacity -= OPACITY_DECAY;
    }

    pub fn is_spent(&self) -> bool {
        self.size <= 0.0 || self.opacity <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Particles removed by the most recent `update`.
    spent: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            particles: Vec::new(),
            spent: Vec::new(),
            width,
            height,
        }
    }

    /// Change the canvas size. New particles spawn around the new centre.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Roll for a burst at this pressure. Returns the number of particles added.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, pressure: PressureLevel) -> usize {
        if rng.gen::<f64>() >= pressure.spawn_chance() {
            return 0;
        }

        let (cx, cy) = self.centre();
        let burst = pressure.burst_size();
        for _ in 0..burst {
            self.particles.push(Particle::spawn(rng, cx, cy));
        }
        burst
    }

    /// Age every particle one frame and drop the spent ones. Returns how many
    /// were dropped.
    pub fn update(&mut self) -> usize {
        self.spent.clear();
        for i in (0..self.particles.len()).rev() {
            self.particles[i].update();
            if self.particles[i].is_spent() {
                self.spent.push(self.particles.swap_remove(i));
            }
        }
        self.spent.len()
    }

    /// One animation frame: spawn roll, then aging.
    pub fn frame<R: Rng>(&mut self, rng: &mut R, pressure: PressureLevel) -> usize {
        self.spawn(rng, pressure);
        self.update()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.spent.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn last_removed(&self) -> &[Particle] {
        &self.spent
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}
