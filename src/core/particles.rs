//! Confetti physics for rendering bursts.
//!
//! Each burst spawns `particle_count` flakes at its origin. Every animation
//! frame a flake moves along its launch angle, slows by `DECAY`, falls by
//! `GRAVITY`, wobbles and tilts. It dies after `ticks` frames.

use crate::celebration::Burst;
use crate::prng::RandomSource;

pub const PALETTE: [&str; 7] = [
    "#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d", "#ff36ff",
];

const DECAY: f64 = 0.9;
const GRAVITY: f64 = 3.0;
const LAUNCH_ANGLE_DEG: f64 = 90.0;
const WOBBLE_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    velocity: f64,
    angle_2d: f64,
    wobble: f64,
    wobble_speed: f64,
    tilt_angle: f64,
    jitter: f64,
    pub color: &'static str,
    pub tick: u32,
    pub total_ticks: u32,
}

/// Four corners of the flake as drawn on screen.
pub type Quad = [(f64, f64); 4];

impl Particle {
    fn spawn<R: RandomSource>(burst: &Burst, x: f64, y: f64, color: &'static str, rng: &mut R) -> Self {
        let rad_angle = LAUNCH_ANGLE_DEG.to_radians();
        let rad_spread = burst.options.spread_deg.to_radians();
        let v0 = burst.options.start_velocity;
        Self {
            x,
            y,
            velocity: v0 * 0.5 + rng.next_f64() * v0,
            angle_2d: -rad_angle + (0.5 * rad_spread - rng.next_f64() * rad_spread),
            wobble: rng.next_f64() * 10.0,
            wobble_speed: (rng.next_f64() * 0.1 + 0.05).min(0.11),
            tilt_angle: rng.range(0.25, 0.75) * std::f64::consts::PI,
            jitter: 2.0,
            color,
            tick: 0,
            total_ticks: burst.options.ticks.max(1),
        }
    }

    /// Advance one frame. Returns false once the flake has expired.
    pub fn update<R: RandomSource>(&mut self, rng: &mut R) -> bool {
        self.x += self.angle_2d.cos() * self.velocity;
        self.y += self.angle_2d.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt_angle += 0.1;
        self.jitter = rng.next_f64() + 2.0;
        self.tick += 1;
        self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.tick < self.total_ticks
    }

    pub fn opacity(&self) -> f64 {
        (1.0 - self.tick as f64 / self.total_ticks as f64).clamp(0.0, 1.0)
    }

    pub fn quad(&self) -> Quad {
        let wobble_x = self.x + WOBBLE_RADIUS * self.wobble.cos();
        let wobble_y = self.y + WOBBLE_RADIUS * self.wobble.sin();
        let (sin, cos) = self.tilt_angle.sin_cos();
        let x1 = self.x + self.jitter * cos;
        let y1 = self.y + self.jitter * sin;
        let x2 = wobble_x + self.jitter * cos;
        let y2 = wobble_y + self.jitter * sin;
        [(self.x, self.y), (wobble_x, y1), (x2, y2), (x1, wobble_y)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    next_color: usize,
}

impl ParticleField {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            particles: Vec::new(),
            next_color: 0,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn spawn<R: RandomSource>(&mut self, burst: &Burst, rng: &mut R) {
        let x = burst.origin.x * self.width;
        let y = burst.origin.y * self.height;
        self.particles.reserve(burst.particle_count as usize);
        for _ in 0..burst.particle_count {
            let color = PALETTE[self.next_color % PALETTE.len()];
            self.next_color = self.next_color.wrapping_add(1);
            self.particles.push(Particle::spawn(burst, x, y, color, rng));
        }
    }

    /// Advance all flakes one frame and drop the expired ones.
    pub fn step<R: RandomSource>(&mut self, rng: &mut R) {
        self.particles.retain_mut(|p| p.update(rng));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
