//! Confetti celebration fired when a wish is sent.
//!
//! A run lasts `duration_ms`. On every tick it emits two bursts, one from each
//! screen edge, whose particle count decays linearly with the time left. The
//! first tick at or past the end emits nothing and finishes the run.

use serde::{Deserialize, Serialize};

use crate::config::CelebrationConfig;
use crate::prng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
}

/// Launch point in viewport fractions. `y` may be negative (above the top edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstOptions {
    pub start_velocity: f64,
    pub spread_deg: f64,
    pub ticks: u32,
    pub z_index: i32,
}

impl BurstOptions {
    pub fn from_config(cfg: &CelebrationConfig) -> Self {
        Self {
            start_velocity: cfg.start_velocity,
            spread_deg: cfg.spread_deg,
            ticks: cfg.ticks,
            z_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub edge: Edge,
    pub particle_count: u32,
    pub origin: Origin,
    pub options: BurstOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CelebrationTick {
    Bursts([Burst; 2]),
    Finished,
}

#[derive(Debug, Clone)]
pub struct Celebration {
    started_ms: u64,
    config: CelebrationConfig,
}

impl Celebration {
    pub fn new(config: CelebrationConfig, started_ms: u64) -> Self {
        Self { started_ms, config }
    }

    pub fn started_ms(&self) -> u64 {
        self.started_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.config.interval_ms
    }

    pub fn end_ms(&self) -> u64 {
        self.started_ms + self.config.duration_ms
    }

    pub fn time_remaining(&self, now_ms: u64) -> u64 {
        self.end_ms().saturating_sub(now_ms)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.time_remaining(now_ms) == 0
    }

    /// `floor(base_count * time_remaining / duration)`.
    pub fn particle_count(&self, now_ms: u64) -> u32 {
        let remaining = self.time_remaining(now_ms);
        if self.config.duration_ms == 0 {
            return 0;
        }
        (self.config.base_count as u64 * remaining / self.config.duration_ms) as u32
    }

    pub fn tick<R: RandomSource>(&self, now_ms: u64, rng: &mut R) -> CelebrationTick {
        if self.is_finished(now_ms) {
            return CelebrationTick::Finished;
        }
        let particle_count = self.particle_count(now_ms);
        let options = BurstOptions::from_config(&self.config);
        let (ll, lh) = self.config.left_range;
        let (rl, rh) = self.config.right_range;
        let left = Burst {
            edge: Edge::Left,
            particle_count,
            origin: Origin {
                x: rng.range(ll, lh),
                y: rng.next_f64() - 0.2,
            },
            options,
        };
        let right = Burst {
            edge: Edge::Right,
            particle_count,
            origin: Origin {
                x: rng.range(rl, rh),
                y: rng.next_f64() - 0.2,
            },
            options,
        };
        CelebrationTick::Bursts([left, right])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::{Prng, ScriptedRandom};

    fn run(started: u64) -> Celebration {
        Celebration::new(CelebrationConfig::default(), started)
    }

    #[test]
    fn counts_decay_linearly_and_strictly() {
        let c = run(1_000);
        let counts: Vec<u32> = (1..12).map(|k| c.particle_count(1_000 + k * 250)).collect();
        assert_eq!(counts, vec![45, 41, 37, 33, 29, 25, 20, 16, 12, 8, 4]);
        assert!(counts.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(c.particle_count(1_000), 50);
        assert_eq!(c.particle_count(4_000), 0);
    }

    #[test]
    fn finishes_at_end_of_window() {
        let c = run(0);
        let mut rng = Prng::new(7);
        assert!(matches!(c.tick(2_750, &mut rng), CelebrationTick::Bursts(_)));
        assert_eq!(c.tick(3_000, &mut rng), CelebrationTick::Finished);
        assert_eq!(c.tick(9_000, &mut rng), CelebrationTick::Finished);
    }

    #[test]
    fn origins_follow_the_random_source() {
        let c = run(0);
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.5, 0.9]);
        let CelebrationTick::Bursts([left, right]) = c.tick(250, &mut rng) else {
            panic!("expected bursts");
        };
        assert_eq!(left.edge, Edge::Left);
        assert!((left.origin.x - 0.1).abs() < 1e-12);
        assert!((left.origin.y + 0.2).abs() < 1e-12);
        assert!((right.origin.x - 0.8).abs() < 1e-12);
        assert!((right.origin.y - 0.7).abs() < 1e-12);
        assert_eq!(left.options.ticks, 60);
        assert_eq!(left.options.spread_deg, 360.0);
        assert_eq!(right.options.start_velocity, 30.0);
    }

    #[test]
    fn origins_stay_in_edge_ranges() {
        let c = run(0);
        let mut rng = Prng::new(99);
        for k in 1..12 {
            let CelebrationTick::Bursts([l, r]) = c.tick(k * 250, &mut rng) else {
                panic!("run ended early");
            };
            assert!((0.1..0.3).contains(&l.origin.x));
            assert!((0.7..0.9).contains(&r.origin.x));
            assert!((-0.2..0.8).contains(&l.origin.y));
            assert!((-0.2..0.8).contains(&r.origin.y));
        }
    }
}
