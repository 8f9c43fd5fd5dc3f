//! Star animation: a two-state machine driving scale, rotation and glow.
//!
//! Idle breathes forever. Celebrating plays one emphasis pulse with a full
//! turn and holds the last frame until the phase changes again.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarPhase {
    Idle,
    Celebrating,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPose {
    pub scale: f64,
    pub rotate_deg: f64,
    pub glow_px: f64,
}

struct Track {
    scale: [f64; 3],
    rotate_to: f64,
    glow_px: f64,
    duration_ms: u64,
    repeat: bool,
}

const IDLE: Track = Track {
    scale: [1.0, 1.1, 1.0],
    rotate_to: 0.0,
    glow_px: 15.0,
    duration_ms: 4000,
    repeat: true,
};

const CELEBRATING: Track = Track {
    scale: [1.0, 1.5, 1.0],
    rotate_to: 360.0,
    glow_px: 50.0,
    duration_ms: 1000,
    repeat: false,
};

impl StarPhase {
    fn track(self) -> &'static Track {
        match self {
            StarPhase::Idle => &IDLE,
            StarPhase::Celebrating => &CELEBRATING,
        }
    }

    pub fn from_sent(sent: bool) -> Self {
        if sent {
            StarPhase::Celebrating
        } else {
            StarPhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StarAnimation {
    phase: StarPhase,
    since_ms: u64,
}

impl StarAnimation {
    pub fn new(now_ms: u64) -> Self {
        Self {
            phase: StarPhase::Idle,
            since_ms: now_ms,
        }
    }

    pub fn phase(&self) -> StarPhase {
        self.phase
    }

    /// Restarts the track only when the phase actually changes.
    pub fn set_phase(&mut self, phase: StarPhase, now_ms: u64) {
        if self.phase != phase {
            self.phase = phase;
            self.since_ms = now_ms;
        }
    }

    pub fn sample(&self, now_ms: u64) -> StarPose {
        let track = self.phase.track();
        let elapsed = now_ms.saturating_sub(self.since_ms);
        let t = if track.repeat {
            (elapsed % track.duration_ms) as f64 / track.duration_ms as f64
        } else {
            (elapsed as f64 / track.duration_ms as f64).min(1.0)
        };
        StarPose {
            scale: keyframes(&track.scale, t),
            rotate_deg: track.rotate_to * t,
            glow_px: track.glow_px,
        }
    }
}

/// Piecewise-linear interpolation over evenly spaced keyframes, `t` in `[0, 1]`.
fn keyframes(frames: &[f64], t: f64) -> f64 {
    match frames {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segs = (frames.len() - 1) as f64;
            let pos = t.clamp(0.0, 1.0) * segs;
            let i = (pos.floor() as usize).min(frames.len() - 2);
            let local = pos - i as f64;
            frames[i] + (frames[i + 1] - frames[i]) * local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn idle_breathes_and_repeats() {
        let star = StarAnimation::new(0);
        assert!(close(star.sample(0).scale, 1.0));
        assert!(close(star.sample(2000).scale, 1.1));
        assert!(close(star.sample(1000).scale, 1.05));
        assert!(close(star.sample(6000).scale, 1.1));
        assert_eq!(star.sample(2000).rotate_deg, 0.0);
        assert_eq!(star.sample(2000).glow_px, 15.0);
    }

    #[test]
    fn celebrating_plays_once_and_holds() {
        let mut star = StarAnimation::new(0);
        star.set_phase(StarPhase::Celebrating, 10_000);
        assert!(close(star.sample(10_500).scale, 1.5));
        assert!(close(star.sample(10_500).rotate_deg, 180.0));
        let end = star.sample(11_000);
        assert!(close(end.scale, 1.0));
        assert!(close(end.rotate_deg, 360.0));
        assert_eq!(end.glow_px, 50.0);
        assert_eq!(star.sample(20_000), end);
    }

    #[test]
    fn same_phase_does_not_restart() {
        let mut star = StarAnimation::new(0);
        star.set_phase(StarPhase::Idle, 1000);
        assert!(close(star.sample(2000).scale, 1.1));
        star.set_phase(StarPhase::from_sent(false), 3000);
        assert_eq!(star.phase(), StarPhase::Idle);
    }
}
