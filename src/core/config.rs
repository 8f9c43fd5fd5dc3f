//! Widget configuration.
//!
//! Every field has a serde default, so a partial JSON document (or `{}`)
//! yields the stock Christmas widget.

use serde::{Deserialize, Serialize};

use crate::countdown::HolidayDate;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub holiday: HolidayDate,
    #[serde(default = "default_countdown_period_ms")]
    pub countdown_period_ms: u64,
    #[serde(default)]
    pub celebration: CelebrationConfig,
    /// Delay between a sent wish and the form reset.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelebrationConfig {
    #[serde(default = "default_celebration_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_celebration_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_base_count")]
    pub base_count: u32,
    #[serde(default = "default_left_range")]
    pub left_range: (f64, f64),
    #[serde(default = "default_right_range")]
    pub right_range: (f64, f64),
    #[serde(default = "default_start_velocity")]
    pub start_velocity: f64,
    #[serde(default = "default_spread_deg")]
    pub spread_deg: f64,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
}

fn default_countdown_period_ms() -> u64 {
    1000
}

fn default_reset_delay_ms() -> u64 {
    3000
}

fn default_celebration_duration_ms() -> u64 {
    3000
}

fn default_celebration_interval_ms() -> u64 {
    250
}

fn default_base_count() -> u32 {
    50
}

fn default_left_range() -> (f64, f64) {
    (0.1, 0.3)
}

fn default_right_range() -> (f64, f64) {
    (0.7, 0.9)
}

fn default_start_velocity() -> f64 {
    30.0
}

fn default_spread_deg() -> f64 {
    360.0
}

fn default_ticks() -> u32 {
    60
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_celebration_duration_ms(),
            interval_ms: default_celebration_interval_ms(),
            base_count: default_base_count(),
            left_range: default_left_range(),
            right_range: default_right_range(),
            start_velocity: default_start_velocity(),
            spread_deg: default_spread_deg(),
            ticks: default_ticks(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            holiday: HolidayDate::default(),
            countdown_period_ms: default_countdown_period_ms(),
            celebration: CelebrationConfig::default(),
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: WidgetConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        HolidayDate::new(self.holiday.month, self.holiday.day)?;

        if self.countdown_period_ms == 0 {
            return Err(Error::InvalidConfig("countdown_period_ms must be > 0".into()));
        }
        if self.reset_delay_ms == 0 {
            return Err(Error::InvalidConfig("reset_delay_ms must be > 0".into()));
        }

        let c = &self.celebration;
        if c.duration_ms == 0 || c.interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "celebration duration_ms and interval_ms must be > 0".into(),
            ));
        }
        if c.interval_ms > c.duration_ms {
            return Err(Error::InvalidConfig(format!(
                "celebration interval_ms ({}) exceeds duration_ms ({})",
                c.interval_ms, c.duration_ms
            )));
        }
        if c.ticks == 0 {
            return Err(Error::InvalidConfig("celebration ticks must be > 0".into()));
        }
        for (name, (lo, hi)) in [("left_range", c.left_range), ("right_range", c.right_range)] {
            if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo >= hi {
                return Err(Error::InvalidConfig(format!(
                    "{name} must satisfy 0 <= min < max <= 1, got ({lo}, {hi})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(cfg, WidgetConfig::default());
        assert_eq!(cfg.holiday, HolidayDate { month: 12, day: 25 });
        assert_eq!(cfg.celebration.base_count, 50);
        assert_eq!(cfg.reset_delay_ms, 3000);
    }

    #[test]
    fn partial_document_overrides_one_field() {
        let cfg = WidgetConfig::from_json(r#"{"celebration": {"base_count": 80}}"#).unwrap();
        assert_eq!(cfg.celebration.base_count, 80);
        assert_eq!(cfg.celebration.interval_ms, 250);
    }

    #[test]
    fn defaults_survive_json() {
        let raw = WidgetConfig::default().to_json_pretty().unwrap();
        assert_eq!(WidgetConfig::from_json(&raw).unwrap(), WidgetConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            WidgetConfig::from_json(r#"{"holiday": {"month": 2, "day": 30}}"#),
            Err(Error::InvalidHolidayDate { month: 2, day: 30 })
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"countdown_period_ms": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"celebration": {"left_range": [0.5, 0.2]}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(WidgetConfig::from_json("not json"), Err(Error::Parse(_))));
    }
}
