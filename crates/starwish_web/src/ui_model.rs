//! Presentation strings and formatting shared by the wasm app and host tests.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! page contents on the host.

use starwish::countdown::RemainingTime;
use starwish::star::StarPose;

pub const TITLE: &str = "The Christmas Star";
pub const SUBTITLE: &str = "Make a wish and light up the sky";
pub const PLACEHOLDER: &str = "Type your Christmas wish...";
pub const SUCCESS_MESSAGE: &str = "Your wish has been sent to the stars!";
pub const FOOTER: &str = "Created for the Competition";

pub const STAR_COLOR: &str = "#ffd700";

/// Outline of the star icon on a 24x24 viewBox.
pub const STAR_POINTS: &str =
    "12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownField {
    Days,
    Hours,
    Mins,
    Secs,
}

impl CountdownField {
    pub fn label(self) -> &'static str {
        match self {
            CountdownField::Days => "Days",
            CountdownField::Hours => "Hours",
            CountdownField::Mins => "Mins",
            CountdownField::Secs => "Secs",
        }
    }

    pub fn value(self, r: &RemainingTime) -> u32 {
        match self {
            CountdownField::Days => r.days,
            CountdownField::Hours => r.hours,
            CountdownField::Mins => r.minutes,
            CountdownField::Secs => r.seconds,
        }
    }

    pub fn all() -> &'static [CountdownField] {
        &[
            CountdownField::Days,
            CountdownField::Hours,
            CountdownField::Mins,
            CountdownField::Secs,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIcon {
    Send,
    Sparkles,
}

impl SubmitIcon {
    pub fn for_sent(sent: bool) -> Self {
        if sent {
            SubmitIcon::Sparkles
        } else {
            SubmitIcon::Send
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SubmitIcon::Send => "➤",
            SubmitIcon::Sparkles => "✨",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SubmitIcon::Send => "",
            SubmitIcon::Sparkles => "icon-spin",
        }
    }
}

/// Inline CSS for the star wrapper.
pub fn star_style(pose: &StarPose) -> String {
    format!(
        "transform: scale({:.3}) rotate({:.1}deg); filter: drop-shadow(0 0 {:.0}px {STAR_COLOR});",
        pose.scale, pose.rotate_deg, pose.glow_px
    )
}
