//! Text rendering of the widget for a terminal.

use chrono::{DateTime, TimeZone};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use starwish::celebration::{Burst, Edge};
use starwish::countdown::RemainingTime;
use starwish::particles::ParticleField;
use starwish::prng::RandomSource;
use starwish::wish::SubmissionResult;
use starwish::{GreetingWidget, WidgetEvent};

const FIELD_W: f64 = 80.0;
const FIELD_H: f64 = 24.0;

pub struct Session<R> {
    widget: GreetingWidget<R>,
    field: ParticleField,
}

impl<R: RandomSource> Session<R> {
    pub fn new(widget: GreetingWidget<R>) -> Self {
        Self {
            widget,
            field: ParticleField::new(FIELD_W, FIELD_H),
        }
    }

    pub fn widget(&self) -> &GreetingWidget<R> {
        &self.widget
    }

    pub fn banner(&self) -> Vec<String> {
        vec![
            "★ The Christmas Star ★".to_string(),
            "Make a wish and light up the sky".to_string(),
            countdown_line(&self.widget.remaining()),
        ]
    }

    pub fn handle_line<Tz: TimeZone>(
        &mut self,
        line: &str,
        now_ms: u64,
        now: &DateTime<Tz>,
    ) -> Vec<String> {
        if !self.widget.set_wish_text(line) {
            return vec!["(still celebrating, wait a moment)".to_string()];
        }
        match self.widget.submit(now_ms, now) {
            SubmissionResult::Sent => vec!["Your wish has been sent to the stars!".to_string()],
            SubmissionResult::Blocked => vec!["(still celebrating, wait a moment)".to_string()],
            // Empty wishes are dropped without a word.
            SubmissionResult::Ignored => Vec::new(),
        }
    }

    pub fn frame<Tz: TimeZone>(&mut self, now_ms: u64, now: &DateTime<Tz>) -> Vec<String> {
        let events = self.widget.advance(now_ms, now);
        let mut out = Vec::new();
        for ev in &events {
            match ev {
                WidgetEvent::Countdown(r) => out.push(countdown_line(r)),
                WidgetEvent::Burst(b) => {
                    self.field.spawn(b, self.widget.rng_mut());
                    out.push(burst_line(b));
                }
                WidgetEvent::CelebrationFinished => {
                    debug!(in_flight = self.field.len(), "celebration finished");
                }
                WidgetEvent::Reset => out.push("Ready for another wish.".to_string()),
            }
        }
        self.field.step(self.widget.rng_mut());
        out
    }

    pub fn shutdown(&mut self) {
        self.widget.teardown();
        self.field.clear();
    }
}

pub fn countdown_line(r: &RemainingTime) -> String {
    format!(
        "{} Days  {} Hours  {} Mins  {} Secs",
        r.days, r.hours, r.minutes, r.seconds
    )
}

pub fn burst_line(b: &Burst) -> String {
    let side = match b.edge {
        Edge::Left => "left ",
        Edge::Right => "right",
    };
    // One sparkle per five particles.
    let sparkles = "*".repeat((b.particle_count as usize).div_ceil(5));
    format!(
        "  ✨ {side} x={:.2} y={:+.2} {:>2} {sparkles}",
        b.origin.x, b.origin.y, b.particle_count
    )
}

/// Forward stdin lines to the session loop. Returns how many lines were sent.
pub async fn read_wishes<Rd>(reader: Rd, tx: mpsc::Sender<String>) -> std::io::Result<usize>
where
    Rd: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut sent = 0;
    while let Some(line) = lines.next_line().await? {
        if tx.send(line).await.is_err() {
            break;
        }
        sent += 1;
    }
    Ok(sent)
}
