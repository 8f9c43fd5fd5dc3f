//! The greeting widget: countdown, wish form, celebration and star in one owner.
//!
//! Hosts create it at mount, call [`GreetingWidget::advance`] from their frame
//! loop with a monotonic millisecond clock plus the zone-aware local time, and
//! call [`GreetingWidget::teardown`] at unmount. Every timer lives in the
//! widget's own [`Scheduler`]; there is no global timer state.
//!
//! Submissions take the host's current time too. Jobs already due run first;
//! their events come out of the next `advance`.

use chrono::{DateTime, Duration, TimeZone};
use tracing::{debug, info};

use crate::celebration::{Burst, Celebration, CelebrationTick};
use crate::config::WidgetConfig;
use crate::countdown::{remaining_until, RemainingTime};
use crate::prng::RandomSource;
use crate::schedule::{Scheduler, TaskId};
use crate::star::{StarAnimation, StarPhase, StarPose};
use crate::wish::{SubmissionResult, WishForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    CountdownTick,
    CelebrationTick,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Countdown(RemainingTime),
    Burst(Burst),
    CelebrationFinished,
    /// The celebration window closed: the form is idle and empty again.
    Reset,
}

pub struct GreetingWidget<R> {
    config: WidgetConfig,
    rng: R,
    scheduler: Scheduler<Job>,
    wish: WishForm,
    star: StarAnimation,
    remaining: RemainingTime,
    countdown_task: Option<TaskId>,
    celebration: Option<(Celebration, TaskId)>,
    reset_task: Option<TaskId>,
    backlog: Vec<WidgetEvent>,
    mounted: bool,
}

impl<R: RandomSource> GreetingWidget<R> {
    pub fn mount<Tz: TimeZone>(
        config: WidgetConfig,
        rng: R,
        now_ms: u64,
        now: &DateTime<Tz>,
    ) -> Self {
        let mut scheduler = Scheduler::new(now_ms);
        let countdown_task = scheduler.every(config.countdown_period_ms, Job::CountdownTick);
        let remaining = remaining_until(now, config.holiday);
        debug!(%remaining, holiday = ?config.holiday, "widget mounted");
        Self {
            rng,
            scheduler,
            wish: WishForm::new(),
            star: StarAnimation::new(now_ms),
            remaining,
            countdown_task: Some(countdown_task),
            celebration: None,
            reset_task: None,
            backlog: Vec::new(),
            mounted: true,
            config,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn remaining(&self) -> RemainingTime {
        self.remaining
    }

    pub fn wish(&self) -> &WishForm {
        &self.wish
    }

    pub fn is_sent(&self) -> bool {
        self.wish.is_sent()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    /// Timers still armed. Zero after teardown.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn star_phase(&self) -> StarPhase {
        self.star.phase()
    }

    pub fn star_pose(&self, now_ms: u64) -> StarPose {
        self.star.sample(now_ms)
    }

    /// Returns false while the input is disabled.
    pub fn set_wish_text(&mut self, text: impl Into<String>) -> bool {
        self.mounted && self.wish.set_text(text)
    }

    /// Send the current wish at `now_ms`. The reset and the celebration ticks
    /// count from this instant, not from the last frame.
    pub fn submit<Tz: TimeZone>(&mut self, now_ms: u64, now: &DateTime<Tz>) -> SubmissionResult {
        if !self.mounted {
            return SubmissionResult::Ignored;
        }
        self.catch_up(now_ms, now);
        let result = self.wish.submit();
        if result != SubmissionResult::Sent {
            debug!(?result, "wish not sent");
            return result;
        }

        let now_ms = self.scheduler.now_ms();
        info!(chars = self.wish.text().chars().count(), now_ms, "wish sent");
        self.star.set_phase(StarPhase::Celebrating, now_ms);
        self.start_celebration();
        if let Some(id) = self.reset_task.take() {
            self.scheduler.cancel(id);
        }
        self.reset_task = Some(self.scheduler.after(self.config.reset_delay_ms, Job::Reset));
        result
    }

    /// Start a fresh celebration run at `now_ms`, cancelling any run in progress.
    pub fn celebrate<Tz: TimeZone>(&mut self, now_ms: u64, now: &DateTime<Tz>) {
        if !self.mounted {
            return;
        }
        self.catch_up(now_ms, now);
        self.start_celebration();
    }

    fn start_celebration(&mut self) {
        if let Some((_, id)) = self.celebration.take() {
            self.scheduler.cancel(id);
            debug!("celebration restarted");
        }
        let run = Celebration::new(self.config.celebration.clone(), self.scheduler.now_ms());
        let id = self.scheduler.every(run.interval_ms(), Job::CelebrationTick);
        self.celebration = Some((run, id));
    }

    pub fn advance<Tz: TimeZone>(&mut self, now_ms: u64, now: &DateTime<Tz>) -> Vec<WidgetEvent> {
        if !self.mounted {
            return Vec::new();
        }
        let mut events = std::mem::take(&mut self.backlog);
        self.run_due(now_ms, now, &mut events);
        events
    }

    /// Run due jobs ahead of a user action; the events wait for the next `advance`.
    fn catch_up<Tz: TimeZone>(&mut self, now_ms: u64, now: &DateTime<Tz>) {
        let mut backlog = std::mem::take(&mut self.backlog);
        self.run_due(now_ms, now, &mut backlog);
        self.backlog = backlog;
    }

    fn run_due<Tz: TimeZone>(&mut self, now_ms: u64, now: &DateTime<Tz>, events: &mut Vec<WidgetEvent>) {
        while let Some((due_ms, id, job)) = self.scheduler.pop_due(now_ms) {
            match job {
                Job::CountdownTick => {
                    // After a sleep, publish once for the latest missed second.
                    let skipped = self.scheduler.skip_missed(id, now_ms);
                    if skipped > 0 {
                        debug!(skipped, "countdown ticks coalesced");
                    }
                    let tick_ms = due_ms + skipped * self.config.countdown_period_ms.max(1);
                    let lag = Duration::milliseconds(now_ms.saturating_sub(tick_ms) as i64);
                    self.remaining = remaining_until(&(now.clone() - lag), self.config.holiday);
                    events.push(WidgetEvent::Countdown(self.remaining));
                }
                Job::CelebrationTick => {
                    let Some((run, _)) = &self.celebration else {
                        self.scheduler.cancel(id);
                        continue;
                    };
                    match run.tick(due_ms, &mut self.rng) {
                        CelebrationTick::Bursts(bursts) => {
                            events.extend(bursts.into_iter().map(WidgetEvent::Burst));
                        }
                        CelebrationTick::Finished => {
                            self.scheduler.cancel(id);
                            self.celebration = None;
                            debug!(due_ms, "celebration finished");
                            events.push(WidgetEvent::CelebrationFinished);
                        }
                    }
                }
                Job::Reset => {
                    self.reset_task = None;
                    self.wish.reset();
                    self.star.set_phase(StarPhase::Idle, due_ms);
                    events.push(WidgetEvent::Reset);
                }
            }
        }
        self.scheduler.advance_to(now_ms);
    }

    /// Cancel every timer. The widget is inert afterwards.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        let owned = [
            self.countdown_task.take(),
            self.celebration.take().map(|(_, id)| id),
            self.reset_task.take(),
        ];
        for id in owned.into_iter().flatten() {
            self.scheduler.cancel(id);
        }
        debug_assert_eq!(self.scheduler.pending(), 0);
        self.scheduler.cancel_all();
        self.backlog.clear();
        self.mounted = false;
        info!("widget torn down");
    }
}
