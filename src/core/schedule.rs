//! Cooperative single-threaded scheduler.
//!
//! Owns every timer the widget uses. Nothing runs on its own: the host calls
//! [`Scheduler::advance_to`] with the current monotonic time and gets back the
//! jobs that came due, in due-time order (ties in registration order).

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug)]
struct Task<J> {
    id: TaskId,
    due_ms: u64,
    repeat: Repeat,
    job: J,
}

#[derive(Debug)]
pub struct Scheduler<J> {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task<J>>,
}

impl<J: Clone> Scheduler<J> {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `job` every `period_ms`, first at `now + period_ms`.
    pub fn every(&mut self, period_ms: u64, job: J) -> TaskId {
        let period_ms = period_ms.max(1);
        self.push(self.now_ms + period_ms, Repeat::Every(period_ms), job)
    }

    /// Fire `job` once at `now + delay_ms`.
    pub fn after(&mut self, delay_ms: u64, job: J) -> TaskId {
        self.push(self.now_ms + delay_ms, Repeat::Once, job)
    }

    fn push(&mut self, due_ms: u64, repeat: Repeat, job: J) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        trace!(task = id.0, due_ms, ?repeat, "schedule");
        self.tasks.push(Task {
            id,
            due_ms,
            repeat,
            job,
        });
        id
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            trace!(task = id.0, "cancel");
        }
        removed
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to its due time.
    ///
    /// Intervals are re-armed at `due + period` before the job is handed out, so a
    /// caller may cancel the task while handling it.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, TaskId, J)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let task = &mut self.tasks[idx];
        let due_ms = task.due_ms;
        let id = task.id;
        let job = task.job.clone();
        match task.repeat {
            Repeat::Every(period) => task.due_ms += period,
            Repeat::Once => {
                self.tasks.swap_remove(idx);
            }
        }
        self.now_ms = self.now_ms.max(due_ms);
        Some((due_ms, id, job))
    }

    /// Move an interval past `now_ms` on its own grid, dropping the periods it
    /// missed. Returns how many were dropped.
    pub fn skip_missed(&mut self, id: TaskId, now_ms: u64) -> u64 {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return 0;
        };
        let Repeat::Every(period) = task.repeat else {
            return 0;
        };
        if task.due_ms > now_ms {
            return 0;
        }
        let skipped = (now_ms - task.due_ms) / period + 1;
        task.due_ms += skipped * period;
        trace!(task = id.0, skipped, due_ms = task.due_ms, "skip missed");
        skipped
    }

    /// Drain everything due up to `now_ms` and move the clock there.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<(u64, TaskId, J)> {
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(now_ms) {
            fired.push(entry);
        }
        self.now_ms = self.now_ms.max(now_ms);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_fires_without_drift() {
        let mut s = Scheduler::new(100);
        let id = s.every(250, 'c');
        let fired = s.advance_to(1100);
        let times: Vec<u64> = fired.iter().map(|(t, _, _)| *t).collect();
        assert_eq!(times, vec![350, 600, 850, 1100]);
        assert!(fired.iter().all(|(_, i, j)| *i == id && *j == 'c'));
        assert_eq!(s.now_ms(), 1100);
    }

    #[test]
    fn timeout_fires_once() {
        let mut s = Scheduler::new(0);
        s.after(3000, "reset");
        assert!(s.advance_to(2999).is_empty());
        assert_eq!(s.advance_to(3000).len(), 1);
        assert!(s.advance_to(10_000).is_empty());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn ties_fire_in_registration_order() {
        let mut s = Scheduler::new(0);
        s.every(1000, 1);
        s.after(1000, 2);
        s.every(500, 3);
        let jobs: Vec<i32> = s.advance_to(1000).into_iter().map(|(_, _, j)| j).collect();
        assert_eq!(jobs, vec![3, 1, 2, 3]);
    }

    #[test]
    fn cancel_stops_future_fires() {
        let mut s = Scheduler::new(0);
        let a = s.every(100, 'a');
        s.every(100, 'b');
        assert_eq!(s.advance_to(100).len(), 2);
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        let jobs: Vec<char> = s.advance_to(300).into_iter().map(|(_, _, j)| j).collect();
        assert_eq!(jobs, vec!['b', 'b']);
    }

    #[test]
    fn skip_missed_keeps_the_grid() {
        let mut s = Scheduler::new(0);
        let id = s.every(1000, 'c');
        let once = s.after(500, 'r');
        assert_eq!(s.pop_due(3500).map(|(t, _, _)| t), Some(500));
        let (due, popped, _) = s.pop_due(3500).unwrap();
        assert_eq!((due, popped), (1000, id));
        // 2000 and 3000 were missed; next fire is 4000.
        assert_eq!(s.skip_missed(id, 3500), 2);
        assert!(s.pop_due(3999).is_none());
        assert_eq!(s.pop_due(4000).map(|(t, _, _)| t), Some(4000));
        assert_eq!(s.skip_missed(id, 4000), 0);
        assert_eq!(s.skip_missed(once, 10_000), 0);
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut s = Scheduler::new(0);
        s.every(10, ());
        s.after(10, ());
        s.cancel_all();
        assert!(s.advance_to(1000).is_empty());
    }
}
