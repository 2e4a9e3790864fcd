//! Deterministic timer queue driven by an external clock.
//!
//! The browser frame loop feeds `performance.now()` into the session, which
//! drains due timers one at a time. Tests feed synthetic timestamps, so the
//! feedback sequence plays out without real waiting.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<E> {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>, // Some => recurring
    event: E,
}

#[derive(Clone, Debug)]
pub struct Scheduler<E> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E: Clone> Scheduler<E> {
    pub fn new(now_ms: u64) -> Self {
        Self { now_ms, next_id: 0, entries: Vec::new() }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule_after(&mut self, delay_ms: u64, event: E) -> TimerId {
        self.push(delay_ms, None, event)
    }

    /// Fires every `period_ms` (minimum 1) until cancelled.
    pub fn schedule_every(&mut self, period_ms: u64, event: E) -> TimerId {
        let period = period_ms.max(1);
        self.push(period, Some(period), event)
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due_ms: self.now_ms.saturating_add(delay_ms), period_ms, event });
        id
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Ties fire in scheduling order. Recurring timers are
    /// re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, E)> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id.0))
            .map(|(pos, _)| pos)?;
        let due = self.entries[pos].due_ms;
        self.now_ms = self.now_ms.max(due);
        let fired = match self.entries[pos].period_ms {
            Some(period) => {
                let entry = &mut self.entries[pos];
                entry.due_ms = entry.due_ms.saturating_add(period);
                (entry.id, entry.event.clone())
            }
            None => {
                let entry = self.entries.remove(pos);
                (entry.id, entry.event)
            }
        };
        Some(fired)
    }

    /// Moves the clock forward once every due timer has been popped.
    pub fn settle(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
