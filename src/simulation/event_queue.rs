//! Discrete-event queue with cancellable timers.
//!
//! Events are ordered by `(time, phase, sequence)`. The phase orders work
//! sharing a timestamp, so every reception of a slot is processed before any
//! node selects resources in that slot. The sequence keeps insertion order
//! among events of the same time and phase.

use std::collections::{BTreeMap, HashMap};

/// Simulation time in microseconds.
pub type SimTime = u64;

/// Processing phase of an event within one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Reception,
    Mobility,
    Traffic,
    Mac,
    Report,
}

/// Handle of a scheduled event, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

type EventKey = (SimTime, Phase, u64);

#[derive(Debug)]
pub struct EventQueue<E> {
    now: SimTime,
    next_sequence: u64,
    events: BTreeMap<EventKey, E>,
    keys: HashMap<u64, EventKey>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_sequence: 0,
            events: BTreeMap::new(),
            keys: HashMap::new(),
        }
    }

    /// Time of the last popped event.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule `event` at an absolute time. Times in the past are moved to now.
    pub fn schedule_at(&mut self, time: SimTime, phase: Phase, event: E) -> TimerHandle {
        let key = (time.max(self.now), phase, self.next_sequence);
        self.next_sequence += 1;
        self.events.insert(key, event);
        self.keys.insert(key.2, key);
        TimerHandle(key.2)
    }

    pub fn schedule_in(&mut self, delay: SimTime, phase: Phase, event: E) -> TimerHandle {
        self.schedule_at(self.now.saturating_add(delay), phase, event)
    }

    /// Remove a pending event. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.keys.remove(&handle.0) {
            Some(key) => self.events.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.keys.contains_key(&handle.0)
    }

    /// Time of the next event without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.events.keys().next().map(|key| key.0)
    }

    /// Remove the next event and advance the clock to its time.
    pub fn pop(&mut self) -> Option<(SimTime, Phase, E)> {
        let ((time, phase, sequence), event) = self.events.pop_first()?;
        self.keys.remove(&sequence);
        self.now = time;
        Some((time, phase, event))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
