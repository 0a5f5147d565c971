//! Delayed resolution of comparisons.
//!
//! A comparison is flipped immediately and finalized later. The delay is
//! cooperative: the frame loop asks for due tickets once per frame, so a
//! resolution never runs concurrently with a selection.

use crate::types::{Generation, TileId, Verdict};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Identifies one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("timer-{}", _0)]
pub struct TimerHandle(u64);

/// One-shot delayed delivery of payloads on the logic thread.
pub trait Timer<P> {
    /// Arranges for `payload` to become due once `delay` has passed since `now`.
    fn schedule(&mut self, now: Instant, delay: Duration, payload: P) -> TimerHandle;

    /// Drops every pending payload without delivering it.
    fn clear_all(&mut self);

    /// Removes and returns every payload whose deadline is at or before `now`,
    /// earliest first.
    fn take_due(&mut self, now: Instant) -> Vec<P>;

    /// Number of payloads still waiting.
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Scheduled<P> {
    handle: TimerHandle,
    deadline: Instant,
    payload: P,
}

/// Deadline list polled once per frame.
#[derive(Debug, Clone)]
pub struct FrameTimer<P> {
    next_handle: u64,
    entries: Vec<Scheduled<P>>,
}

impl<P> FrameTimer<P> {
    /// Creates an empty timer.
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            entries: Vec::new(),
        }
    }
}

impl<P> Default for FrameTimer<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Timer<P> for FrameTimer<P> {
    fn schedule(&mut self, now: Instant, delay: Duration, payload: P) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.entries.push(Scheduled {
            handle,
            deadline: now + delay,
            payload,
        });
        handle
    }

    fn clear_all(&mut self) {
        self.entries.clear();
    }

    fn take_due(&mut self, now: Instant) -> Vec<P> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.deadline <= now);
        self.entries = waiting;

        due.sort_by_key(|entry| (entry.deadline, entry.handle));
        due.into_iter().map(|entry| entry.payload).collect()
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }
}

/// How long revealed tiles stay up before a comparison resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Pause after a matching pair.
    match_delay: Duration,
    /// Pause after a mismatched pair.
    mismatch_delay: Duration,
}

impl RevealTiming {
    /// Creates timing with explicit delays.
    pub fn new(match_delay: Duration, mismatch_delay: Duration) -> Self {
        Self {
            match_delay,
            mismatch_delay,
        }
    }

    /// Delay for the given verdict.
    pub fn delay_for(&self, verdict: Verdict) -> Duration {
        match verdict {
            Verdict::Match => self.match_delay,
            Verdict::Mismatch => self.mismatch_delay,
        }
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1000))
    }
}

/// Payload of a scheduled resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTicket {
    /// Board generation the comparison belongs to.
    pub generation: Generation,
    /// Tile selected first.
    pub first: TileId,
    /// Tile selected second.
    pub second: TileId,
    /// Outcome decided at selection time.
    pub verdict: Verdict,
}

/// Owns the timer and the board generation.
///
/// Starting a new generation clears every pending timer before the old board
/// goes away, and tickets from earlier generations are never handed out.
#[derive(Debug, Clone)]
pub struct RevealCoordinator<T = FrameTimer<ResolutionTicket>> {
    timer: T,
    timing: RevealTiming,
    generation: Generation,
}

impl RevealCoordinator {
    /// Coordinator over a [`FrameTimer`].
    pub fn with_timing(timing: RevealTiming) -> Self {
        Self::new(FrameTimer::new(), timing)
    }
}

impl Default for RevealCoordinator {
    fn default() -> Self {
        Self::with_timing(RevealTiming::default())
    }
}

impl<T: Timer<ResolutionTicket>> RevealCoordinator<T> {
    /// Wraps an arbitrary timer.
    pub fn new(timer: T, timing: RevealTiming) -> Self {
        Self {
            timer,
            timing,
            generation: Generation::default(),
        }
    }

    /// Generation new boards must be built with.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Configured delays.
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    /// Resolutions still waiting to fire.
    pub fn pending(&self) -> usize {
        self.timer.pending()
    }

    /// Schedules the resolution of a comparison under the current generation.
    #[instrument(skip(self, now), fields(generation = %self.generation))]
    pub fn schedule_resolution(
        &mut self,
        now: Instant,
        first: TileId,
        second: TileId,
        verdict: Verdict,
    ) -> TimerHandle {
        let delay = self.timing.delay_for(verdict);
        let ticket = ResolutionTicket {
            generation: self.generation,
            first,
            second,
            verdict,
        };
        let handle = self.timer.schedule(now, delay, ticket);
        debug!(%handle, delay_ms = delay.as_millis() as u64, "Resolution scheduled");
        handle
    }

    /// Cancels everything pending and moves to a new generation.
    #[instrument(skip(self), fields(from = %self.generation))]
    pub fn next_generation(&mut self) -> Generation {
        let cancelled = self.timer.pending();
        self.timer.clear_all();
        self.generation = self.generation.next();
        debug!(cancelled, to = %self.generation, "Started new generation");
        self.generation
    }

    /// Tickets that are due at `now` and belong to the current generation.
    pub fn due(&mut self, now: Instant) -> Vec<ResolutionTicket> {
        let current = self.generation;
        self.timer
            .take_due(now)
            .into_iter()
            .filter(|ticket| {
                let fresh = ticket.generation == current;
                if !fresh {
                    warn!(
                        ticket_generation = %ticket.generation,
                        current = %current,
                        "Dropping resolution from a previous board"
                    );
                }
                fresh
            })
            .collect()
    }
}
