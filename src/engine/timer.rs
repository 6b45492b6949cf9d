//! Per-round clock task
//!
//! Each round that needs a clock gets its own spawned task ticking once per
//! second. Events carry the round's id, so ticks that arrive after the round
//! has been replaced are recognisably stale.

use super::session::RoundId;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::trace;

/// How a round's clock is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Counts down from the given number of seconds and stops at zero
    Countdown(u32),
    /// Counts elapsed seconds with no limit
    Stopwatch,
}

/// One tick: `elapsed` whole seconds since the round started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub round: RoundId,
    pub elapsed: u32,
}

/// Handle to a running clock; dropping it stops the task
#[derive(Debug)]
pub struct RoundClock {
    handle: JoinHandle<()>,
}

impl RoundClock {
    /// Start ticking for `round` on the current tokio runtime
    #[must_use]
    pub fn spawn(round: RoundId, kind: ClockKind, events: UnboundedSender<TimerEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut elapsed = 0u32;
            loop {
                ticks.tick().await;
                elapsed += 1;
                trace!(?round, elapsed, "tick");
                if events.send(TimerEvent { round, elapsed }).is_err() {
                    break;
                }
                if let ClockKind::Countdown(limit) = kind
                    && elapsed >= limit
                {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for RoundClock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test(start_paused = true)]
    async fn countdown_stops_at_limit() {
        let (tx, mut rx) = unbounded_channel();
        let round = RoundId::first();
        let _clock = RoundClock::spawn(round, ClockKind::Countdown(3), tx);

        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            assert_eq!(event.round, round);
            seen.push(event.elapsed);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_after_one_second() {
        let (tx, mut rx) = unbounded_channel();
        let start = Instant::now();
        let _clock = RoundClock::spawn(RoundId::first(), ClockKind::Stopwatch, tx);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.elapsed, 1);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_clock_stops_ticks() {
        let (tx, mut rx) = unbounded_channel();
        let clock = RoundClock::spawn(RoundId::first(), ClockKind::Stopwatch, tx);

        assert_eq!(rx.recv().await.unwrap().elapsed, 1);
        drop(clock);
        // Sender lives in the aborted task, so the channel closes
        assert_eq!(rx.recv().await, None);
    }
}
