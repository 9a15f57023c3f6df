//! Replaying a finished step sequence at a chosen pace.
//!
//! The algorithms hand back complete sequences (the search visitation order, the solution path),
//! so playback never affects their results: cancelling only stops the replay.

use std::cmp;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::units::StepsCount;

/// Shared flag for stopping a replay, possibly from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PlaybackOutcome {
    Completed(StepsCount),
    Cancelled(StepsCount),
}

impl PlaybackOutcome {
    pub fn steps_delivered(&self) -> StepsCount {
        match *self {
            PlaybackOutcome::Completed(steps) | PlaybackOutcome::Cancelled(steps) => steps,
        }
    }
}

/// Longest stretch a pause sleeps before looking at the cancel token again.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Hand each step to `on_step` (with its index), pausing `delay` between steps.
///
/// The token is checked before every step and throughout every pause, so a cancelled replay stops
/// within `CANCEL_POLL_INTERVAL` even when `delay` is long.
pub fn replay<T, F>(steps: &[T], delay: Duration, cancel: &CancelToken, mut on_step: F) -> PlaybackOutcome
    where F: FnMut(usize, &T)
{
    for (index, step) in steps.iter().enumerate() {
        if cancel.is_cancelled() {
            return PlaybackOutcome::Cancelled(StepsCount(index));
        }

        on_step(index, step);

        let is_last_step = index + 1 == steps.len();
        if !is_last_step && !pause(delay, cancel) {
            return PlaybackOutcome::Cancelled(StepsCount(index + 1));
        }
    }

    PlaybackOutcome::Completed(StepsCount(steps.len()))
}

/// Sleep for `delay` in short slices. False if the token was cancelled meanwhile.
fn pause(delay: Duration, cancel: &CancelToken) -> bool {
    let deadline = Instant::now() + delay;
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(cmp::min(deadline - now, CANCEL_POLL_INTERVAL));
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn replays_every_step_in_order() {
        let steps = [3, 1, 4, 1, 5];
        let mut seen = vec![];
        let outcome = replay(&steps, Duration::from_millis(0), &CancelToken::new(), |i, s| {
            seen.push((i, *s))
        });
        assert_eq!(outcome, PlaybackOutcome::Completed(StepsCount(5)));
        assert_eq!(seen, vec![(0, 3), (1, 1), (2, 4), (3, 1), (4, 5)]);
    }

    #[test]
    fn empty_sequence_completes() {
        let steps: [u8; 0] = [];
        let outcome = replay(&steps, Duration::from_millis(10), &CancelToken::new(), |_, _| {
            panic!("no steps to deliver")
        });
        assert_eq!(outcome.steps_delivered(), StepsCount(0));
    }

    #[test]
    fn cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let mut delivered = 0;
        let outcome = replay(&[1, 2, 3], Duration::from_millis(0), &token, |_, _| delivered += 1);
        assert_eq!(outcome, PlaybackOutcome::Cancelled(StepsCount(0)));
        assert_eq!(delivered, 0);
    }

    #[test]
    fn cancelled_part_way() {
        let token = CancelToken::new();
        let stopper = token.clone();
        let outcome = replay(&[10, 20, 30, 40, 50], Duration::from_millis(1), &token, |i, _| {
            if i == 2 {
                stopper.cancel();
            }
        });
        assert_eq!(outcome, PlaybackOutcome::Cancelled(StepsCount(3)));
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancelled_from_another_thread() {
        let token = CancelToken::new();
        let remote = token.clone();
        let steps = vec![0u32; 1000];

        let canceller = thread::spawn(move || remote.cancel());
        canceller.join().unwrap();

        let outcome = replay(&steps, Duration::from_millis(5), &token, |_, _| {});
        assert_eq!(outcome, PlaybackOutcome::Cancelled(StepsCount(0)));
    }

    #[test]
    fn cancelled_during_a_long_pause() {
        let token = CancelToken::new();
        let remote = token.clone();
        let began = Instant::now();

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            remote.cancel();
        });
        let outcome = replay(&[1, 2, 3], Duration::from_secs(30), &token, |_, _| {});
        canceller.join().unwrap();

        assert_eq!(outcome, PlaybackOutcome::Cancelled(StepsCount(1)));
        assert!(began.elapsed() < Duration::from_secs(10));
    }
}
