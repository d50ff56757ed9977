//! Shared signal cells
//!
//! [`EncoderSignals`] is the only state shared between the interrupt
//! handler (producer) and the consumer loop. Each cell has exactly one
//! producer. The direction cell is drained with a single atomic
//! read-and-reset, so an edge arriving mid-drain is either returned by
//! this drain or left for the next one, never lost in between.
//!
//! The cells are `const`-constructible so a firmware can keep them in a
//! `static` reachable from both contexts:
//!
//! ```ignore
//! static SIGNALS: EncoderSignals = EncoderSignals::new();
//! ```

use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;
use portable_atomic::{AtomicBool, AtomicI16, Ordering};

use crate::config::Mailbox;
use crate::decode::Direction;

/// Direction and button cells for one encoder
pub struct EncoderSignals {
    /// Undrained steps: -1/0/+1 for [`Mailbox::Overwrite`], a count otherwise
    direction: AtomicI16,
    /// Last sampled button state
    button: AtomicBool,
    /// Consumer parked in [`wait_direction`](Self::wait_direction)
    waker: AtomicWaker,
}

impl Default for EncoderSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderSignals {
    /// Create cleared cells
    pub const fn new() -> Self {
        Self {
            direction: AtomicI16::new(0),
            button: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Producer side (interrupt context)
    // -----------------------------------------------------------------------

    /// Write a decoded direction
    pub(crate) fn publish(&self, direction: Direction, mailbox: Mailbox) {
        let delta = i16::from(direction.delta());

        match mailbox {
            Mailbox::Overwrite => self.direction.store(delta, Ordering::Release),
            Mailbox::Accumulate => {
                if delta == 0 {
                    return;
                }
                // The closure never returns None, so this cannot fail
                let _ = self
                    .direction
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |steps| {
                        Some(steps.saturating_add(delta))
                    });
            }
        }

        if direction.is_moving() {
            self.waker.wake();
        }
    }

    /// Write the button level
    pub(crate) fn set_button(&self, pressed: bool) {
        self.button.store(pressed, Ordering::Release);
    }

    // -----------------------------------------------------------------------
    // Consumer side
    // -----------------------------------------------------------------------

    /// Read and reset the direction
    ///
    /// With an accumulating mailbox one step is taken per call and the
    /// rest stays pending.
    pub fn poll_direction(&self) -> Direction {
        let previous = match self.direction.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |steps| Some(steps - steps.signum()),
        ) {
            Ok(steps) | Err(steps) => steps,
        };
        Direction::from_delta(previous)
    }

    /// Read and reset the full pending step count
    pub fn take_steps(&self) -> i16 {
        self.direction.swap(0, Ordering::AcqRel)
    }

    /// Pending step count, without resetting it
    pub fn pending_steps(&self) -> i16 {
        self.direction.load(Ordering::Acquire)
    }

    /// Button state (level, not reset by reading)
    pub fn poll_button(&self) -> bool {
        self.button.load(Ordering::Acquire)
    }

    /// Wait for the next rotation and drain it
    ///
    /// Resolves immediately if a step is already pending.
    pub async fn wait_direction(&self) -> Direction {
        poll_fn(|cx| {
            self.waker.register(cx.waker());
            match self.poll_direction() {
                Direction::Stationary => Poll::Pending,
                direction => Poll::Ready(direction),
            }
        })
        .await
    }

    /// Reset both cells
    pub fn clear(&self) {
        self.direction.store(0, Ordering::Release);
        self.button.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::future::Future;
    use core::pin::pin;
    use core::task::{Context, Waker};
    use std::sync::Arc;
    use std::task::Wake;

    use embassy_futures::block_on;

    struct NoopWake;

    impl Wake for NoopWake {
        fn wake(self: Arc<Self>) {}
    }

    #[test]
    fn test_poll_resets() {
        let signals = EncoderSignals::new();
        signals.publish(Direction::Clockwise, Mailbox::Overwrite);

        assert_eq!(signals.poll_direction(), Direction::Clockwise);
        assert_eq!(signals.poll_direction(), Direction::Stationary);
        assert_eq!(signals.poll_direction(), Direction::Stationary);
    }

    #[test]
    fn test_overwrite_loses_undrained_step() {
        let signals = EncoderSignals::new();
        signals.publish(Direction::Clockwise, Mailbox::Overwrite);
        signals.publish(Direction::CounterClockwise, Mailbox::Overwrite);

        assert_eq!(signals.poll_direction(), Direction::CounterClockwise);
        assert_eq!(signals.poll_direction(), Direction::Stationary);
    }

    #[test]
    fn test_overwrite_with_stationary_clears() {
        let signals = EncoderSignals::new();
        signals.publish(Direction::Clockwise, Mailbox::Overwrite);
        signals.publish(Direction::Stationary, Mailbox::Overwrite);

        assert_eq!(signals.poll_direction(), Direction::Stationary);
    }

    #[test]
    fn test_accumulate_counts() {
        let signals = EncoderSignals::new();
        for _ in 0..3 {
            signals.publish(Direction::Clockwise, Mailbox::Accumulate);
        }
        signals.publish(Direction::Stationary, Mailbox::Accumulate);
        signals.publish(Direction::CounterClockwise, Mailbox::Accumulate);

        assert_eq!(signals.pending_steps(), 2);
        assert_eq!(signals.poll_direction(), Direction::Clockwise);
        assert_eq!(signals.take_steps(), 1);
        assert_eq!(signals.take_steps(), 0);
    }

    #[test]
    fn test_accumulate_drains_one_step_at_a_time() {
        let signals = EncoderSignals::new();
        signals.publish(Direction::CounterClockwise, Mailbox::Accumulate);
        signals.publish(Direction::CounterClockwise, Mailbox::Accumulate);

        assert_eq!(signals.poll_direction(), Direction::CounterClockwise);
        assert_eq!(signals.poll_direction(), Direction::CounterClockwise);
        assert_eq!(signals.poll_direction(), Direction::Stationary);
    }

    #[test]
    fn test_accumulate_saturates() {
        let signals = EncoderSignals::new();
        signals.direction.store(i16::MAX, Ordering::Relaxed);
        signals.publish(Direction::Clockwise, Mailbox::Accumulate);

        assert_eq!(signals.pending_steps(), i16::MAX);
    }

    #[test]
    fn test_button_is_level() {
        let signals = EncoderSignals::new();
        assert!(!signals.poll_button());

        signals.set_button(true);
        assert!(signals.poll_button());
        assert!(signals.poll_button());

        signals.set_button(false);
        assert!(!signals.poll_button());
    }

    #[test]
    fn test_clear() {
        let signals = EncoderSignals::new();
        signals.publish(Direction::Clockwise, Mailbox::Overwrite);
        signals.set_button(true);

        signals.clear();
        assert_eq!(signals.pending_steps(), 0);
        assert!(!signals.poll_button());
    }

    #[test]
    fn test_wait_returns_pending_step() {
        let signals = EncoderSignals::new();
        signals.publish(Direction::CounterClockwise, Mailbox::Overwrite);

        assert_eq!(block_on(signals.wait_direction()), Direction::CounterClockwise);
        assert_eq!(signals.poll_direction(), Direction::Stationary);
    }

    #[test]
    fn test_wait_parks_until_published() {
        let signals = EncoderSignals::new();
        let waker = Waker::from(Arc::new(NoopWake));
        let mut cx = Context::from_waker(&waker);
        let mut wait = pin!(signals.wait_direction());

        assert!(wait.as_mut().poll(&mut cx).is_pending());

        // A stationary write does not complete the wait
        signals.publish(Direction::Stationary, Mailbox::Overwrite);
        assert!(wait.as_mut().poll(&mut cx).is_pending());

        signals.publish(Direction::Clockwise, Mailbox::Overwrite);
        assert_eq!(wait.as_mut().poll(&mut cx), Poll::Ready(Direction::Clockwise));
    }
}
