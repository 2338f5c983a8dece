//! Alarm flag and the background signaler that drives the buzzer from it.
//!
//! The poll path is the only writer of the [`AlarmFlag`]; the
//! [`AlarmSignaler`] task is the only reader. They never wait on each other.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ports::OutputPin;

/// Shared single-slot alarm level.
///
/// Clones share the same slot. Reads and writes are relaxed atomics: the flag
/// is a level, so a reader only ever needs some recent value, never a
/// sequence of edges.
#[derive(Debug, Clone, Default)]
pub struct AlarmFlag(Arc<AtomicBool>);

impl AlarmFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the level, returning the previous one.
    pub fn set(&self, raised: bool) -> bool {
        self.0.swap(raised, Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Re-check cadence of the signaler loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTiming {
    /// Sleep after driving the output high.
    pub active: Duration,
    /// Sleep after driving the output low.
    pub idle: Duration,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            active: Duration::from_millis(500),
            idle: Duration::from_millis(100),
        }
    }
}

impl SignalTiming {
    fn after(&self, raised: bool) -> Duration {
        if raised { self.active } else { self.idle }
    }
}

/// Background task mirroring the [`AlarmFlag`] onto a physical output.
///
/// The loop runs for the life of the process; it has no cancellation of its
/// own and stops only when the runtime shuts down or the handle is aborted.
pub struct AlarmSignaler<O> {
    flag: AlarmFlag,
    output: O,
    timing: SignalTiming,
}

impl<O: OutputPin + 'static> AlarmSignaler<O> {
    /// Spawn the signaler on the current tokio runtime.
    pub fn start(flag: AlarmFlag, output: O, timing: SignalTiming) -> JoinHandle<()> {
        let signaler = Self {
            flag,
            output,
            timing,
        };
        tokio::spawn(signaler.run())
    }

    async fn run(self) {
        tracing::debug!(?self.timing, "alarm signaler started");
        loop {
            let raised = self.iterate();
            tokio::time::sleep(self.timing.after(raised)).await;
        }
    }

    /// Drive the output once from the current flag. Returns the level read.
    fn iterate(&self) -> bool {
        let raised = self.flag.is_raised();
        if let Err(err) = self.output.write(raised) {
            tracing::warn!(%err, raised, "failed to drive alarm output, retrying next cycle");
        }
        raised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;

    use coopctl_domain::error::CoopError;

    #[derive(Default)]
    struct RecordingPin {
        levels: Mutex<Vec<bool>>,
    }

    impl RecordingPin {
        fn last(&self) -> Option<bool> {
            self.levels.lock().unwrap().last().copied()
        }

        fn count(&self) -> usize {
            self.levels.lock().unwrap().len()
        }
    }

    impl OutputPin for RecordingPin {
        fn write(&self, level: bool) -> Result<(), CoopError> {
            self.levels.lock().unwrap().push(level);
            Ok(())
        }
    }

    struct FailingPin;

    impl OutputPin for FailingPin {
        fn write(&self, _level: bool) -> Result<(), CoopError> {
            Err(CoopError::Output("bus fault".into()))
        }
    }

    fn fast() -> SignalTiming {
        SignalTiming {
            active: Duration::from_millis(20),
            idle: Duration::from_millis(5),
        }
    }

    #[test]
    fn should_default_to_lowered() {
        assert!(!AlarmFlag::new().is_raised());
    }

    #[test]
    fn should_share_state_between_clones() {
        let flag = AlarmFlag::new();
        let reader = flag.clone();
        assert!(!flag.set(true));
        assert!(reader.is_raised());
        assert!(flag.set(false));
        assert!(!reader.is_raised());
    }

    #[test]
    fn should_only_observe_booleans_under_concurrent_access() {
        let flag = AlarmFlag::new();
        let writer = flag.clone();

        let handle = thread::spawn(move || {
            for i in 0..1000 {
                writer.set(i % 2 == 0);
            }
        });

        let (mut raised, mut lowered) = (0, 0);
        for _ in 0..1000 {
            if flag.is_raised() {
                raised += 1;
            } else {
                lowered += 1;
            }
        }
        handle.join().unwrap();

        assert_eq!(raised + lowered, 1000);
        // Last write was i = 999, which lowers the flag.
        assert!(!flag.is_raised());
    }

    #[test]
    fn should_pick_interval_from_level() {
        let timing = SignalTiming::default();
        assert_eq!(timing.after(true), Duration::from_millis(500));
        assert_eq!(timing.after(false), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn should_mirror_flag_onto_output() {
        let flag = AlarmFlag::new();
        let pin = Arc::new(RecordingPin::default());
        let handle = AlarmSignaler::start(flag.clone(), Arc::clone(&pin), fast());

        tokio::time::sleep(Duration::from_millis(12)).await;
        assert!(pin.count() >= 2);
        assert_eq!(pin.last(), Some(false));

        // Picked up by the next idle check, then held for the active interval.
        flag.set(true);
        tokio::time::sleep(Duration::from_millis(8)).await;
        assert_eq!(pin.last(), Some(true));

        flag.set(false);
        tokio::time::sleep(Duration::from_millis(22)).await;
        assert_eq!(pin.last(), Some(false));

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_running_when_output_fails() {
        let handle = AlarmSignaler::start(AlarmFlag::new(), FailingPin, fast());
        tokio::time::sleep(Duration::from_millis(32)).await;
        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn should_recheck_faster_while_idle() {
        let idle_pin = Arc::new(RecordingPin::default());
        let active_pin = Arc::new(RecordingPin::default());
        let raised = AlarmFlag::new();
        raised.set(true);

        let idle = AlarmSignaler::start(AlarmFlag::new(), Arc::clone(&idle_pin), fast());
        let active = AlarmSignaler::start(raised, Arc::clone(&active_pin), fast());
        tokio::time::sleep(Duration::from_millis(102)).await;
        idle.abort();
        active.abort();

        // Every 5ms versus every 20ms over the same window.
        let (idle, active) = (idle_pin.count(), active_pin.count());
        assert!(active <= 6, "active writes: {active}");
        assert!(idle > 2 * active, "idle writes: {idle}, active writes: {active}");
        assert_eq!(active_pin.last(), Some(true));
    }
}
