use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A single armed timer. Disarming aborts the backing task, so a timer
/// that was cancelled can never run its callback.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Arms a timer that runs `callback` after `delay`. Must be called
    /// from within a tokio runtime.
    pub fn arm<F>(delay: Duration, callback: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback.await;
        });
        Self { task }
    }

    pub fn disarm(self) {
        self.task.abort();
    }
}

/// The four wall-clock timers of a round (warning and deadline for each
/// phase), disarmed as a unit on every phase transition. Only one
/// phase's pair is ever armed at a time.
#[derive(Debug, Default)]
pub struct PhaseTimerSet {
    play_warn: Option<TimerHandle>,
    play_deadline: Option<TimerHandle>,
    pick_warn: Option<TimerHandle>,
    pick_deadline: Option<TimerHandle>,
}

impl PhaseTimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_play(&mut self, warn: TimerHandle, deadline: TimerHandle) {
        self.disarm_all();
        self.play_warn = Some(warn);
        self.play_deadline = Some(deadline);
    }

    pub fn arm_pick(&mut self, warn: TimerHandle, deadline: TimerHandle) {
        self.disarm_all();
        self.pick_warn = Some(warn);
        self.pick_deadline = Some(deadline);
    }

    pub fn disarm_all(&mut self) {
        for handle in [
            self.play_warn.take(),
            self.play_deadline.take(),
            self.pick_warn.take(),
            self.pick_deadline.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.disarm();
        }
    }
}

impl Drop for PhaseTimerSet {
    fn drop(&mut self) {
        self.disarm_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn armed_timer_fires_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let _handle = TimerHandle::arm(Duration::from_secs(5), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_timer_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let mut set = PhaseTimerSet::new();
        set.arm_play(
            TimerHandle::arm(Duration::from_secs(2), async {}),
            TimerHandle::arm(Duration::from_secs(5), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        set.disarm_all();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_pair() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut set = PhaseTimerSet::new();

        let counter = Arc::clone(&fired);
        set.arm_play(
            TimerHandle::arm(Duration::from_secs(1), async {}),
            TimerHandle::arm(Duration::from_secs(2), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let counter = Arc::clone(&fired);
        set.arm_pick(
            TimerHandle::arm(Duration::from_secs(1), async {}),
            TimerHandle::arm(Duration::from_secs(3), async move {
                counter.fetch_add(10, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 10);
    }
}
