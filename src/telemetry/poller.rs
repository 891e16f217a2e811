use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use super::client::{FetchError, SampleSource};
use super::sample::Sample;

/// Outcome of one completed poll cycle, delivered in issue order.
pub enum PollUpdate {
    Sample(Sample),
    Failed(FetchError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PollerState {
    Idle,
    Running,
    /// Terminal; a stopped poller cannot be restarted.
    Stopped,
}

/// Drives the fetch cycle on a dedicated worker thread: one fetch
/// immediately on start, then one per interval. The worker is a single
/// sequential loop, so at most one request is in flight and completions
/// can never arrive out of order.
pub struct Poller {
    state: PollerState,
    stop: Arc<AtomicBool>,
    interval_ms: Arc<AtomicU64>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PollerState::Idle,
            stop: Arc::new(AtomicBool::new(false)),
            interval_ms: Arc::new(AtomicU64::new(interval.as_millis() as u64)),
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }

    /// Retunes the cycle length; the worker picks it up on its next wait.
    pub fn set_interval(&self, interval: Duration) {
        self.interval_ms
            .store(interval.as_millis() as u64, Ordering::Relaxed);
    }

    /// Spawns the worker and returns the completion channel. A poller that is
    /// already running, or was stopped, stays as it is and returns `None`.
    pub fn start<S>(&mut self, source: S) -> Option<mpsc::Receiver<PollUpdate>>
    where
        S: SampleSource + Send + 'static,
    {
        if self.state != PollerState::Idle {
            return None;
        }
        self.state = PollerState::Running;

        let (tx, rx) = mpsc::channel();
        let stop = Arc::clone(&self.stop);
        let interval_ms = Arc::clone(&self.interval_ms);
        thread::spawn(move || run(source, tx, stop, interval_ms));
        Some(rx)
    }

    /// Cancels future ticks. A fetch already issued completes on the worker
    /// and its result is discarded once the receiving side is gone.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.state = PollerState::Stopped;
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn run<S: SampleSource>(
    source: S,
    tx: mpsc::Sender<PollUpdate>,
    stop: Arc<AtomicBool>,
    interval_ms: Arc<AtomicU64>,
) {
    while !stop.load(Ordering::Relaxed) {
        let cycle_start = Instant::now();
        let update = match source.fetch() {
            Ok(sample) => PollUpdate::Sample(sample),
            Err(e) => PollUpdate::Failed(e),
        };
        if tx.send(update).is_err() {
            break;
        }

        // Wait out the rest of the cycle in short slices so stop() and
        // interval changes take effect promptly.
        loop {
            if stop.load(Ordering::Relaxed) {
                return;
            }
            let interval = Duration::from_millis(interval_ms.load(Ordering::Relaxed));
            let elapsed = cycle_start.elapsed();
            if elapsed >= interval {
                break;
            }
            thread::sleep((interval - elapsed).min(Duration::from_millis(50)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::sample::Axes;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn sample(rpm: f64) -> Sample {
        Sample {
            tds: 0.0,
            rpm,
            accel: Axes { x: 0.0, y: 0.0, z: 0.0 },
            gyro: Axes { x: 0.0, y: 0.0, z: 0.0 },
        }
    }

    fn fetch_err() -> FetchError {
        FetchError::Decode(std::io::Error::new(std::io::ErrorKind::Other, "scripted"))
    }

    /// Pops scripted outcomes; reports a decode failure once exhausted.
    struct Scripted(Mutex<VecDeque<Result<Sample, FetchError>>>);

    impl Scripted {
        fn new(outcomes: Vec<Result<Sample, FetchError>>) -> Self {
            Self(Mutex::new(outcomes.into()))
        }
    }

    impl SampleSource for Scripted {
        fn fetch(&self) -> Result<Sample, FetchError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(fetch_err()))
        }
    }

    fn recv_n(rx: &mpsc::Receiver<PollUpdate>, n: usize) -> Vec<PollUpdate> {
        (0..n)
            .map(|_| rx.recv_timeout(Duration::from_secs(2)).unwrap())
            .collect()
    }

    #[test]
    fn delivers_completions_in_issue_order() {
        let source = Scripted::new(vec![Ok(sample(1.0)), Ok(sample(2.0)), Ok(sample(3.0))]);
        let mut poller = Poller::new(Duration::from_millis(1));
        let rx = poller.start(source).unwrap();

        let rpms: Vec<f64> = recv_n(&rx, 3)
            .into_iter()
            .map(|u| match u {
                PollUpdate::Sample(s) => s.rpm,
                PollUpdate::Failed(e) => panic!("unexpected failure: {e}"),
            })
            .collect();
        assert_eq!(rpms, vec![1.0, 2.0, 3.0]);
        poller.stop();
    }

    #[test]
    fn failed_cycle_does_not_stop_the_loop() {
        let source = Scripted::new(vec![Ok(sample(1.0)), Err(fetch_err()), Ok(sample(2.0))]);
        let mut poller = Poller::new(Duration::from_millis(1));
        let rx = poller.start(source).unwrap();

        let updates = recv_n(&rx, 3);
        assert!(matches!(&updates[0], PollUpdate::Sample(s) if s.rpm == 1.0));
        assert!(matches!(&updates[1], PollUpdate::Failed(_)));
        assert!(matches!(&updates[2], PollUpdate::Sample(s) if s.rpm == 2.0));
        poller.stop();
    }

    #[test]
    fn stop_ends_the_stream() {
        let source = Scripted::new((0..1000).map(|_| Ok(sample(1.0))).collect());
        let mut poller = Poller::new(Duration::from_millis(1));
        let rx = poller.start(source).unwrap();

        let _ = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        poller.stop();
        assert_eq!(poller.state(), PollerState::Stopped);

        // Drain whatever was already sent; the worker must disconnect soon.
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(_) => assert!(Instant::now() < deadline, "worker kept producing after stop"),
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    assert!(Instant::now() < deadline, "worker never exited after stop")
                }
            }
        }
    }

    #[test]
    fn start_is_not_reentrant() {
        let mut poller = Poller::new(Duration::from_millis(1));
        let rx = poller.start(Scripted::new(vec![Ok(sample(1.0))]));
        assert!(rx.is_some());
        assert!(poller.start(Scripted::new(vec![])).is_none());
        assert_eq!(poller.state(), PollerState::Running);

        poller.stop();
        assert!(poller.start(Scripted::new(vec![])).is_none());
        assert_eq!(poller.state(), PollerState::Stopped);
    }
}
