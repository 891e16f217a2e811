pub mod client;
pub mod history;
pub mod location;
pub mod poller;
pub mod sample;

use std::sync::mpsc;
use std::time::Duration;

use crate::activity::ActivityLog;
use client::{DeviceClient, SampleSource};
use history::{Capacity, FieldSet, History};
use location::{DeviceLocation, LocationSource};
use poller::{PollUpdate, Poller};
use sample::Sample;

#[derive(Clone, Debug, PartialEq)]
pub enum LinkState {
    /// No completed poll yet.
    Connecting,
    Online,
    /// Last poll failed; readings on screen are stale.
    Degraded(String),
}

/// Owns everything the UI reads: the current sample, the rolling history,
/// link state, counters, and the device location. All mutation happens on
/// the UI thread via [`poll`](Self::poll).
pub struct TelemetryCollector {
    endpoint: String,
    pub history: History,
    pub current: Option<Sample>,
    pub link: LinkState,
    pub poll_count: u64,
    pub error_count: u64,
    pub location: DeviceLocation,
    poller: Poller,
    updates: Option<mpsc::Receiver<PollUpdate>>,
    location_rx: Option<mpsc::Receiver<DeviceLocation>>,
}

impl TelemetryCollector {
    pub fn new(
        endpoint: String,
        interval: Duration,
        capacity: Capacity,
        fields: FieldSet,
    ) -> Self {
        Self {
            endpoint,
            history: History::new(capacity, fields),
            current: None,
            link: LinkState::Connecting,
            poll_count: 0,
            error_count: 0,
            location: DeviceLocation::fallback(),
            poller: Poller::new(interval),
            updates: None,
            location_rx: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn poll_interval(&self) -> Duration {
        self.poller.interval()
    }

    pub fn set_poll_interval(&self, interval: Duration) {
        self.poller.set_interval(interval);
    }

    /// Starts polling the real device and, unless opted out, the one-shot
    /// location lookup.
    pub fn start(&mut self, geolocate: bool, log: &mut ActivityLog) {
        let client = DeviceClient::new(&self.endpoint);
        self.start_with(client, log);
        if geolocate {
            self.location_rx = Some(location::resolve());
        }
    }

    /// [`start`](Self::start) against an injected source; no location lookup.
    pub fn start_with<S>(&mut self, source: S, log: &mut ActivityLog)
    where
        S: SampleSource + Send + 'static,
    {
        match self.poller.start(source) {
            Some(rx) => {
                self.updates = Some(rx);
                log.info(format!(
                    "polling {} every {}ms",
                    self.endpoint,
                    self.poller.interval().as_millis()
                ));
            }
            None => log.warn("poll loop already started"),
        }
    }

    pub fn stop(&mut self) {
        self.poller.stop();
    }

    /// Drains completed poll cycles and the location lookup. Successes update
    /// the current sample and the history; failures only touch the link state
    /// and counters.
    pub fn poll(&mut self, log: &mut ActivityLog) {
        let updates: Vec<PollUpdate> = match &self.updates {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for update in updates {
            match update {
                PollUpdate::Sample(sample) => {
                    if self.poll_count == 0 {
                        log.info(format!("device online at {}", self.endpoint));
                    }
                    self.current = Some(sample);
                    self.history.append(&sample);
                    self.poll_count += 1;
                    self.link = LinkState::Online;
                }
                PollUpdate::Failed(e) => {
                    self.error_count += 1;
                    self.link = LinkState::Degraded(e.to_string());
                    log.error(format!("poll failed: {e}"));
                }
            }
        }

        if let Some(rx) = self.location_rx.take() {
            match rx.try_recv() {
                Ok(loc) => {
                    self.location = loc;
                    match loc.source {
                        LocationSource::Resolved => log.info(format!(
                            "device location resolved: {:.4}, {:.4}",
                            loc.lat, loc.lng
                        )),
                        LocationSource::Fallback => {
                            log.warn("geolocation unavailable, showing default location")
                        }
                    }
                }
                Err(mpsc::TryRecvError::Empty) => self.location_rx = Some(rx),
                Err(mpsc::TryRecvError::Disconnected) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::client::FetchError;
    use crate::telemetry::sample::Axes;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Instant;

    fn sample(rpm: f64) -> Sample {
        Sample {
            tds: 5.0,
            rpm,
            accel: Axes { x: 0.0, y: 0.0, z: 0.0 },
            gyro: Axes { x: 0.0, y: 0.0, z: 0.0 },
        }
    }

    struct Scripted(Mutex<VecDeque<Result<Sample, FetchError>>>);

    impl SampleSource for Scripted {
        fn fetch(&self) -> Result<Sample, FetchError> {
            self.0.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(FetchError::Decode(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "script exhausted",
                )))
            })
        }
    }

    fn collector() -> TelemetryCollector {
        TelemetryCollector::new(
            "http://10.0.0.39".into(),
            Duration::from_millis(1),
            Capacity::Bounded(20),
            FieldSet::Extended,
        )
    }

    fn drain_until(
        collector: &mut TelemetryCollector,
        log: &mut ActivityLog,
        cond: impl Fn(&TelemetryCollector) -> bool,
    ) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !cond(collector) {
            assert!(Instant::now() < deadline, "condition never reached");
            collector.poll(log);
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn successful_polls_land_in_order() {
        let mut log = ActivityLog::new();
        let mut c = collector();
        let script = vec![Ok(sample(1.0)), Ok(sample(2.0)), Ok(sample(3.0))];
        c.start_with(Scripted(Mutex::new(script.into())), &mut log);

        drain_until(&mut c, &mut log, |c| c.poll_count == 3);
        let rpms: Vec<f64> = c.history.entries().map(|e| e.rpm).collect();
        assert_eq!(rpms, vec![1.0, 2.0, 3.0]);
        assert_eq!(c.current.map(|s| s.rpm), Some(3.0));
        assert_eq!(c.link, LinkState::Online);
        c.stop();
    }

    #[test]
    fn failed_poll_leaves_buffer_and_current_unchanged() {
        let mut log = ActivityLog::new();
        let mut c = collector();
        // One good cycle, then failures forever.
        c.start_with(Scripted(Mutex::new(vec![Ok(sample(7.0))].into())), &mut log);

        drain_until(&mut c, &mut log, |c| c.poll_count == 1 && c.error_count >= 2);
        assert_eq!(c.history.len(), 1);
        assert_eq!(c.current.map(|s| s.rpm), Some(7.0));
        assert!(matches!(c.link, LinkState::Degraded(_)));
        c.stop();
    }

    #[test]
    fn starts_from_empty_and_connecting() {
        let c = collector();
        assert!(c.history.is_empty());
        assert_eq!(c.current, None);
        assert_eq!(c.link, LinkState::Connecting);
        assert_eq!(c.location, DeviceLocation::fallback());
    }
}
