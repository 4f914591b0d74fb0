//! Progress notifications.
//!
//! The scheduler reports to a [`ReconstructionObserver`]. Workers call
//! [`ReconstructionObserver::on_progress_delta`] from their own threads, so
//! observers must be `Send + Sync` and must not block.
//!
//! For UI-style consumers, [`progress_channel`] pairs a [`ChannelObserver`]
//! (cloneable producer, one `mpsc::Sender` per handle) with a
//! [`ProgressReceiver`] that folds raw per-worker deltas into a monotonic
//! percentage on the consuming thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// Receives reconstruction lifecycle and progress notifications.
///
/// All methods default to no-ops.
pub trait ReconstructionObserver: Send + Sync {
    /// Called once, before any worker starts.
    fn on_reconstruction_started(&self) {}

    /// Called by worker `worker` after each finished slice with `1 / T`,
    /// where `T` is the number of reconstructable slices.
    fn on_progress_delta(&self, worker: usize, delta: f32) {
        let _ = (worker, delta);
    }

    /// Cumulative progress in `[0, 1]`.
    fn on_progress(&self, fraction: f32) {
        let _ = fraction;
    }

    /// Called once, after the merged mesh is complete.
    fn on_reconstruction_finished(&self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ReconstructionObserver for NoopObserver {}

/// A single notification, as carried over a progress channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// Reconstruction started.
    Started,
    /// Raw per-worker progress delta.
    Delta {
        /// Index of the reporting worker.
        worker: usize,
        /// Fraction of the total work just completed.
        delta: f32,
    },
    /// Cumulative progress.
    Progress(f32),
    /// Reconstruction finished.
    Finished,
}

/// Observer that forwards every notification into an mpsc channel.
///
/// Sends never block; if the receiver is gone the event is dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<ProgressEvent>,
}

impl ChannelObserver {
    /// Wrap an existing sender.
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }

    #[inline]
    fn send(&self, event: ProgressEvent) {
        let _ = self.sender.send(event);
    }
}

impl ReconstructionObserver for ChannelObserver {
    fn on_reconstruction_started(&self) {
        self.send(ProgressEvent::Started);
    }

    fn on_progress_delta(&self, worker: usize, delta: f32) {
        self.send(ProgressEvent::Delta { worker, delta });
    }

    fn on_progress(&self, fraction: f32) {
        self.send(ProgressEvent::Progress(fraction));
    }

    fn on_reconstruction_finished(&self) {
        self.send(ProgressEvent::Finished);
    }
}

/// Create a connected observer/receiver pair.
pub fn progress_channel() -> (ChannelObserver, ProgressReceiver) {
    let (sender, receiver) = mpsc::channel();
    (ChannelObserver::new(sender), ProgressReceiver::new(receiver))
}

const ROUNDING_SLACK: f32 = 1e-4;

/// Folds raw deltas into cumulative progress that only advances in whole
/// percent steps.
///
/// The cumulative fraction is clamped to `[0, 1]` and never decreases.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressAggregator {
    accumulated: f32,
    reported_percent: u32,
}

impl ProgressAggregator {
    /// Start at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a delta. Returns the new cumulative fraction when it crosses at
    /// least one whole percent.
    pub fn add(&mut self, delta: f32) -> Option<f32> {
        // NaN and negative deltas are ignored.
        self.accumulated = (self.accumulated + delta.max(0.0)).min(1.0);
        self.advance()
    }

    /// Raise the cumulative fraction to at least `fraction`.
    pub fn set(&mut self, fraction: f32) -> Option<f32> {
        if fraction > self.accumulated {
            self.accumulated = fraction.min(1.0);
        }
        self.advance()
    }

    /// Exact cumulative fraction.
    #[inline]
    pub fn fraction(&self) -> f32 {
        self.accumulated
    }

    /// Last reported whole percent.
    #[inline]
    pub fn percent(&self) -> u32 {
        self.reported_percent
    }

    fn advance(&mut self) -> Option<f32> {
        // Summing 1/T floats T times can land just below 1.0.
        let percent = (((self.accumulated + ROUNDING_SLACK) * 100.0).floor() as u32).min(100);
        if percent > self.reported_percent {
            self.reported_percent = percent;
            Some(percent as f32 / 100.0)
        } else {
            None
        }
    }
}

/// Consuming end of a [`progress_channel`].
#[derive(Debug)]
pub struct ProgressReceiver {
    receiver: Receiver<ProgressEvent>,
    aggregator: ProgressAggregator,
}

impl ProgressReceiver {
    /// Wrap an existing receiver.
    pub fn new(receiver: Receiver<ProgressEvent>) -> Self {
        Self {
            receiver,
            aggregator: ProgressAggregator::new(),
        }
    }

    /// Block for the next raw event. `None` once every sender is dropped.
    pub fn recv(&self) -> Option<ProgressEvent> {
        self.receiver.recv().ok()
    }

    /// Block for at most `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ProgressEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Drain pending events without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = ProgressEvent> + '_ {
        self.receiver.try_iter()
    }

    /// Cumulative progress seen so far by [`Self::forward_to`].
    pub fn aggregator(&self) -> &ProgressAggregator {
        &self.aggregator
    }

    /// Replay events to `observer` until `Finished` or disconnect.
    ///
    /// Raw deltas are coalesced: `observer` receives
    /// [`ReconstructionObserver::on_progress`] only when progress crosses a
    /// whole percent, never `on_progress_delta`. Returns the final cumulative
    /// fraction.
    pub fn forward_to<O>(&mut self, observer: &O) -> f32
    where
        O: ReconstructionObserver + ?Sized,
    {
        while let Ok(event) = self.receiver.recv() {
            match event {
                ProgressEvent::Started => observer.on_reconstruction_started(),
                ProgressEvent::Delta { delta, .. } => {
                    if let Some(fraction) = self.aggregator.add(delta) {
                        observer.on_progress(fraction);
                    }
                }
                ProgressEvent::Progress(fraction) => {
                    if let Some(fraction) = self.aggregator.set(fraction) {
                        observer.on_progress(fraction);
                    }
                }
                ProgressEvent::Finished => {
                    observer.on_reconstruction_finished();
                    break;
                }
            }
        }
        self.aggregator.fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl ReconstructionObserver for Recorder {
        fn on_reconstruction_started(&self) {
            self.events.lock().unwrap().push(ProgressEvent::Started);
        }

        fn on_progress(&self, fraction: f32) {
            self.events.lock().unwrap().push(ProgressEvent::Progress(fraction));
        }

        fn on_reconstruction_finished(&self) {
            self.events.lock().unwrap().push(ProgressEvent::Finished);
        }
    }

    #[test]
    fn test_aggregator_coalesces_to_whole_percent() {
        let mut agg = ProgressAggregator::new();
        assert_eq!(agg.add(0.004), None);
        assert_eq!(agg.add(0.004), None);
        assert_eq!(agg.add(0.004), Some(0.01));
        assert_eq!(agg.percent(), 1);
        assert_eq!(agg.add(0.5), Some(0.51));
    }

    #[test]
    fn test_aggregator_reaches_one_after_many_small_deltas() {
        let mut agg = ProgressAggregator::new();
        let total = 511;
        let mut last = None;
        for _ in 0..total {
            if let Some(f) = agg.add(1.0 / total as f32) {
                last = Some(f);
            }
        }
        assert_eq!(last, Some(1.0));
        assert_eq!(agg.percent(), 100);
    }

    #[test]
    fn test_aggregator_is_monotonic_and_clamped() {
        let mut agg = ProgressAggregator::new();
        agg.set(0.7);
        assert_eq!(agg.set(0.2), None);
        assert_eq!(agg.add(-0.5), None);
        assert_eq!(agg.add(f32::NAN), None);
        assert!((agg.fraction() - 0.7).abs() < 1e-6);
        agg.add(3.0);
        assert_eq!(agg.fraction(), 1.0);
        assert_eq!(agg.percent(), 100);
    }

    #[test]
    fn test_channel_observer_forwards_events() {
        let (observer, receiver) = progress_channel();
        observer.on_reconstruction_started();
        observer.on_progress_delta(3, 0.25);
        observer.on_progress(1.0);
        observer.on_reconstruction_finished();

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(
            events,
            vec![
                ProgressEvent::Started,
                ProgressEvent::Delta {
                    worker: 3,
                    delta: 0.25
                },
                ProgressEvent::Progress(1.0),
                ProgressEvent::Finished,
            ]
        );
    }

    #[test]
    fn test_send_after_receiver_dropped_is_ignored() {
        let (observer, receiver) = progress_channel();
        drop(receiver);
        observer.on_progress_delta(0, 0.5);
        observer.on_reconstruction_finished();
    }

    #[test]
    fn test_forward_to_replays_coalesced_progress() {
        let (observer, mut receiver) = progress_channel();
        observer.on_reconstruction_started();
        for worker in 0..4 {
            observer.on_progress_delta(worker, 0.125);
            observer.on_progress_delta(worker, 0.125);
        }
        observer.on_progress(1.0);
        observer.on_reconstruction_finished();

        let recorder = Recorder::default();
        let fraction = receiver.forward_to(&recorder);
        assert_eq!(fraction, 1.0);

        let events = recorder.events.into_inner().unwrap();
        assert_eq!(events.first(), Some(&ProgressEvent::Started));
        assert_eq!(events.last(), Some(&ProgressEvent::Finished));
        // Eight whole-percent steps of 12.5% each; the final 1.0 adds nothing.
        let progress: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Progress(f) => Some(*f),
                _ => None,
            })
            .collect();
        assert_eq!(progress.len(), 8);
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(progress.last(), Some(&1.0));
    }

    #[test]
    fn test_forward_to_stops_on_disconnect() {
        let (observer, mut receiver) = progress_channel();
        observer.on_progress_delta(0, 0.3);
        drop(observer);
        let fraction = receiver.forward_to(&NoopObserver);
        assert!((fraction - 0.3).abs() < 1e-6);
    }
}
