//! Concurrency tests for ctsurf.
//!
//! These tests verify that parallel reconstruction is deterministic and that
//! progress notifications arrive intact from many worker threads.

use ctsurf::{
    progress_channel, MarchingCubes, Mesh, ProgressEvent, ReconstructionConfig,
    ReconstructionObserver, TissuePreset, VolumeGrid,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

// =============================================================================
// Test Volume Factories
// =============================================================================

/// Two overlapping dense blobs in air, roughly CT-like.
fn create_phantom(dim: usize) -> VolumeGrid {
    let c = (dim - 1) as f32 * 0.5;
    let r = dim as f32 * 0.3;
    VolumeGrid::from_fn((dim, dim, dim), [0.8, 0.8, 1.2], |i, j, k| {
        let (x, y, z) = (i as f32 - c, j as f32 - c, k as f32 - c);
        let a = ((x - 2.0).powi(2) + y * y + z * z).sqrt();
        let b = ((x + 3.0).powi(2) + (y - 1.0).powi(2) + z * z).sqrt();
        if a < r {
            400
        } else if b < r * 0.7 {
            60
        } else {
            -1000
        }
    })
    .unwrap()
}

fn run(volume: &VolumeGrid, iso: i16, workers: usize) -> Mesh {
    MarchingCubes::new(ReconstructionConfig::new(iso).with_max_workers(workers))
        .unwrap()
        .reconstruct(volume)
        .unwrap()
}

// =============================================================================
// Recording Observer
// =============================================================================

#[derive(Default)]
struct CountingObserver {
    started: AtomicUsize,
    finished: AtomicUsize,
    deltas: Mutex<Vec<(usize, f32)>>,
    threads: Mutex<HashSet<thread::ThreadId>>,
    final_progress: Mutex<Option<f32>>,
}

impl ReconstructionObserver for CountingObserver {
    fn on_reconstruction_started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_progress_delta(&self, worker: usize, delta: f32) {
        self.deltas.lock().unwrap().push((worker, delta));
        self.threads.lock().unwrap().insert(thread::current().id());
    }

    fn on_progress(&self, fraction: f32) {
        *self.final_progress.lock().unwrap() = Some(fraction);
    }

    fn on_reconstruction_finished(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_runs_are_bit_identical() {
    let volume = create_phantom(32);
    let reference = run(&volume, TissuePreset::Bone.iso_value(), 8);
    assert!(reference.triangle_count() > 100);

    for _ in 0..5 {
        let mesh = run(&volume, TissuePreset::Bone.iso_value(), 8);
        assert_eq!(mesh, reference);
    }
}

#[test]
fn test_worker_counts_agree() {
    let volume = create_phantom(24);
    let reference = run(&volume, TissuePreset::SoftTissue.iso_value(), 1);
    for workers in [2, 3, 7, 20, 40] {
        assert_eq!(run(&volume, TissuePreset::SoftTissue.iso_value(), workers), reference);
    }
}

#[test]
fn test_shared_reconstructor_across_threads() {
    let volume = Arc::new(create_phantom(20));
    let mc = Arc::new(
        MarchingCubes::new(ReconstructionConfig::new(TissuePreset::Bone.iso_value()).with_max_workers(4))
            .unwrap(),
    );
    let reference = mc.reconstruct(volume.as_ref()).unwrap();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let volume = Arc::clone(&volume);
            let mc = Arc::clone(&mc);
            thread::spawn(move || mc.reconstruct(volume.as_ref()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}

// =============================================================================
// Progress
// =============================================================================

#[test]
fn test_progress_from_all_workers() {
    let volume = create_phantom(33);
    let workers = 8;
    let mc = MarchingCubes::new(ReconstructionConfig::new(0).with_max_workers(workers)).unwrap();
    let observer = CountingObserver::default();
    mc.reconstruct_with_observer(&volume, &observer).unwrap();

    assert_eq!(observer.started.load(Ordering::SeqCst), 1);
    assert_eq!(observer.finished.load(Ordering::SeqCst), 1);
    assert_eq!(*observer.final_progress.lock().unwrap(), Some(1.0));

    // 32 slices over 8 workers: four deltas of 1/32 each.
    let deltas = observer.deltas.lock().unwrap();
    assert_eq!(deltas.len(), 32);
    for worker in 0..workers {
        assert_eq!(deltas.iter().filter(|(w, _)| *w == worker).count(), 4);
    }
    let sum: f32 = deltas.iter().map(|(_, d)| d).sum();
    assert!((sum - 1.0).abs() < 1e-4, "sum {}", sum);

    // Deltas arrive on pool threads, not the caller.
    let threads = observer.threads.lock().unwrap();
    assert!(!threads.contains(&thread::current().id()));
}

#[test]
fn test_progress_channel_with_consumer_thread() {
    let volume = create_phantom(40);
    let mc = MarchingCubes::new(ReconstructionConfig::new(0).with_max_workers(6)).unwrap();
    let (observer, mut receiver) = progress_channel();

    let ui = CountingObserver::default();
    let (mesh, fraction) = thread::scope(|s| {
        let consumer = s.spawn(|| receiver.forward_to(&ui));
        let mesh = mc.reconstruct_with_observer(&volume, &observer).unwrap();
        drop(observer);
        (mesh, consumer.join().unwrap())
    });

    assert!(!mesh.is_empty());
    assert_eq!(fraction, 1.0);
    assert_eq!(ui.started.load(Ordering::SeqCst), 1);
    assert_eq!(ui.finished.load(Ordering::SeqCst), 1);
    assert_eq!(*ui.final_progress.lock().unwrap(), Some(1.0));
    // Coalesced replay never forwards raw deltas.
    assert!(ui.deltas.lock().unwrap().is_empty());
}

#[test]
fn test_raw_events_are_ordered_around_deltas() {
    let volume = create_phantom(16);
    let mc = MarchingCubes::new(ReconstructionConfig::new(0).with_max_workers(5)).unwrap();
    let (observer, receiver) = progress_channel();
    mc.reconstruct_with_observer(&volume, &observer).unwrap();
    drop(observer);

    let events: Vec<ProgressEvent> = receiver.try_iter().collect();
    let n = events.len();
    assert_eq!(n, 15 + 3);
    assert_eq!(events[0], ProgressEvent::Started);
    assert!(events[1..n - 2]
        .iter()
        .all(|e| matches!(e, ProgressEvent::Delta { .. })));
    assert_eq!(events[n - 2], ProgressEvent::Progress(1.0));
    assert_eq!(events[n - 1], ProgressEvent::Finished);
}
