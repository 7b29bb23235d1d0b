//! Monte-Carlo volume estimation and the per-shape volume cache.
//!
//! [`integrate`] samples points uniformly inside a shape's bounding box
//! in fixed-size batches and tests each with
//! [`Shape::contains_point`]. After every merged batch the running
//! estimate `box_volume * hits / samples` is compared with the previous
//! one; integration stops once the relative change drops below
//! [`IntegratorConfig::threshold`] (after at least `min_samples`
//! samples) or the sample budget runs out.
//!
//! Batches may be sampled on several worker threads. Each batch draws
//! from its own ChaCha8 stream (`seed`, stream = batch index) and the
//! coordinator merges batches strictly in index order, so the result is
//! identical for any worker count.

use crate::bounds::BoundingBox;
use crate::shape::Shape;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rdme_core::GeometryError;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

// ── IntegratorConfig ───────────────────────────────────────────────

/// Configuration for Monte-Carlo volume integration.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegratorConfig {
    /// Relative change between successive merged batches below which the
    /// estimate is considered converged. Default: 1e-6.
    pub threshold: f64,
    /// Sample points per batch. Default: 16_384.
    pub batch_size: u64,
    /// Samples that must be merged before convergence may be declared.
    /// Default: 65_536.
    pub min_samples: u64,
    /// Sample budget; reaching it without converging yields
    /// [`Convergence::BudgetExhausted`]. Default: 2^28.
    pub max_samples: u64,
    /// Base seed for the per-batch RNG streams. Default: 0.
    pub seed: u64,
    /// Sampling threads. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 16]`).
    pub workers: Option<usize>,
}

impl IntegratorConfig {
    /// Default convergence threshold.
    pub const DEFAULT_THRESHOLD: f64 = 1.0e-6;

    /// Default batch size.
    pub const DEFAULT_BATCH_SIZE: u64 = 16_384;

    /// Default minimum sample count.
    pub const DEFAULT_MIN_SAMPLES: u64 = 65_536;

    /// Default sample budget.
    pub const DEFAULT_MAX_SAMPLES: u64 = 1 << 28;

    /// Check that the configuration can drive an integration.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(GeometryError::InvalidIntegrator {
                reason: format!("threshold must be finite and > 0, got {}", self.threshold),
            });
        }
        if self.batch_size == 0 {
            return Err(GeometryError::InvalidIntegrator {
                reason: "batch_size must be > 0".into(),
            });
        }
        if self.max_samples < self.batch_size {
            return Err(GeometryError::InvalidIntegrator {
                reason: format!(
                    "max_samples ({}) is smaller than one batch ({})",
                    self.max_samples, self.batch_size
                ),
            });
        }
        if self.min_samples > self.max_samples {
            return Err(GeometryError::InvalidIntegrator {
                reason: format!(
                    "min_samples ({}) exceeds max_samples ({})",
                    self.min_samples, self.max_samples
                ),
            });
        }
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .clamp(1, 16),
        }
    }

    /// Copy of this configuration whose seed is derived from `run`.
    ///
    /// Run 0 keeps the configured seed, so the first integration of a
    /// shape is reproducible; later runs draw independent samples.
    pub fn reseeded(&self, run: u64) -> IntegratorConfig {
        IntegratorConfig {
            seed: self.seed ^ splitmix64(run),
            ..self.clone()
        }
    }

    fn max_batches(&self) -> u64 {
        self.max_samples.div_ceil(self.batch_size)
    }

    /// Samples drawn by `batch`. The last batch is cut short so the total
    /// never exceeds `max_samples`.
    fn batch_len(&self, batch: u64) -> u64 {
        let drawn = batch.saturating_mul(self.batch_size);
        self.batch_size.min(self.max_samples.saturating_sub(drawn))
    }
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            min_samples: Self::DEFAULT_MIN_SAMPLES,
            max_samples: Self::DEFAULT_MAX_SAMPLES,
            seed: 0,
            workers: None,
        }
    }
}

fn splitmix64(run: u64) -> u64 {
    if run == 0 {
        return 0;
    }
    let mut z = run.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ── VolumeEstimate ─────────────────────────────────────────────────

/// How a volume was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Convergence {
    /// Computed analytically.
    Exact,
    /// Monte-Carlo estimate that met the convergence threshold.
    Converged,
    /// Monte-Carlo estimate that ran out of sample budget first.
    BudgetExhausted,
}

/// A volume together with the number of samples behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeEstimate {
    /// Estimated (or exact) volume.
    pub volume: f64,
    /// Sample points tested; zero for exact volumes.
    pub samples: u64,
    /// Whether the estimate converged.
    pub status: Convergence,
}

impl VolumeEstimate {
    /// An analytically computed volume.
    pub fn exact(volume: f64) -> Self {
        Self {
            volume,
            samples: 0,
            status: Convergence::Exact,
        }
    }

    /// `false` only when the sample budget ran out before convergence.
    pub fn is_converged(&self) -> bool {
        self.status != Convergence::BudgetExhausted
    }
}

// ── VolumeCache ────────────────────────────────────────────────────

/// Lazily computed volume of a composite shape.
///
/// Integration runs under the lock, so concurrent first access computes
/// once and every caller observes the same value.
#[derive(Debug, Default)]
pub struct VolumeCache {
    slot: Mutex<CacheSlot>,
}

#[derive(Debug, Default)]
struct CacheSlot {
    value: Option<VolumeEstimate>,
    runs: u64,
}

impl VolumeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached estimate, or compute and store one.
    ///
    /// `compute` receives the run number (0 for the first integration)
    /// and is always called when `reintegrate` is set.
    pub fn get_or_integrate<F>(&self, reintegrate: bool, compute: F) -> VolumeEstimate
    where
        F: FnOnce(u64) -> VolumeEstimate,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.value {
            Some(est) if !reintegrate => est,
            _ => {
                let est = compute(slot.runs);
                slot.runs += 1;
                slot.value = Some(est);
                est
            }
        }
    }

    /// The cached estimate, if any, without computing.
    pub fn cached(&self) -> Option<VolumeEstimate> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
    }
}

// ── Integration ────────────────────────────────────────────────────

/// Estimate the volume of `shape` by sampling its bounding box.
///
/// Usable by any shape that cannot compute its volume analytically.
/// A shape with a zero-volume bounding box has exact volume 0.
pub fn integrate(shape: &dyn Shape, config: &IntegratorConfig) -> VolumeEstimate {
    let bbox = *shape.bounding_box();
    if bbox.volume() <= 0.0 {
        return VolumeEstimate::exact(0.0);
    }
    let workers = config.resolved_worker_count();
    let est = if workers <= 1 {
        integrate_serial(shape, &bbox, config)
    } else {
        integrate_parallel(shape, &bbox, config, workers)
    };
    match est.status {
        Convergence::BudgetExhausted => log::warn!(
            "{} volume did not converge within {} samples (estimate {:.6})",
            shape.kind(),
            est.samples,
            est.volume
        ),
        _ => log::debug!(
            "{} volume converged to {:.6} after {} samples",
            shape.kind(),
            est.volume,
            est.samples
        ),
    }
    est
}

fn integrate_serial(
    shape: &dyn Shape,
    bbox: &BoundingBox,
    config: &IntegratorConfig,
) -> VolumeEstimate {
    let mut running = RunningEstimate::new(bbox.volume());
    let mut batch = 0u64;
    loop {
        let count = config.batch_len(batch);
        let hits = sample_batch(shape, bbox, config.seed, batch, count);
        if let Some(done) = running.merge(hits, count, config) {
            return done;
        }
        batch += 1;
    }
}

fn integrate_parallel(
    shape: &dyn Shape,
    bbox: &BoundingBox,
    config: &IntegratorConfig,
    workers: usize,
) -> VolumeEstimate {
    let max_batches = config.max_batches();
    let (task_tx, task_rx) = crossbeam_channel::unbounded::<u64>();
    let (result_tx, result_rx) = crossbeam_channel::unbounded::<(u64, u64)>();

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok(batch) = task_rx.recv() {
                    let count = config.batch_len(batch);
                    let hits = sample_batch(shape, bbox, config.seed, batch, count);
                    if result_tx.send((batch, hits)).is_err() {
                        break;
                    }
                }
            });
        }
        // Only workers hold senders now; recv fails once they all exit.
        drop(result_tx);

        let mut dispatched = 0u64;
        while dispatched < max_batches && dispatched < 2 * workers as u64 {
            if task_tx.send(dispatched).is_err() {
                break;
            }
            dispatched += 1;
        }

        let mut running = RunningEstimate::new(bbox.volume());
        let mut pending: BTreeMap<u64, u64> = BTreeMap::new();
        let mut next_merge = 0u64;
        let outcome = 'collect: loop {
            let Ok((batch, hits)) = result_rx.recv() else {
                break 'collect running.exhausted();
            };
            pending.insert(batch, hits);
            while let Some(hits) = pending.remove(&next_merge) {
                let count = config.batch_len(next_merge);
                next_merge += 1;
                if let Some(done) = running.merge(hits, count, config) {
                    break 'collect done;
                }
                if dispatched < max_batches && task_tx.send(dispatched).is_ok() {
                    dispatched += 1;
                }
            }
        };

        // Discard queued batches so workers stop after their current one.
        while task_rx.try_recv().is_ok() {}
        drop(task_tx);
        outcome
    })
}

fn sample_batch(shape: &dyn Shape, bbox: &BoundingBox, seed: u64, batch: u64, count: u64) -> u64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(batch);
    let mut hits = 0u64;
    for _ in 0..count {
        let u = [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()];
        if shape.contains_point(&bbox.lerp(u)) {
            hits += 1;
        }
    }
    hits
}

/// Running Monte-Carlo state with the single convergence decision point.
struct RunningEstimate {
    box_volume: f64,
    hits: u64,
    samples: u64,
    previous: Option<f64>,
}

impl RunningEstimate {
    fn new(box_volume: f64) -> Self {
        Self {
            box_volume,
            hits: 0,
            samples: 0,
            previous: None,
        }
    }

    fn current(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.box_volume * self.hits as f64 / self.samples as f64
    }

    /// Fold in one batch of `count` samples; returns the final estimate
    /// once integration stops.
    fn merge(
        &mut self,
        hits: u64,
        count: u64,
        config: &IntegratorConfig,
    ) -> Option<VolumeEstimate> {
        self.hits += hits;
        self.samples += count;
        let estimate = self.current();
        let converged = self.previous.is_some_and(|prev| {
            relative_change(prev, estimate) < config.threshold
                && self.samples >= config.min_samples
        });
        self.previous = Some(estimate);
        if converged {
            Some(VolumeEstimate {
                volume: estimate,
                samples: self.samples,
                status: Convergence::Converged,
            })
        } else if self.samples >= config.max_samples {
            Some(self.exhausted())
        } else {
            None
        }
    }

    fn exhausted(&self) -> VolumeEstimate {
        VolumeEstimate {
            volume: self.current(),
            samples: self.samples,
            status: Convergence::BudgetExhausted,
        }
    }
}

fn relative_change(previous: f64, current: f64) -> f64 {
    if previous == current {
        return 0.0;
    }
    (current - previous).abs() / current.abs()
}
