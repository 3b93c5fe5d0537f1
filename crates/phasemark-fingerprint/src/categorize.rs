//! Splitting mixed-device captures.
//!
//! Some captures contain frames from two different transmitters (e.g. an
//! access point answering the device under test). The aggregate slope of
//! a frame's phase curve differs materially between the two populations,
//! so the sum of the raw sample-to-sample gradients separates them with a
//! simple threshold. This is a separability heuristic for exactly two
//! device populations, not a clustering algorithm.

use ndarray::Axis;

use phasemark_core::MeasurementBatch;

use crate::unwrap::PhaseUnwrapper;

/// Default gradient-sum threshold below which a frame is attributed to
/// the second device.
pub const GRADIENT_SUM_THRESHOLD: f64 = -4.0;

/// Partitions a measurement batch into two device groups
#[derive(Debug, Clone)]
pub struct MeasurementCategorizer {
    /// Gradient-sum decision threshold
    pub threshold: f64,
    unwrapper: PhaseUnwrapper,
}

impl Default for MeasurementCategorizer {
    fn default() -> Self {
        Self {
            threshold: GRADIENT_SUM_THRESHOLD,
            unwrapper: PhaseUnwrapper::new(),
        }
    }
}

impl MeasurementCategorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Split a batch into (group 1, group 2).
    ///
    /// Frames whose gradient sum falls below the threshold go to group 1
    /// (second transmitter), everything else to group 2. Capture order is
    /// preserved within each group; every frame lands in exactly one.
    /// An empty batch yields two empty groups.
    pub fn categorize(&self, batch: &MeasurementBatch) -> (MeasurementBatch, MeasurementBatch) {
        let mut group1 = Vec::new();
        let mut group2 = Vec::new();

        for (i, row) in batch.rows().into_iter().enumerate() {
            let sum = self.unwrapper.gradient_sum(row);
            tracing::trace!(row = i, gradient_sum = sum, "categorizing measurement");
            if sum < self.threshold {
                group1.push(i);
            } else {
                group2.push(i);
            }
        }

        (
            batch.select(Axis(0), &group1),
            batch.select(Axis(0), &group2),
        )
    }
}
