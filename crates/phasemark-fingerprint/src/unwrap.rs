//! Phase unwrapping for per-subcarrier phase sequences.
//!
//! Phase is measured modulo 2π, so the raw per-subcarrier sequence can
//! show large apparent discontinuities where the underlying phase merely
//! crossed a wrap boundary. Unwrapping detects those jumps from the
//! sample-to-sample gradient and subtracts the accumulated multiple of 2π
//! from every subsequent sample.

use ndarray::{Array1, ArrayView1, ArrayViewMut1};
use std::f64::consts::PI;

use phasemark_core::MeasurementBatch;

/// Gradient magnitude above which a sample-to-sample step is treated as a
/// wrap. Deliberately wider than π: gradients near the wrap boundary are
/// common in noisy captures and must not trigger a correction.
pub const JUMP_THRESHOLD: f64 = 4.0;

/// Removes 2π discontinuities from phase sequences
#[derive(Debug, Clone)]
pub struct PhaseUnwrapper {
    /// Gradient threshold (radians) for jump detection
    pub jump_threshold: f64,
}

impl Default for PhaseUnwrapper {
    fn default() -> Self {
        Self {
            jump_threshold: JUMP_THRESHOLD,
        }
    }
}

impl PhaseUnwrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the jump-detection threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.jump_threshold = threshold;
        self
    }

    /// Sample-to-sample gradients of a phase vector
    ///
    /// The first gradient is 0 by convention; it never participates in
    /// jump detection.
    pub fn gradients(&self, phases: ArrayView1<f64>) -> Array1<f64> {
        let mut gradients = Array1::zeros(phases.len());
        for i in 1..phases.len() {
            gradients[i] = phases[i] - phases[i - 1];
        }
        gradients
    }

    /// Sum of a vector's raw gradients, the aggregate-slope signal used
    /// by the measurement categorizer.
    pub fn gradient_sum(&self, phases: ArrayView1<f64>) -> f64 {
        self.gradients(phases).sum()
    }

    /// Unwrap a single phase vector in place.
    ///
    /// Strictly sequential left-to-right scan: an integer jump counter
    /// accumulates the detected wraps, and whenever it is nonzero the
    /// current sample is shifted down by `counter * 2π`. Gradients are
    /// taken from the raw input before any sample is touched, so a
    /// correction applied at index i never influences the decision at
    /// index i + 1.
    pub fn unwrap_vector(&self, mut phases: ArrayViewMut1<f64>) {
        let gradients = self.gradients(phases.view());
        let mut jumps: i64 = 0;
        for i in 1..phases.len() {
            if gradients[i] > self.jump_threshold {
                jumps += 1;
            } else if gradients[i] < -self.jump_threshold {
                jumps -= 1;
            }
            if jumps != 0 {
                phases[i] -= jumps as f64 * 2.0 * PI;
            }
        }
    }

    /// Unwrap every measurement of a batch in place.
    ///
    /// Rows are unwrapped independently; only the scan within a row is
    /// order-dependent.
    pub fn unwrap_batch(&self, batch: &mut MeasurementBatch) {
        for row in batch.rows_mut() {
            self.unwrap_vector(row);
        }
    }
}
