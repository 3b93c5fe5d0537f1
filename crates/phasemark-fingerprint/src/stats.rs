//! Aggregation of per-measurement fingerprints.
//!
//! A single fingerprint is noisy; the usable device signature is the
//! per-subcarrier mean over many repeated captures, with the spread
//! reported alongside for the error bars.

use ndarray::{Array1, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use phasemark_core::{Error, MeasurementBatch, PhaseVector, Result};

/// Per-subcarrier mean and standard deviation over a batch of fingerprints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Mean phase error per subcarrier position
    pub mean: PhaseVector,

    /// Standard deviation per subcarrier position, across the batch
    pub std: PhaseVector,
}

impl SummaryResult {
    /// Number of subcarrier positions summarized
    pub fn subcarrier_count(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }
}

/// Per-subcarrier mean across a batch of fingerprints.
///
/// The divisor is caller-supplied rather than taken from the batch so
/// windowed iteration can reuse partial windows. An empty batch yields an
/// empty vector.
pub fn mean(fingerprints: &MeasurementBatch, count: usize) -> PhaseVector {
    if fingerprints.nrows() == 0 || count == 0 {
        return Array1::zeros(0);
    }
    fingerprints.sum_axis(Axis(0)) / count as f64
}

/// Per-subcarrier mean plus the per-measurement standard deviation.
///
/// The second vector is the std across subcarrier indices WITHIN each
/// fingerprint: one value per measurement, not per subcarrier. That axis
/// choice differs from [`per_subcarrier_std`] and is what the windowed
/// iteration reports; the two are not interchangeable.
pub fn mean_std(fingerprints: &MeasurementBatch, count: usize) -> (PhaseVector, PhaseVector) {
    let means = mean(fingerprints, count);
    if fingerprints.nrows() == 0 {
        return (means, Array1::zeros(0));
    }
    let stds = fingerprints.std_axis(Axis(1), 0.0);
    (means, stds)
}

/// Standard deviation across the batch at each subcarrier position.
///
/// This is the spread the plot error bars show. Empty batch yields an
/// empty vector.
pub fn per_subcarrier_std(fingerprints: &MeasurementBatch) -> PhaseVector {
    if fingerprints.nrows() == 0 {
        return Array1::zeros(0);
    }
    fingerprints.std_axis(Axis(0), 0.0)
}

/// Full summary over a batch: per-subcarrier mean and std
pub fn summarize(fingerprints: &MeasurementBatch) -> SummaryResult {
    SummaryResult {
        mean: mean(fingerprints, fingerprints.nrows()),
        std: per_subcarrier_std(fingerprints),
    }
}

/// Mean absolute error between a candidate and a reference fingerprint.
///
/// Both vectors are taken through `abs()` BEFORE differencing:
/// `sum(| |reference[i]| − |candidate[i]| |) / len`. This is not the
/// conventional MAE (it compares error magnitudes and ignores sign
/// structure), but it is the comparison the fingerprint matching uses,
/// and it is symmetric in its arguments.
pub fn mean_absolute_error(reference: ArrayView1<f64>, candidate: ArrayView1<f64>) -> Result<f64> {
    if reference.len() != candidate.len() {
        return Err(Error::ShapeMismatch {
            expected: reference.len(),
            actual: candidate.len(),
        });
    }
    if reference.is_empty() {
        return Ok(0.0);
    }
    let error: f64 = reference
        .iter()
        .zip(candidate.iter())
        .map(|(&r, &c)| (r.abs() - c.abs()).abs())
        .sum();
    Ok(error / reference.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array2};

    #[test]
    fn test_mean_per_subcarrier() {
        let fingerprints = arr2(&[[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]]);
        let m = mean(&fingerprints, 2);
        assert_eq!(m.len(), 3);
        assert!((m[0] - 2.0).abs() < 1e-12);
        assert!((m[1] - 3.0).abs() < 1e-12);
        assert!((m[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_with_decoupled_count() {
        // Divisor 4 while the batch has 2 rows: partial-window semantics
        let fingerprints = arr2(&[[2.0, 4.0], [2.0, 4.0]]);
        let m = mean(&fingerprints, 4);
        assert!((m[0] - 1.0).abs() < 1e-12);
        assert!((m[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_std_axes() {
        let fingerprints = arr2(&[[1.0, 1.0, 1.0], [0.0, 2.0, 4.0]]);
        let (means, stds) = mean_std(&fingerprints, 2);
        // Means: one per subcarrier
        assert_eq!(means.len(), 3);
        // Stds: one per measurement, across its subcarriers
        assert_eq!(stds.len(), 2);
        assert!((stds[0] - 0.0).abs() < 1e-12);
        // std([0, 2, 4]) with ddof 0 = sqrt(8/3)
        assert!((stds[1] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_per_subcarrier_std() {
        let fingerprints = arr2(&[[0.0, 1.0], [2.0, 1.0]]);
        let stds = per_subcarrier_std(&fingerprints);
        assert_eq!(stds.len(), 2);
        assert!((stds[0] - 1.0).abs() < 1e-12);
        assert!((stds[1] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_batch_yields_empty_summary() {
        let fingerprints = Array2::<f64>::zeros((0, 52));
        let summary = summarize(&fingerprints);
        assert!(summary.is_empty());
        assert_eq!(per_subcarrier_std(&fingerprints).len(), 0);
    }

    #[test]
    fn test_mae_matches_hand_computation() {
        let a = arr1(&[1.0, -2.0, 3.0]);
        let b = arr1(&[-1.0, 1.0, 0.0]);
        // |1|-|−1| = 0; |−2|-|1| = 1; |3|-|0| = 3 → (0+1+3)/3
        let mae = mean_absolute_error(a.view(), b.view()).unwrap();
        assert!((mae - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mae_symmetry() {
        let a = arr1(&[0.3, -0.7, 1.1, -0.2]);
        let b = arr1(&[-0.4, 0.6, -1.0, 0.1]);
        let ab = mean_absolute_error(a.view(), b.view()).unwrap();
        let ba = mean_absolute_error(b.view(), a.view()).unwrap();
        assert!((ab - ba).abs() < 1e-15);
    }

    #[test]
    fn test_mae_shape_mismatch() {
        let a = arr1(&[1.0, 2.0]);
        let b = arr1(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            mean_absolute_error(a.view(), b.view()),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
