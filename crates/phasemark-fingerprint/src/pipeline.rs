//! End-to-end extraction drivers.
//!
//! Wires unwrapping, extraction, categorization, and aggregation into the
//! flows the CLI exposes: whole-batch summaries, windowed iteration over
//! long captures, and the two-device split.

use ndarray::s;

use phasemark_core::{MeasurementBatch, PhaseVector, Result};

use crate::categorize::MeasurementCategorizer;
use crate::extractor::BatchFingerprinter;
use crate::stats::{self, SummaryResult};
use crate::unwrap::PhaseUnwrapper;

/// Drives a measurement batch through unwrap → extract → summarize
#[derive(Debug, Clone, Default)]
pub struct FingerprintPipeline {
    unwrapper: PhaseUnwrapper,
    fingerprinter: BatchFingerprinter,
}

impl FingerprintPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize a raw capture: unwrap every frame, extract fingerprints
    /// with the layout auto-selected from the row length, and aggregate
    /// into per-subcarrier mean and std.
    pub fn extract_summary(&self, mut batch: MeasurementBatch) -> Result<SummaryResult> {
        tracing::debug!(
            measurements = batch.nrows(),
            subcarriers = batch.ncols(),
            "extracting fingerprint summary"
        );
        self.unwrapper.unwrap_batch(&mut batch);
        let (fingerprints, _) = self.fingerprinter.extract_batch(&batch)?;
        Ok(stats::summarize(&fingerprints))
    }

    /// As [`extract_summary`](Self::extract_summary), but over the STF
    /// subcarrier subset of every frame.
    pub fn extract_summary_stf(&self, mut batch: MeasurementBatch) -> Result<SummaryResult> {
        tracing::debug!(
            measurements = batch.nrows(),
            subcarriers = batch.ncols(),
            "extracting STF fingerprint summary"
        );
        self.unwrapper.unwrap_batch(&mut batch);
        let (fingerprints, _) = self.fingerprinter.extract_batch_stf(&batch)?;
        Ok(stats::summarize(&fingerprints))
    }

    /// Mean fingerprint per consecutive window of `window` measurements.
    ///
    /// Yields up to `iterations` mean vectors; a trailing partial window
    /// is averaged over the measurements it actually contains, and
    /// windows past the end of the batch are dropped.
    pub fn extract_windowed(
        &self,
        mut batch: MeasurementBatch,
        window: usize,
        iterations: usize,
    ) -> Result<Vec<PhaseVector>> {
        self.unwrapper.unwrap_batch(&mut batch);
        let (fingerprints, _) = self.fingerprinter.extract_batch(&batch)?;

        let mut means = Vec::new();
        let mut index = 0;
        for _ in 0..iterations {
            if index >= fingerprints.nrows() || window == 0 {
                break;
            }
            let end = (index + window).min(fingerprints.nrows());
            let slice = fingerprints.slice(s![index..end, ..]).to_owned();
            means.push(stats::mean(&slice, slice.nrows()));
            index = end;
        }
        tracing::debug!(windows = means.len(), window, "windowed extraction done");
        Ok(means)
    }

    /// Split a mixed two-device capture and summarize each group.
    ///
    /// Returns (group 1 summary, group 2 summary); group 1 holds the
    /// frames attributed to the second transmitter. A group with no
    /// frames produces an empty summary.
    pub fn extract_two_device(
        &self,
        mut batch: MeasurementBatch,
    ) -> Result<(SummaryResult, SummaryResult)> {
        self.unwrapper.unwrap_batch(&mut batch);
        let categorizer = MeasurementCategorizer::new();
        let (group1, group2) = categorizer.categorize(&batch);
        tracing::debug!(
            group1 = group1.nrows(),
            group2 = group2.nrows(),
            "categorized mixed-device capture"
        );

        let (fp1, _) = self.fingerprinter.extract_batch(&group1)?;
        let (fp2, _) = self.fingerprinter.extract_batch(&group2)?;
        Ok((stats::summarize(&fp1), stats::summarize(&fp2)))
    }
}

/// Normalize a phase vector against its first sample: `v − v[0]`.
///
/// Used when exporting raw mean-phase curves rather than fingerprints.
pub fn normalize_to_first(v: &PhaseVector) -> PhaseVector {
    match v.first() {
        Some(&first) => v.mapv(|x| x - first),
        None => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use std::f64::consts::PI;

    use crate::layout::LEGACY;

    /// Batch of `rows` legacy frames, each an exact ramp plus a small
    /// device residual at subcarrier 10, with a 2π wrap inserted halfway.
    fn synthetic_batch(rows: usize) -> MeasurementBatch {
        let mut data = Vec::new();
        for _ in 0..rows {
            for (i, &k) in LEGACY.k.iter().enumerate() {
                let mut v = 2.0 * PI * 0.002 * k as f64 + 0.4;
                if i == 10 {
                    v += 0.05;
                }
                if i >= 26 {
                    v += 2.0 * PI;
                }
                data.push(v);
            }
        }
        Array2::from_shape_vec((rows, 52), data).unwrap()
    }

    #[test]
    fn test_extract_summary_recovers_residual() {
        let pipeline = FingerprintPipeline::new();
        let summary = pipeline.extract_summary(synthetic_batch(20)).unwrap();

        assert_eq!(summary.subcarrier_count(), 52);
        // The planted residual at subcarrier 10 survives; everything else
        // is detrended away. The wrap at index 26 sits right between the
        // reference samples, so unwrapping must have removed it for Z to
        // come out right.
        assert!((summary.mean[10] - 0.05).abs() < 1e-9);
        assert!(summary.mean[20].abs() < 1e-9);
        // Identical frames: zero spread
        assert!(summary.std[10].abs() < 1e-9);
    }

    #[test]
    fn test_extract_windowed_counts() {
        let pipeline = FingerprintPipeline::new();
        let means = pipeline
            .extract_windowed(synthetic_batch(25), 10, 5)
            .unwrap();
        // 25 rows at window 10: two full windows plus one partial
        assert_eq!(means.len(), 3);
        for m in &means {
            assert_eq!(m.len(), 52);
        }
        // Partial window still averages over its own size, so the planted
        // residual is unchanged
        assert!((means[2][10] - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_extract_two_device_partitions() {
        // Mix flat frames with steeply falling ones
        let mut data = Vec::new();
        for m in 0..6 {
            for i in 0..52 {
                if m % 2 == 0 {
                    data.push(0.3);
                } else {
                    data.push(-(i as f64) * 0.2);
                }
            }
        }
        let batch = Array2::from_shape_vec((6, 52), data).unwrap();

        let pipeline = FingerprintPipeline::new();
        let (summary1, summary2) = pipeline.extract_two_device(batch).unwrap();
        assert_eq!(summary1.subcarrier_count(), 52);
        assert_eq!(summary2.subcarrier_count(), 52);
    }

    #[test]
    fn test_normalize_to_first() {
        let v = Array1::from_vec(vec![1.5, 2.0, 0.5]);
        let n = normalize_to_first(&v);
        assert!((n[0] - 0.0).abs() < 1e-12);
        assert!((n[1] - 0.5).abs() < 1e-12);
        assert!((n[2] + 1.0).abs() < 1e-12);
    }
}
