//! Fingerprint extraction: linear-trend and offset removal.
//!
//! An unwrapped phase vector r decomposes into three parts: a constant
//! offset Z shared by all subcarriers (carrier phase offset), a component
//! linear in the subcarrier index (packet timing offset), and the residual
//! E that is characteristic of the transmitting hardware. The extractor
//! computes Z from two reference samples next to the DC bin, fits the
//! slope from the two boundary samples, and subtracts the fitted line:
//!
//! E\[i\] = r\[i\] − (2π · l · K\[i\] + Z)

use ndarray::{Array2, ArrayView1};
use std::f64::consts::PI;

use phasemark_core::{Error, MeasurementBatch, PhaseVector, Result};

use crate::layout::{self, SubcarrierLayout, STF_POSITIONS};

/// Extracts the device-characteristic phase residual from one measurement
#[derive(Debug, Clone, Copy)]
pub struct FingerprintExtractor {
    layout: &'static SubcarrierLayout,
}

impl FingerprintExtractor {
    pub fn new(layout: &'static SubcarrierLayout) -> Self {
        Self { layout }
    }

    /// Extractor with the layout auto-selected from the vector length
    pub fn for_len(len: usize) -> Self {
        Self::new(SubcarrierLayout::for_len(len))
    }

    /// Extractor for the short-training-field subcarrier subset
    pub fn stf() -> Self {
        Self::new(&layout::STF)
    }

    pub fn layout(&self) -> &'static SubcarrierLayout {
        self.layout
    }

    /// Extract the fingerprint and the offset-only residual.
    ///
    /// Returns `(E, r − Z)`, both the same length as the input. The input
    /// must already be unwrapped; a wrapped vector silently produces a
    /// fingerprint dominated by the wrap artifact.
    pub fn extract(&self, r: ArrayView1<f64>) -> Result<(PhaseVector, PhaseVector)> {
        self.layout.check_len(r.len())?;

        let (ref_a, ref_b) = self.layout.reference;
        let z = (r[ref_a] + r[ref_b]) / 2.0;

        let (first, last) = self.layout.boundary;
        let slope = (r[last] - r[first]) / (2.0 * PI * self.layout.span);

        let fingerprint: PhaseVector = self
            .layout
            .k
            .iter()
            .zip(r.iter())
            .map(|(&k, &sample)| sample - (2.0 * PI * slope * k as f64 + z))
            .collect();
        let offset_residual: PhaseVector = r.iter().map(|&sample| sample - z).collect();

        Ok((fingerprint, offset_residual))
    }

    /// Extract over the STF subcarrier subset of a full phase vector.
    ///
    /// A 12-sample input is taken as already pre-filtered; anything longer
    /// has the twelve STF positions gathered out of it first.
    pub fn extract_stf(r: ArrayView1<f64>) -> Result<(PhaseVector, PhaseVector)> {
        let extractor = Self::stf();
        if r.len() == layout::STF.subcarrier_count() {
            return extractor.extract(r);
        }
        let subset = stf_subcarriers(r)?;
        extractor.extract(subset.view())
    }
}

/// Gather the twelve STF-carrying samples out of a full phase vector
pub fn stf_subcarriers(r: ArrayView1<f64>) -> Result<PhaseVector> {
    let last = STF_POSITIONS[STF_POSITIONS.len() - 1];
    if r.len() <= last {
        return Err(Error::IndexOutOfRange {
            index: last,
            len: r.len(),
        });
    }
    Ok(STF_POSITIONS.iter().map(|&i| r[i]).collect())
}

/// Applies the extractor across a whole measurement batch
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchFingerprinter;

impl BatchFingerprinter {
    pub fn new() -> Self {
        Self
    }

    /// Fingerprint every row, auto-selecting the layout from the row
    /// length (56 ⇒ ac, anything else ⇒ legacy).
    ///
    /// Returns the fingerprints and the offset-only residuals as two
    /// matrices with the same shape as the input. Rows are independent.
    pub fn extract_batch(
        &self,
        batch: &MeasurementBatch,
    ) -> Result<(MeasurementBatch, MeasurementBatch)> {
        let extractor = FingerprintExtractor::for_len(batch.ncols());
        self.extract_with(batch, |row| extractor.extract(row))
    }

    /// Fingerprint every row over the STF subcarrier subset.
    ///
    /// Output width is always 12 regardless of the input width.
    pub fn extract_batch_stf(
        &self,
        batch: &MeasurementBatch,
    ) -> Result<(MeasurementBatch, MeasurementBatch)> {
        self.extract_with(batch, |row| FingerprintExtractor::extract_stf(row))
    }

    fn extract_with<F>(
        &self,
        batch: &MeasurementBatch,
        extract: F,
    ) -> Result<(MeasurementBatch, MeasurementBatch)>
    where
        F: Fn(ArrayView1<f64>) -> Result<(PhaseVector, PhaseVector)>,
    {
        let mut fingerprints: Vec<f64> = Vec::new();
        let mut residuals: Vec<f64> = Vec::new();
        let mut width = 0;

        for row in batch.rows() {
            let (fingerprint, residual) = extract(row)?;
            width = fingerprint.len();
            fingerprints.extend(fingerprint.iter());
            residuals.extend(residual.iter());
        }

        let rows = batch.nrows();
        if rows == 0 {
            width = batch.ncols();
        }
        let fingerprints = Array2::from_shape_vec((rows, width), fingerprints)
            .expect("equal-length rows produce a uniform output width");
        let residuals = Array2::from_shape_vec((rows, width), residuals)
            .expect("equal-length rows produce a uniform output width");
        Ok((fingerprints, residuals))
    }
}
