//! Fundamental types for the Phasemark system.

use ndarray::{Array1, Array2};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Phase samples (radians) for a single captured frame, one per subcarrier.
pub type PhaseVector = Array1<f64>;

/// A batch of repeated captures under the same physical condition.
/// Rows are measurements, columns are subcarrier phases.
pub type MeasurementBatch = Array2<f64>;

/// Complex number type alias for raw CSI samples
pub type CsiComplex = Complex<f64>;

/// Waveform variant a capture originates from
///
/// The variant determines how many phase samples a frame carries once the
/// DC subcarrier is removed, and which reference/boundary subcarriers the
/// fingerprint extraction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveformVariant {
    /// 802.11a (legacy OFDM), 52 data/pilot subcarriers
    Legacy,
    /// 802.11ac, 56 subcarriers
    Ac,
    /// Short Training Field, 12 populated subcarriers at stride 4
    Stf,
}

impl WaveformVariant {
    /// Number of phase samples a frame of this variant carries
    pub fn subcarrier_count(&self) -> usize {
        match self {
            WaveformVariant::Legacy => 52,
            WaveformVariant::Ac => 56,
            WaveformVariant::Stf => 12,
        }
    }
}

/// Phase data as produced by the input loader: a single frame or a batch
///
/// A one-line source yields a single [`PhaseVector`]; multi-line sources
/// yield a [`MeasurementBatch`] with one row per captured frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PhaseInput {
    Single(PhaseVector),
    Batch(MeasurementBatch),
}

impl PhaseInput {
    /// Number of measurements contained
    pub fn measurement_count(&self) -> usize {
        match self {
            PhaseInput::Single(_) => 1,
            PhaseInput::Batch(b) => b.nrows(),
        }
    }

    /// Subcarrier phases per measurement
    pub fn subcarrier_count(&self) -> usize {
        match self {
            PhaseInput::Single(v) => v.len(),
            PhaseInput::Batch(b) => b.ncols(),
        }
    }

    /// View the data uniformly as a batch, promoting a single vector to
    /// a one-row matrix.
    pub fn into_batch(self) -> MeasurementBatch {
        match self {
            PhaseInput::Single(v) => {
                let n = v.len();
                v.into_shape((1, n)).expect("1-D to 1xN reshape cannot fail")
            }
            PhaseInput::Batch(b) => b,
        }
    }
}

/// Extract phase angles (radians) from raw complex CSI samples
pub fn phases_from_csi(csi: &[CsiComplex]) -> PhaseVector {
    csi.iter().map(|c| c.arg()).collect()
}
