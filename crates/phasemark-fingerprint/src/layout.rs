//! Subcarrier layouts for the supported waveform variants.
//!
//! A layout fixes everything the extractor needs to know about a variant:
//! which two samples anchor the constant offset Z, the symmetric integer
//! index sequence K around the removed DC subcarrier, which two boundary
//! samples the linear slope is fitted from, and the normalization span
//! that slope is divided by.

use phasemark_core::{Error, Result, WaveformVariant};

/// Fixed per-variant subcarrier configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubcarrierLayout {
    /// Human-readable variant name
    pub name: &'static str,

    /// Indices of the two reference samples averaged into the offset Z
    pub reference: (usize, usize),

    /// Integer subcarrier indices, symmetric around the removed DC bin
    pub k: &'static [i32],

    /// Indices of the two edge samples the slope is fitted from
    pub boundary: (usize, usize),

    /// Normalization constant for the slope (total subcarrier span)
    pub span: f64,
}

/// 802.11a legacy layout: 52 subcarriers at indices −26..−1, 1..26
pub const LEGACY: SubcarrierLayout = SubcarrierLayout {
    name: "802.11a",
    reference: (25, 26),
    k: &[
        -26, -25, -24, -23, -22, -21, -20, -19, -18, -17, -16, -15, -14, -13, -12, -11, -10, -9,
        -8, -7, -6, -5, -4, -3, -2, -1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17,
        18, 19, 20, 21, 22, 23, 24, 25, 26,
    ],
    boundary: (0, 51),
    span: 52.0,
};

/// 802.11ac layout: 56 subcarriers at indices −28..−1, 1..28
pub const AC: SubcarrierLayout = SubcarrierLayout {
    name: "802.11ac",
    reference: (27, 28),
    k: &[
        -28, -27, -26, -25, -24, -23, -22, -21, -20, -19, -18, -17, -16, -15, -14, -13, -12, -11,
        -10, -9, -8, -7, -6, -5, -4, -3, -2, -1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14,
        15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
    ],
    boundary: (0, 55),
    span: 56.0,
};

/// Short-training-field layout: 12 populated subcarriers at stride 4.
/// The span stays at 56 because the STF rides on the full ac waveform.
pub const STF: SubcarrierLayout = SubcarrierLayout {
    name: "stf",
    reference: (5, 6),
    k: &[-24, -20, -16, -12, -8, -4, 4, 8, 12, 16, 20, 24],
    boundary: (0, 11),
    span: 56.0,
};

/// Positions within a full ac phase vector that carry STF energy
pub const STF_POSITIONS: [usize; 12] = [4, 8, 12, 16, 20, 24, 31, 35, 39, 43, 47, 51];

impl SubcarrierLayout {
    /// Layout for a vector of the given length.
    ///
    /// 56 samples route to the ac layout, anything else to legacy. The
    /// STF layout is never auto-selected; callers invoke it explicitly.
    pub fn for_len(len: usize) -> &'static SubcarrierLayout {
        if len == 56 {
            &AC
        } else {
            &LEGACY
        }
    }

    /// Layout for an explicitly named waveform variant
    pub fn for_variant(variant: WaveformVariant) -> &'static SubcarrierLayout {
        match variant {
            WaveformVariant::Legacy => &LEGACY,
            WaveformVariant::Ac => &AC,
            WaveformVariant::Stf => &STF,
        }
    }

    /// Number of phase samples the layout describes
    pub fn subcarrier_count(&self) -> usize {
        self.k.len()
    }

    /// Highest sample index the extractor will touch
    pub fn max_index(&self) -> usize {
        let (r0, r1) = self.reference;
        let (b0, b1) = self.boundary;
        r0.max(r1).max(b0).max(b1)
    }

    /// Verify a vector is long enough and exactly layout-shaped
    pub fn check_len(&self, len: usize) -> Result<()> {
        if len <= self.max_index() {
            return Err(Error::IndexOutOfRange {
                index: self.max_index(),
                len,
            });
        }
        if len != self.subcarrier_count() {
            return Err(Error::ShapeMismatch {
                expected: self.subcarrier_count(),
                actual: len,
            });
        }
        Ok(())
    }
}
