//! # Phasemark-Fingerprint
//!
//! Phase-fingerprint extraction from raw CSI phase measurements.
//!
//! RF front-end imperfections leave a systematic per-subcarrier phase
//! error on every frame a device transmits. Two devices sending identical
//! waveforms therefore produce measurably different residual phase curves
//! once the propagation-dependent components are removed. This crate
//! implements that extraction:
//!
//! 1. **Unwrapping**: remove spurious 2π jumps from the per-subcarrier
//!    phase sequence ([`unwrap`])
//! 2. **Extraction**: fit and subtract the linear (timing-offset) and
//!    constant (phase-offset) components, leaving the device-characteristic
//!    residual ([`extractor`], parameterized by [`layout`])
//! 3. **Categorization**: split captures that contain frames from two
//!    distinct transmitters ([`categorize`])
//! 4. **Aggregation**: per-subcarrier mean/deviation summaries and
//!    fingerprint comparison ([`stats`])
//!
//! The [`pipeline`] module wires these stages into the end-to-end drivers
//! used by the CLI.

pub mod categorize;
pub mod extractor;
pub mod layout;
pub mod pipeline;
pub mod stats;
pub mod unwrap;

pub use categorize::MeasurementCategorizer;
pub use extractor::{BatchFingerprinter, FingerprintExtractor};
pub use layout::SubcarrierLayout;
pub use pipeline::FingerprintPipeline;
pub use stats::SummaryResult;
pub use unwrap::PhaseUnwrapper;
