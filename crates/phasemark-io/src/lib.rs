//! # Phasemark-IO
//!
//! Thin collaborators around the fingerprint core: reading phase
//! measurements from delimited text, exporting mean vectors, and
//! rendering summary plots. Nothing here feeds back into the numeric
//! pipeline.

pub mod loader;
pub mod plot;
pub mod writer;

pub use loader::load_phase_csv;
pub use plot::{plot_summaries, plot_summary, SummarySeries, DEFAULT_COLORS};
pub use writer::{format_means, write_mean_csv};
