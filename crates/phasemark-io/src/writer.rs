//! Exporting summary mean vectors.
//!
//! The export format is what downstream comparison scripts consume: the
//! mean vector as one comma-joined line of 4-decimal values.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use phasemark_core::{PhaseVector, Result};

/// Format a mean vector as a single comma-joined line, 4 fractional
/// digits per value.
pub fn format_means(means: &PhaseVector) -> String {
    means
        .iter()
        .map(|m| format!("{:.4}", m))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write a mean vector to a text file as one comma-joined line
pub fn write_mean_csv<P: AsRef<Path>>(path: P, means: &PhaseVector) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    write!(file, "{}", format_means(means))?;
    tracing::debug!(path = %path.display(), values = means.len(), "wrote mean vector");
    Ok(())
}
