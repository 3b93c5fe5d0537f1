//! Loading phase measurements from delimited text.
//!
//! Capture tooling exports one line per frame, comma-separated phase
//! radians, one column per subcarrier. A single-line file is a lone
//! measurement; anything longer is a batch.

use std::path::Path;

use ndarray::{Array1, Array2};

use phasemark_core::{Error, PhaseInput, Result};

/// Read a comma-delimited phase file into a [`PhaseInput`].
///
/// All rows must have the same number of columns; a ragged or empty file
/// is rejected. Values are parsed as `f64` radians.
pub fn load_phase_csv<P: AsRef<Path>>(path: P) -> Result<PhaseInput> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::MeasurementLoad(format!("{}: {}", path.display(), e)))?;

    let mut values: Vec<f64> = Vec::new();
    let mut columns = 0;
    let mut rows = 0;

    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| Error::MeasurementLoad(format!("{}: {}", path.display(), e)))?;
        if row == 0 {
            columns = record.len();
        } else if record.len() != columns {
            return Err(Error::ShapeMismatch {
                expected: columns,
                actual: record.len(),
            });
        }
        for (column, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| Error::MalformedValue {
                row,
                column,
                value: field.to_string(),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    if rows == 0 || columns == 0 {
        return Err(Error::MeasurementLoad(format!(
            "{}: no phase data",
            path.display()
        )));
    }

    tracing::debug!(
        path = %path.display(),
        rows,
        columns,
        "loaded phase measurements"
    );

    if rows == 1 {
        Ok(PhaseInput::Single(Array1::from_vec(values)))
    } else {
        let batch = Array2::from_shape_vec((rows, columns), values)
            .expect("row/column bookkeeping matches collected values");
        Ok(PhaseInput::Batch(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_single_vector() {
        let file = write_temp("0.1, -0.2, 0.3\n");
        let input = load_phase_csv(file.path()).unwrap();
        match input {
            PhaseInput::Single(v) => {
                assert_eq!(v.len(), 3);
                assert!((v[1] + 0.2).abs() < 1e-12);
            }
            PhaseInput::Batch(_) => panic!("one line must load as a single vector"),
        }
    }

    #[test]
    fn test_load_batch() {
        let file = write_temp("0.1,0.2\n0.3,0.4\n0.5,0.6\n");
        let input = load_phase_csv(file.path()).unwrap();
        match input {
            PhaseInput::Batch(b) => {
                assert_eq!(b.dim(), (3, 2));
                assert!((b[[2, 1]] - 0.6).abs() < 1e-12);
            }
            PhaseInput::Single(_) => panic!("multi-line file must load as a batch"),
        }
    }

    #[test]
    fn test_malformed_value_is_located() {
        let file = write_temp("0.1,0.2\n0.3,oops\n");
        let err = load_phase_csv(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedValue { row: 1, column: 1, .. }
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = write_temp("");
        assert!(load_phase_csv(file.path()).is_err());
    }
}
