use std::fs::File;
use std::path::Path;

use crate::error::{check_len, ChebError, Result};

/// Loads one named column of samples from a CSV file with a header row.
///
/// Surrounding whitespace is ignored. A missing or non-numeric field fails
/// with [`ChebError::InvalidSample`] naming its line; samples are never skipped.
pub fn read_csv_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<f64>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    let col_index = headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| ChebError::Io(format!("column '{}' not found", column)))?;

    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = record.get(col_index).unwrap_or("").trim();
        let value = field.parse::<f64>().map_err(|_| ChebError::InvalidSample {
            line: record.position().map_or(0, |pos| pos.line()),
            column: column.to_string(),
            value: field.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Writes a sampled grid as CSV: an `x` column with the collocation points
/// followed by one column per named series.
///
/// Every series must have the same length as `points`.
pub fn write_grid_csv<P: AsRef<Path>>(
    path: P,
    points: &[f64],
    columns: &[(&str, &[f64])],
) -> Result<()> {
    for (_, values) in columns {
        check_len(points.len(), values.len())?;
    }

    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec!["x"];
    header.extend(columns.iter().map(|(name, _)| *name));
    wtr.write_record(&header)?;

    for (i, x) in points.iter().enumerate() {
        let mut row = vec![x.to_string()];
        row.extend(columns.iter().map(|(_, values)| values[i].to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}
