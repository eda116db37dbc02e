use super::OutputError;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Writes one value per line.
pub fn write_vector_to(values: &[f64], writer: &mut impl Write) -> io::Result<()> {
    for value in values {
        writeln!(writer, "{}", value)?;
    }
    Ok(())
}

/// Writes a newline-delimited numeric file.
pub fn write_vector(path: &Path, values: &[f64]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_vector_to(values, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| OutputError::io(path, e))
}

/// Writes a matrix as whitespace-separated rows.
pub fn write_matrix_to<T: Display>(rows: &[Vec<T>], writer: &mut impl Write) -> io::Result<()> {
    for row in rows {
        let line = row.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

pub fn write_matrix<T: Display>(path: &Path, rows: &[Vec<T>]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_matrix_to(rows, &mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| OutputError::io(path, e))
}

/// Writes equally long columns as a CSV table with a header row.
///
/// There is no index column; `NaN` cells are left empty.
pub fn write_columns_to<W: Write>(
    headers: &[&str],
    columns: &[Vec<f64>],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(headers)?;

    let rows = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for row in 0..rows {
        csv_writer.write_record(
            columns
                .iter()
                .map(|column| column.get(row).map_or_else(String::new, |&v| format_value(v))),
        )?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_columns(
    path: &Path,
    headers: &[&str],
    columns: &[Vec<f64>],
) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
    write_columns_to(headers, columns, BufWriter::new(file)).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
