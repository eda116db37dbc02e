use crate::core::models::atom::Atom;
use crate::core::models::topology::Topology;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("No ATOM or HETATM records found")]
    NoAtoms,
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("MODEL record found before the previous model was closed with ENDMDL")]
    NestedModel,
}

const MIN_ATOM_RECORD_LEN: usize = 54;

/// The atoms and coordinates of one `MODEL` block, in file order.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawModel {
    pub atoms: Vec<Atom>,
    pub positions: Vec<Point3<f64>>,
}

/// Splits a PDB stream into models.
///
/// Models are closed by `ENDMDL`, or by `END` when a file separates frames
/// that way. Files without either are treated as a single model. Only ATOM and
/// HETATM records are interpreted; everything else is skipped.
pub(crate) struct ModelParser<R: BufRead> {
    lines: Lines<R>,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> ModelParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            done: false,
        }
    }

    /// Reads the next model, returning `Ok(None)` at end of input.
    pub fn next_model(&mut self) -> Result<Option<RawModel>, PdbError> {
        if self.done {
            return Ok(None);
        }

        let mut model = RawModel::default();
        let mut in_model_block = false;

        while let Some(line) = self.lines.next() {
            let line = line?;
            self.line_number += 1;

            match record_name(&line) {
                "MODEL" => {
                    if in_model_block || !model.atoms.is_empty() {
                        return Err(PdbError::Parse {
                            line: self.line_number,
                            kind: PdbParseErrorKind::NestedModel,
                        });
                    }
                    in_model_block = true;
                }
                "ATOM" | "HETATM" => {
                    let (atom, position) = parse_atom_record(&line, self.line_number)?;
                    model.atoms.push(atom);
                    model.positions.push(position);
                }
                "ENDMDL" => return Ok(Some(model)),
                // Some writers separate frames with END instead of MODEL/ENDMDL.
                "END" if !model.atoms.is_empty() => return Ok(Some(model)),
                "END" => {
                    self.done = true;
                    break;
                }
                _ => {}
            }
        }

        self.done = true;
        if model.atoms.is_empty() {
            Ok(None)
        } else {
            Ok(Some(model))
        }
    }
}

fn record_name(line: &str) -> &str {
    line.get(0..6).unwrap_or(line).trim()
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
    line_number: usize,
) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_number,
        kind: PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        },
    })
}

fn parse_atom_record(line: &str, line_number: usize) -> Result<(Atom, Point3<f64>), PdbError> {
    if line.len() < MIN_ATOM_RECORD_LEN {
        return Err(PdbError::Parse {
            line: line_number,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let serial_str = slice_and_trim(line, 6, 11);
    let name = slice_and_trim(line, 12, 16);
    let residue_name = slice_and_trim(line, 17, 20);
    let chain_str = slice_and_trim(line, 21, 22);
    let residue_number_str = slice_and_trim(line, 22, 26);

    if name.is_empty() {
        return Err(PdbError::Parse {
            line: line_number,
            kind: PdbParseErrorKind::MissingRequiredField { columns: "13-16" },
        });
    }
    if residue_name.is_empty() {
        return Err(PdbError::Parse {
            line: line_number,
            kind: PdbParseErrorKind::MissingRequiredField { columns: "18-20" },
        });
    }

    // Serials past 99999 are written as hybrid-36 or asterisks; those become 0.
    let serial = serial_str.parse().unwrap_or(0);
    let residue_number: isize = residue_number_str.parse().map_err(|_| PdbError::Parse {
        line: line_number,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "23-26",
            value: residue_number_str.to_string(),
        },
    })?;

    let x = parse_float(line, 30, 38, "31-38", line_number)?;
    let y = parse_float(line, 38, 46, "39-46", line_number)?;
    let z = parse_float(line, 46, 54, "47-54", line_number)?;

    let chain_id = chain_str.chars().next().unwrap_or('A');
    let mut atom = Atom::new(serial, name, residue_name, residue_number, chain_id);
    atom.element = slice_and_trim(line, 76, 78).to_string();
    atom.hetero = record_name(line) == "HETATM";

    Ok((atom, Point3::new(x, y, z)))
}

/// Reads the first model of a PDB file as a topology plus its coordinates.
///
/// This is how a reference structure (or a separate topology file) is loaded.
///
/// # Errors
///
/// Returns [`PdbError::NoAtoms`] if the file contains no atom records, or the
/// underlying I/O or parse error.
pub fn read_structure(
    path: impl AsRef<Path>,
) -> Result<(Topology, Vec<Point3<f64>>), PdbError> {
    let file = File::open(path)?;
    read_structure_from(BufReader::new(file))
}

pub fn read_structure_from(
    reader: impl BufRead,
) -> Result<(Topology, Vec<Point3<f64>>), PdbError> {
    let model = ModelParser::new(reader)
        .next_model()?
        .ok_or(PdbError::NoAtoms)?;
    Ok((Topology::from_atoms(model.atoms), model.positions))
}
