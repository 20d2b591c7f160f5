use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::ResidueId;
use crate::core::models::structure::{Structure, StructureBuilder};
use crate::core::utils::records::{RecordKind, classify_line};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::trace;

/// Coordinate records must reach at least the end of the z column.
const MIN_COORDINATE_LINE_LEN: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| *c != ' ')
}

fn parse_int(line: &str, line_num: usize, start: usize, end: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Like [`parse_float`], but a blank field yields `default`.
fn parse_optional_float(
    line: &str,
    line_num: usize,
    start: usize,
    end: usize,
    default: f64,
) -> Result<f64, PdbError> {
    if slice_and_trim(line, start, end).is_empty() {
        Ok(default)
    } else {
        parse_float(line, line_num, start, end)
    }
}

/// Reader for fixed-column PDB files.
///
/// Only coordinate records are interpreted. Reading stops at the end of the first model
/// (`ENDMDL`) or at `END`, and alternate locations other than blank or `A` are skipped.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut builder = StructureBuilder::new();

        let mut current_chain: Option<char> = None;
        let mut current_residue: Option<(isize, Option<char>)> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match classify_line(&line) {
                RecordKind::Coordinate => {}
                RecordKind::ModelEnd | RecordKind::End => break,
                _ => continue,
            }

            if line.len() < MIN_COORDINATE_LINE_LEN {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::LineTooShort,
                });
            }

            if let Some(alt_loc) = column_char(&line, 16) {
                if alt_loc != 'A' {
                    trace!(line = line_num, %alt_loc, "Skipping alternate location.");
                    continue;
                }
            }

            let name = slice_and_trim(&line, 12, 16);
            if name.is_empty() {
                return Err(PdbError::Parse {
                    line: line_num,
                    kind: PdbParseErrorKind::MissingRequiredField {
                        columns: "13-16".into(),
                    },
                });
            }
            let res_name = slice_and_trim(&line, 17, 20);
            let chain_id = line
                .get(21..22)
                .and_then(|s| s.chars().next())
                .unwrap_or(' ');
            let is_hetero = line.starts_with("HETATM");
            // ATOM serials past 99999 run into the record-name columns.
            let serial_start = if is_hetero { 6 } else { 4 };
            let serial = parse_int(&line, line_num, serial_start, 11)?;
            let res_number = parse_int(&line, line_num, 22, 26)?;
            let insertion_code = column_char(&line, 26);
            let x = parse_float(&line, line_num, 30, 38)?;
            let y = parse_float(&line, line_num, 38, 46)?;
            let z = parse_float(&line, line_num, 46, 54)?;
            let occupancy = parse_optional_float(&line, line_num, 54, 60, 1.0)?;
            let b_factor = parse_optional_float(&line, line_num, 60, 66, 0.0)?;
            let element = slice_and_trim(&line, 76, 78);

            if current_chain != Some(chain_id) {
                builder.start_chain(chain_id);
                current_chain = Some(chain_id);
                current_residue = None;
            }
            if current_residue != Some((res_number, insertion_code)) {
                builder.start_residue(res_number, insertion_code, res_name);
                current_residue = Some((res_number, insertion_code));
            }

            let atom = Atom {
                serial: serial.max(0) as usize,
                name: name.to_string(),
                residue_id: ResidueId::default(),
                position: Point3::new(x, y, z),
                occupancy,
                b_factor,
                element: element.to_string(),
                is_hetero,
            };
            builder.add_atom(atom);
        }

        if builder.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(builder.build())
    }
}
