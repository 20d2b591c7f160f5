use phf::{Map, phf_map};

/// Coarse classification of PDB records, as far as PIPE cares about them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `ATOM` or `HETATM`.
    Coordinate,
    /// `TER`.
    ChainTerminator,
    /// `END`.
    End,
    /// `MODEL`.
    ModelStart,
    /// `ENDMDL`.
    ModelEnd,
    /// Anything else (headers, remarks, connectivity, ...).
    Other,
}

static RECORD_KINDS: Map<&'static str, RecordKind> = phf_map! {
    "ATOM" => RecordKind::Coordinate,
    "HETATM" => RecordKind::Coordinate,
    "TER" => RecordKind::ChainTerminator,
    "END" => RecordKind::End,
    "MODEL" => RecordKind::ModelStart,
    "ENDMDL" => RecordKind::ModelEnd,
};

/// The record name of a line: columns 1-6 with trailing blanks removed.
pub fn record_name(line: &str) -> &str {
    line.get(..6).unwrap_or(line).trim_end()
}

/// Whether `name` is an `ATOM` record whose serial number has spilled into columns 5-6.
fn is_overflowed_atom(name: &str) -> bool {
    name.strip_prefix("ATOM")
        .map(str::trim_start)
        .is_some_and(|serial| !serial.is_empty() && serial.bytes().all(|b| b.is_ascii_digit()))
}

/// Classifies a line by its record name.
pub fn classify_line(line: &str) -> RecordKind {
    let name = record_name(line);
    match RECORD_KINDS.get(name) {
        Some(&kind) => kind,
        None if is_overflowed_atom(name) => RecordKind::Coordinate,
        None => RecordKind::Other,
    }
}
