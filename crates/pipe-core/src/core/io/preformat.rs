use crate::core::utils::records::{RecordKind, classify_line};
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const TER_LINE: &str = "TER";
pub const END_LINE: &str = "END";

#[derive(Debug, Error)]
pub enum PreformatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Input contains no ATOM/HETATM, TER or END records")]
    NoRecords,
}

/// Where the classifier stands relative to the last line it emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// The last emitted line was a coordinate record (or nothing was emitted yet).
    #[default]
    InBody,
    /// The last emitted line was `TER` or `END`.
    SeenTerminator,
}

/// Line filter that reduces a PDB file to coordinate records and clean terminators.
///
/// `MODEL`/`ENDMDL` and all non-coordinate records are dropped, `TER`/`END` records are
/// normalised to the bare keyword, and [`LineClassifier::finish`] supplies the closing
/// `TER`/`END` pair when the input did not end on a terminator.
#[derive(Debug, Default)]
pub struct LineClassifier {
    state: LineState,
    emitted: usize,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn state(&self) -> LineState {
        self.state
    }

    /// Number of lines emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Classifies one input line and returns what should be written for it, if anything.
    pub fn feed<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        let output = match classify_line(line) {
            RecordKind::Coordinate => {
                self.state = LineState::InBody;
                line
            }
            RecordKind::ChainTerminator => {
                self.state = LineState::SeenTerminator;
                TER_LINE
            }
            RecordKind::End => {
                self.state = LineState::SeenTerminator;
                END_LINE
            }
            RecordKind::ModelStart | RecordKind::ModelEnd | RecordKind::Other => return None,
        };
        self.emitted += 1;
        Some(output)
    }

    /// Lines to append once the input is exhausted.
    pub fn finish(&self) -> &'static [&'static str] {
        match self.state {
            LineState::InBody => &[TER_LINE, END_LINE],
            LineState::SeenTerminator => &[],
        }
    }
}

/// Outcome of a pre-formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreformatSummary {
    /// Lines copied or normalised from the input.
    pub records_written: usize,
    /// Whether a closing `TER`/`END` pair had to be added.
    pub terminators_added: bool,
}

/// Streams `reader` through a [`LineClassifier`] into `writer`.
///
/// # Errors
///
/// Returns [`PreformatError::NoRecords`] when nothing in the input survives filtering, or
/// an I/O error from either side.
pub fn preformat(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> Result<PreformatSummary, PreformatError> {
    let mut classifier = LineClassifier::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(output) = classifier.feed(&line) {
            writeln!(writer, "{}", output)?;
        }
    }

    if classifier.emitted() == 0 {
        return Err(PreformatError::NoRecords);
    }

    let trailer = classifier.finish();
    for line in trailer {
        writeln!(writer, "{}", line)?;
    }

    Ok(PreformatSummary {
        records_written: classifier.emitted(),
        terminators_added: !trailer.is_empty(),
    })
}
