//! Fixture helpers shared by unit tests.

use std::path::{Path, PathBuf};

/// Formats a fixed-column `ATOM` record.
pub(crate) fn atom_line(
    serial: usize,
    name: &str,
    res_name: &str,
    chain: char,
    res_seq: isize,
    pos: (f64, f64, f64),
    b_factor: f64,
) -> String {
    format!(
        "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        serial,
        name,
        res_name,
        chain,
        res_seq,
        pos.0,
        pos.1,
        pos.2,
        1.0,
        b_factor,
        &name[..1]
    )
}

/// One alpha carbon per residue: `(res_name, chain, res_seq, position, b_factor)`.
pub(crate) type CaSpec<'a> = (&'a str, char, isize, (f64, f64, f64), f64);

/// Builds PDB text with a single `CA` atom per residue and a closing `END`.
pub(crate) fn ca_only_pdb(residues: &[CaSpec<'_>]) -> String {
    let mut lines: Vec<String> = residues
        .iter()
        .enumerate()
        .map(|(i, &(name, chain, seq, pos, b))| atom_line(i + 1, "CA", name, chain, seq, pos, b))
        .collect();
    lines.push("END".to_string());
    lines.join("\n") + "\n"
}

/// Writes a CA-only PDB file named `<stem>.pdb` into `dir`.
pub(crate) fn write_ca_only_pdb(dir: &Path, stem: &str, residues: &[CaSpec<'_>]) -> PathBuf {
    let path = dir.join(format!("{}.pdb", stem));
    std::fs::write(&path, ca_only_pdb(residues)).unwrap();
    path
}
