use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents an atom parsed from a coordinate record.
///
/// Besides its position, an atom carries the per-atom annotations PIPE reads from
/// prediction servers: EpiPred and i-Patch both write their residue scores into the
/// B-factor column, so the B-factor is what hot-residue selection looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "O").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy of this atom position.
    pub occupancy: f64,
    /// Temperature factor, or the prediction score stored in its place.
    pub b_factor: f64,
    /// Element symbol (columns 77-78), empty when the file leaves it blank.
    pub element: String,
    /// Whether the atom came from a `HETATM` record.
    pub is_hetero: bool,
}

impl Atom {
    /// Creates a new `Atom` with default values for the optional annotations.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            residue_id,
            position,
            occupancy: 1.0,
            b_factor: 0.0,
            element: String::new(),
            is_hetero: false,
        }
    }
}
