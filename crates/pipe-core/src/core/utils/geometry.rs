use nalgebra::Point3;

/// Whether two points lie strictly closer than `cutoff` Angstroms.
pub fn is_within(p1: &Point3<f64>, p2: &Point3<f64>, cutoff: f64) -> bool {
    nalgebra::distance_squared(p1, p2) < cutoff * cutoff
}
