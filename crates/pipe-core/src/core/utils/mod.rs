pub mod geometry;
pub mod records;
