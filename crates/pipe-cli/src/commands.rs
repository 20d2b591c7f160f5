pub mod epitope;
pub mod filter;
pub mod name_clusters;
pub mod paratope;
pub mod preformat;
