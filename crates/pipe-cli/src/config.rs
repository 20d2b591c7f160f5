pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{
    build_epitope_config, build_filter_config, build_paratope_config, load_file_config,
};
pub use file::FileConfig;
