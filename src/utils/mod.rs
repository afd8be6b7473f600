pub mod environment;
pub mod paths;

pub use environment::{EnvLookup, home_dir, process_env};
pub use paths::{expand_tilde, format_path_with_tilde};
