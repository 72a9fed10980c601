pub mod io;
pub mod schema;
pub mod validation;

pub use io::{config_dir, config_file_path, ensure_upload_root, load_config};
pub use schema::FilehostConfig;
pub use validation::{validate, ValidationReport};
