mod core;
mod loader;

pub use core::SigCompareConfig;
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
