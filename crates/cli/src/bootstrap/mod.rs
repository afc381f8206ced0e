pub mod config;
pub mod data;
pub mod logging;

pub use config::{load_config, log_config};
pub use data::{load_data, load_domains, DataSet};
pub use logging::init_logging;
