//! Conf module — configuration model, loading and validation.

pub mod model;
pub mod load;

pub use model::{ConvertConfig, OutputTarget};
pub use load::{ConfigError, CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE};
