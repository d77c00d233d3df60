pub mod cli;
pub mod options;
pub mod settings;

pub use cli::CliArgs;
pub use options::{Environment, InputSource, OutputTarget, RunOptions};
pub use settings::{load_env_file, Config, ConfigError, IoConfig, TranslationConfig};
