use crate::command::TranslationSettings;
use crate::config::cli::CliArgs;
use crate::config::settings::{home_dir, Config, ConfigError};
use std::io::IsTerminal;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

const DEFAULT_INPUT_FILE: &str = "scopus.csv";
const DEFAULT_OUTPUT_FILE: &str = "scopus_translation.csv";

/// Where the input table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

/// Where the output table goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File { path: PathBuf, overwrite: bool },
    Stdout,
}

/// Platform facts the run depends on, gathered in one place
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub home: Option<PathBuf>,
    pub stdin_is_terminal: bool,
    pub stdout_is_terminal: bool,
    pub api_key: Option<String>,
}

impl Environment {
    /// Query the current process
    pub fn detect(config: &Config) -> Self {
        Self {
            home: home_dir(),
            stdin_is_terminal: std::io::stdin().is_terminal(),
            stdout_is_terminal: std::io::stdout().is_terminal(),
            api_key: config.get_api_key(),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: InputSource,
    pub output: OutputTarget,
    pub translation: TranslationSettings,
    pub api_key: String,
    pub api_url: Option<String>,
}

impl RunOptions {
    /// Merge flags over config, then route I/O according to the environment.
    ///
    /// Every configuration error surfaces here, before any file is touched.
    pub fn resolve(args: &CliArgs, config: &Config, env: &Environment) -> Result<Self, ConfigError> {
        let max_rows = parse_max_rows(args.max_lines)?;

        let mut config = config.clone();
        if let Some(column) = &args.column {
            config.io.column = column.clone();
        }
        config.validate()?;

        let api_key = env
            .api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingApiKey(config.translation.api_key_env.clone()))?;

        let input = if env.stdin_is_terminal {
            let path = match &args.input_file_path {
                Some(path) => path.clone(),
                None => default_path(config.io.input_path.as_deref(), env, DEFAULT_INPUT_FILE)?,
            };
            InputSource::File(path)
        } else {
            InputSource::Stdin
        };

        let output = if env.stdout_is_terminal {
            let path = match &args.output_file_path {
                Some(path) => path.clone(),
                None => default_path(config.io.output_path.as_deref(), env, DEFAULT_OUTPUT_FILE)?,
            };
            OutputTarget::File {
                path,
                overwrite: args.overwrite || config.io.overwrite,
            }
        } else {
            OutputTarget::Stdout
        };

        Ok(Self {
            input,
            output,
            translation: TranslationSettings {
                column: config.io.column,
                column_suffix: config.translation.column_suffix,
                max_rows,
            },
            api_key,
            api_url: config.translation.api_url,
        })
    }
}

/// `None` means no limit; zero or negative values are rejected
pub fn parse_max_rows(max_lines: Option<i64>) -> Result<Option<NonZeroUsize>, ConfigError> {
    match max_lines {
        None => Ok(None),
        Some(value) => usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Some)
            .ok_or_else(|| {
                ConfigError::InvalidValue(format!("--max-lines must be 1 or more, got {}", value))
            }),
    }
}

fn default_path(
    configured: Option<&Path>,
    env: &Environment,
    file_name: &str,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = configured {
        return Ok(expand_home(path, env));
    }
    let home = env.home.as_ref().ok_or(ConfigError::HomeNotFound)?;
    Ok(home.join("Downloads").join(file_name))
}

fn expand_home(path: &Path, env: &Environment) -> PathBuf {
    match (path.strip_prefix("~"), &env.home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
