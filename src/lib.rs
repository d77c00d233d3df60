pub mod command;
pub mod config;
pub mod error;
pub mod table;
pub mod translate;

// Re-export commonly used types for convenience
pub use command::{CommandError, TranslationCommand, TranslationSettings};
pub use config::{CliArgs, Config, ConfigError, Environment, InputSource, OutputTarget, RunOptions};
pub use error::{AppError, AppResult};
pub use table::{RowTable, TableReader, TableWriter};
pub use translate::{DeepLClient, TranslateError, Translator};

use std::path::PathBuf;
use table::{FileReader, FileWriter, StreamReader, StreamWriter};

/// Build the reader, writer and translator described by `options`
pub fn build_command(options: RunOptions) -> TranslationCommand {
    let reader: Box<dyn TableReader> = match options.input {
        InputSource::File(path) => Box::new(FileReader::new(path)),
        InputSource::Stdin => Box::new(StreamReader::stdin()),
    };

    let writer: Box<dyn TableWriter> = match options.output {
        OutputTarget::File { path, overwrite } => {
            Box::new(FileWriter::new(path).with_overwrite(overwrite))
        }
        OutputTarget::Stdout => Box::new(StreamWriter::stdout()),
    };

    let mut client = DeepLClient::new(options.api_key);
    if let Some(url) = options.api_url {
        client = client.with_endpoint(url);
    }

    TranslationCommand::new(reader, writer, Box::new(client), options.translation)
}

/// Resolve options from flags, config file and environment, then run once.
///
/// Returns the path of the written file when output went to a file.
pub async fn run(args: CliArgs) -> AppResult<Option<PathBuf>> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let env = Environment::detect(&config);
    let options = RunOptions::resolve(&args, &config, &env)?;

    let mut command = build_command(options);
    Ok(command.execute().await?)
}
