use clap::Parser;
use std::path::PathBuf;

/// Translate one column of a Scopus CSV export and insert the result next to it.
///
/// When stdin is piped the CSV is read from stdin; when stdout is piped the
/// result is written to stdout.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "scopus-translate", version)]
pub struct CliArgs {
    /// CSV file with the column to translate [default: ~/Downloads/scopus.csv]
    #[arg(short = 'i', long)]
    pub input_file_path: Option<PathBuf>,

    /// Where to write the result [default: ~/Downloads/scopus_translation.csv]
    #[arg(short = 'o', long)]
    pub output_file_path: Option<PathBuf>,

    /// Column to translate [default: 抄録]
    #[arg(short = 'c', long)]
    pub column: Option<String>,

    /// Translate at most this many papers (must be 1 or more)
    #[arg(short = 'm', long, allow_negative_numbers = true)]
    pub max_lines: Option<i64>,

    /// Replace the output file if it exists instead of picking `name(N).ext`
    #[arg(long)]
    pub overwrite: bool,

    /// Config file [default: ~/.config/scopus-translate/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
