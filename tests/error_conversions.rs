use scopus_translate::command::CommandError;
use scopus_translate::config::ConfigError;
use scopus_translate::error::{AppError, AppResult};
use scopus_translate::table::{ReadError, TableError, WriteError};
use scopus_translate::translate::TranslateError;
use std::error::Error;
use std::path::PathBuf;

/// Test that ConfigError converts to AppError::Config
#[test]
fn test_config_error_converts_to_app_error() {
    let config_err = ConfigError::HomeNotFound;
    let app_err: AppError = config_err.into();
    assert!(matches!(app_err, AppError::Config(_)));
}

/// Test that CommandError converts to AppError::Command
#[test]
fn test_command_error_converts_to_app_error() {
    let command_err = CommandError::ColumnNotFound("抄録".to_string());
    let app_err: AppError = command_err.into();
    assert!(matches!(app_err, AppError::Command(_)));
}

/// Test that module errors convert into CommandError
#[test]
fn test_module_errors_convert_to_command_error() {
    let read: CommandError = ReadError::InputNotFound(PathBuf::from("in.csv")).into();
    assert!(matches!(read, CommandError::Read(_)));

    let translate: CommandError = TranslateError::Authorization.into();
    assert!(matches!(translate, CommandError::Translate(_)));

    let write: CommandError = WriteError::NoAlternatePath(PathBuf::from("out.csv")).into();
    assert!(matches!(write, CommandError::Write(_)));

    let table: CommandError = TableError::DuplicateColumn("x".to_string()).into();
    assert!(matches!(table, CommandError::Table(_)));
}

/// Test that configuration errors exit with 2 and the rest with 1
#[test]
fn test_exit_codes() {
    let config: AppError = ConfigError::InvalidValue("max".to_string()).into();
    assert_eq!(config.exit_code(), 2);

    let missing: AppError = CommandError::ColumnNotFound("abstract".to_string()).into();
    assert_eq!(missing.exit_code(), 1);

    let auth: AppError = CommandError::from(TranslateError::Authorization).into();
    assert_eq!(auth.exit_code(), 1);
}

/// Test that messages reach the user without extra wrapping
#[test]
fn test_command_errors_display_transparently() {
    let app_err: AppError = CommandError::from(ReadError::InputNotFound(PathBuf::from(
        "/home/u/Downloads/scopus.csv",
    )))
    .into();
    assert_eq!(
        app_err.to_string(),
        "Input file /home/u/Downloads/scopus.csv does not exist"
    );
}

/// Test that user-facing translation messages point at the fix
#[test]
fn test_translation_messages_are_actionable() {
    let connectivity = TranslateError::Connectivity("dns error".to_string());
    assert!(connectivity.to_string().contains("network"));

    let auth = TranslateError::Authorization;
    assert!(auth.to_string().contains("API key"));
}

/// Test that the column name appears in the message
#[test]
fn test_column_not_found_names_column() {
    let err = CommandError::ColumnNotFound("Abstract".to_string());
    assert!(err.to_string().contains("'Abstract'"));
}

/// Test that the configuration prefix is kept
#[test]
fn test_app_error_config_display() {
    let app_err = AppError::Config(ConfigError::MissingApiKey("DEEPL_API_KEY".to_string()));
    let msg = format!("{}", app_err);
    assert!(msg.contains("Configuration error"));
    assert!(msg.contains("DEEPL_API_KEY"));
}

/// Test that a malformed .env file exits like any other configuration error
#[test]
fn test_env_file_error_is_configuration_error() {
    let app_err = AppError::from(ConfigError::EnvFile("line 1: invalid".to_string()));
    assert_eq!(app_err.exit_code(), 2);
    assert!(format!("{}", app_err).contains(".env"));
}

/// Test that error source is preserved
#[test]
fn test_error_source_preserved() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let read_err = ReadError::Open {
        path: PathBuf::from("in.csv"),
        source: io_err,
    };
    assert!(read_err.source().is_some());

    let config_err = ConfigError::ReadError(std::io::Error::new(std::io::ErrorKind::Other, "x"));
    let app_err: AppError = config_err.into();
    assert!(app_err.source().is_some());
}

/// Test that ? operator works with AppError
#[test]
fn test_question_mark_operator() {
    fn may_fail() -> Result<(), CommandError> {
        Err(CommandError::ColumnNotFound("abstract".to_string()))
    }

    fn outer() -> AppResult<()> {
        may_fail()?;
        Ok(())
    }

    let result = outer();
    assert!(matches!(result.unwrap_err(), AppError::Command(_)));
}
