use crate::config::LoggingConfig;
use crate::{GameError, Result};
use flexi_logger::{opt_format, Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

/// Start the global logger. Keep the returned handle alive for as long as logs are wanted.
///
/// The level comes from `RUST_LOG`, falling back to `config.level`. With a
/// `log_dir` the output goes to size-rotated files, otherwise to stderr.
pub fn setup_logging(config: &LoggingConfig) -> Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(&config.level)
        .map_err(|e| GameError::Logging(e.to_string()))?
        .format(opt_format);

    let logger = match &config.log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .rotate(
                Criterion::Size(config.rotate_bytes),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config.keep_files),
            ),
        None => logger,
    };

    logger
        .start()
        .map_err(|e| GameError::Logging(e.to_string()))
}
