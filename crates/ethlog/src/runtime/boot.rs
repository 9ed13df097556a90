//! Boot — logging init and config resolution.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::conf::{ConfigError, ConvertConfig};
use crate::sink::Route;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so records routed to stdout stay clean.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ethlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolve the effective configuration.
/// Priority: CLI flags > Environment Variables > Config File > Defaults
pub fn configure(cli: &Cli) -> Result<ConvertConfig, ConfigError> {
    let mut config = ConvertConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().map_err(ConfigError::Invalid)?;

    info!(
        "Loaded configuration: input_dir={}, output={}",
        config.input_dir.display(),
        Route::from_config(&config).describe()
    );
    info!(
        "Record layout: delimiter={:?}, event_type={:?}",
        config.delimiter, config.event_type
    );

    Ok(config)
}
