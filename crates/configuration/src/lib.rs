use std::path::Path;

// Declare the modules that make up this crate.
pub mod dataset;
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use dataset::Dataset;
pub use error::ConfigError;
pub use settings::{Config, IndicatorSettings, LoggingSettings, OutputFormat, VolatilitySettings};
pub use telemetry::init_tracing;

/// Prefix for environment overrides, e.g. `ECON_PULSE__INDICATORS__EXCEPTIONAL_THRESHOLD`.
const ENV_PREFIX: &str = "ECON_PULSE";

/// Loads the application configuration.
///
/// The file at `path` is optional: a missing file yields the defaults, still
/// subject to environment overrides. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Loads a dataset of entity series. The format is inferred from the file
/// extension (`.toml` or `.json`), and the file must exist.
pub fn load_dataset(path: &Path) -> Result<Dataset, ConfigError> {
    let dataset = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?
        .try_deserialize::<Dataset>()?;

    Ok(dataset)
}
