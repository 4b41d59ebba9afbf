//! Configuration for the inheritance add-on.

use inherit_editor::EditorConfig;
use inherit_gate::GateConfig;
use serde::{Deserialize, Serialize};

use crate::error::HostAdapterResult;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InheritConfig {
    /// Access gate configuration
    #[serde(default)]
    pub gate: GateConfig,

    /// Authoring surface configuration
    #[serde(default)]
    pub editor: EditorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl InheritConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `INHERIT_`-prefixed environment variables (`__` between sections,
    /// e.g. `INHERIT_GATE__CREDENTIAL_NAME`).
    pub fn load(path: Option<&str>) -> HostAdapterResult<Self> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&InheritConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("INHERIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
