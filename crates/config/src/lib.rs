mod args;
mod error;
mod export;
mod log;
mod substrate;

pub use args::{Args, RangeError};
pub use error::ConfigError;
pub use export::ExportConfig;
pub use log::LogConfig;
pub use substrate::SubstrateConfig;

/// Process-wide configuration, loaded from the environment.
///
/// Each section maps to a group of `BEX_`-prefixed variables, e.g.
/// `BEX_SUBSTRATE_URL`, `BEX_EXPORT_OUT_DIR` or `BEX_LOG_LEVEL`.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub substrate: SubstrateConfig,
    pub export: ExportConfig,
    pub log: LogConfig,
}

impl ExporterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            substrate: envy::prefixed("BEX_SUBSTRATE_").from_env::<SubstrateConfig>()?,
            export: envy::prefixed("BEX_EXPORT_").from_env::<ExportConfig>()?,
            log: envy::prefixed("BEX_LOG_").from_env::<LogConfig>()?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.substrate.validate()?;
        self.export.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            substrate: SubstrateConfig::default(),
            export: ExportConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExporterConfig::default();
        assert_eq!(config.substrate.url, "ws://127.0.0.1:9944");
        assert_eq!(config.export.out_dir, ".");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults() {
        unsafe {
            std::env::remove_var("BEX_SUBSTRATE_URL");
            std::env::remove_var("BEX_EXPORT_OUT_DIR");
            std::env::remove_var("BEX_LOG_LEVEL");
        }
        let config = ExporterConfig::from_env().unwrap();
        assert_eq!(config.substrate.url, "ws://127.0.0.1:9944");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_reads_prefixed_variables() {
        unsafe {
            std::env::set_var("BEX_SUBSTRATE_URL", "wss://rpc.example.io");
            std::env::set_var("BEX_LOG_LEVEL", "debug");
        }
        let config = ExporterConfig::from_env().unwrap();
        assert_eq!(config.substrate.url, "wss://rpc.example.io");
        assert_eq!(config.log.level, "debug");
        unsafe {
            std::env::remove_var("BEX_SUBSTRATE_URL");
            std::env::remove_var("BEX_LOG_LEVEL");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_rejects_invalid_values() {
        unsafe {
            std::env::set_var("BEX_SUBSTRATE_URL", "ftp://somewhere:21");
        }
        assert!(ExporterConfig::from_env().is_err());
        unsafe {
            std::env::remove_var("BEX_SUBSTRATE_URL");
        }
    }
}
