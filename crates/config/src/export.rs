use crate::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory the export file is written into
    ///
    /// Env: BEX_EXPORT_OUT_DIR
    /// Default: . (the working directory)
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_out_dir() -> String {
    ".".to_string()
}

impl ExportConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.out_dir.is_empty() {
            return Err(ConfigError::ValidateError(
                "Export directory cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
        }
    }
}
