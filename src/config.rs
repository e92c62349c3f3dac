//! Startup configuration, read from YAML.
//!
//! ```yaml
//! mode: extended
//! client_name: launchkey-layers
//! layers: [base, mastervol]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::launchkey::Mode;
use crate::layers;

pub const DEFAULT_CLIENT_NAME: &str = "launchkey-layers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Mode requested once the device has been forced to basic.
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    /// Layer identifiers, attached in this order.
    #[serde(default)]
    pub layers: Vec<String>,
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            client_name: default_client_name(),
            layers: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self> {
        // An empty document is a valid, all-default config.
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(Error::Config("client_name must not be empty".into()));
        }
        for id in &self.layers {
            if !layers::is_known(id) {
                return Err(Error::UnknownLayer(id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let config = Config::from_yaml(
            "mode: extended\nclient_name: stage\nlayers:\n  - base\n  - mastervol\n",
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Extended);
        assert_eq!(config.client_name, "stage");
        assert_eq!(config.layers, vec!["base", "mastervol"]);
    }

    #[test]
    fn missing_fields_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        let config = Config::from_yaml("layers: [mastervol]").unwrap();
        assert_eq!(config.mode, Mode::Basic);
        assert_eq!(config.client_name, DEFAULT_CLIENT_NAME);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_yaml("mode: pots"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_yaml("layers: [base, reverb]"),
            Err(Error::UnknownLayer(id)) if id == "reverb"
        ));
        assert!(matches!(
            Config::from_yaml("midi: rtmidi"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode: basic\nlayers: [base]").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.layers, vec!["base"]);

        let missing = file.path().with_extension("missing");
        assert!(matches!(Config::load(&missing), Err(Error::Io(_))));
    }
}
