//! Configuration system

use crate::gui::GuiStyle;
pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Settings applied to every window context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Color style applied to new contexts
    pub style: GuiStyle,
    /// Host wheel units per notch, overriding the platform default
    pub wheel_delta: Option<f32>,
    /// Platform name reported to the library
    pub platform_name: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            style: GuiStyle::Dark,
            wheel_delta: None,
            platform_name: "imgui_host".to_string(),
        }
    }
}

impl Config for ContextConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_config_from_toml() {
        let config: ContextConfig = toml::from_str("style = \"Light\"\nwheel_delta = 40.0\n").unwrap();
        assert_eq!(config.style, GuiStyle::Light);
        assert_eq!(config.wheel_delta, Some(40.0));
        assert_eq!(config.platform_name, "imgui_host");
    }

    #[test]
    fn test_context_config_from_ron() {
        let config: ContextConfig = ron::from_str("(style: Classic, platform_name: \"custom\")").unwrap();
        assert_eq!(config.style, GuiStyle::Classic);
        assert_eq!(config.wheel_delta, None);
        assert_eq!(config.platform_name, "custom");
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let path = std::env::temp_dir().join("imgui_host_config_test.json");
        std::fs::write(&path, "{}").unwrap();

        let result = ContextConfig::load_from_file(path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_save_and_load_toml() {
        let path = std::env::temp_dir().join("imgui_host_config_roundtrip.toml");
        let path = path.to_str().unwrap();
        let config = ContextConfig { style: GuiStyle::Light, wheel_delta: Some(30.0), ..ContextConfig::default() };

        config.save_to_file(path).unwrap();
        assert_eq!(ContextConfig::load_from_file(path).unwrap(), config);
        let _ = std::fs::remove_file(path);
    }
}
