//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::{pagescript_home, Config};

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default configuration file location (`~/.pagescript/config.toml`).
    pub fn default_path() -> PathBuf {
        pagescript_home().join("config.toml")
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when the file
    /// does not exist. Parse errors are still reported.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "env".to_string(),
            message: e.to_string(),
        })?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.pagescript`).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.executor.unregister_delay_ms, 3000);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [storage]
            path = "/tmp/pagescript.json"

            [providers.on_device]
            model = "llama3.2:1b"
            top_k = 5

            [executor]
            strategy = "main"
            unregister_delay_ms = 5000

            [browser]
            endpoint = "http://localhost:9333"
            direct_call = false

            [summary]
            language = "Japanese"
            max_chars = 8000
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.storage.path, "/tmp/pagescript.json");
        assert_eq!(config.providers.on_device.model, "llama3.2:1b");
        assert_eq!(config.providers.on_device.top_k, 5);
        assert_eq!(config.executor.unregister_delay_ms, 5000);
        assert_eq!(config.browser.endpoint, "http://localhost:9333");
        assert!(!config.browser.direct_call);
        assert_eq!(config.summary.language, "Japanese");
        assert_eq!(config.summary.max_chars, 8000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[summary]").unwrap();
        writeln!(file, "max_chars = 500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.summary.max_chars, 500);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.summary.max_chars, 15_000);
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid = [unclosed").unwrap();
        assert!(ConfigLoader::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("PAGESCRIPT_TEST_CONFIG_VAR", "test_value");
        }
        let content = "value = \"${PAGESCRIPT_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("test_value"));
        unsafe {
            std::env::remove_var("PAGESCRIPT_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${PAGESCRIPT_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/usr/local/bin"), PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("test"));
    }

    #[test]
    fn test_default_path() {
        assert!(ConfigLoader::default_path().ends_with(".pagescript/config.toml"));
    }
}
