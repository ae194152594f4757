//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_providers(config, &mut result);
        Self::validate_executor(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_summary(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        let providers = &config.providers;

        Self::check_temperature("providers.gemini.temperature", providers.gemini.temperature, result);
        Self::check_temperature("providers.openai.temperature", providers.openai.temperature, result);
        Self::check_temperature(
            "providers.on_device.temperature",
            providers.on_device.temperature,
            result,
        );

        Self::check_http_url("providers.gemini.base_url", &providers.gemini.base_url, result);
        Self::check_http_url("providers.openai.api_url", &providers.openai.api_url, result);
        Self::check_http_url("providers.on_device.base_url", &providers.on_device.base_url, result);

        for (path, model) in [
            ("providers.gemini.model", &providers.gemini.model),
            ("providers.openai.model", &providers.openai.model),
            ("providers.on_device.model", &providers.on_device.model),
        ] {
            if model.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Model cannot be empty"));
            }
        }

        if providers.gemini.max_output_tokens == 0 || providers.openai.max_output_tokens == 0 {
            result.add_error(ValidationError::new(
                "providers.max_output_tokens",
                "max_output_tokens must be greater than 0",
            ));
        }

        if providers.on_device.top_k == 0 {
            result.add_error(ValidationError::new(
                "providers.on_device.top_k",
                "top_k must be greater than 0",
            ));
        } else if providers.on_device.top_k > 40 {
            result.add_warning(ValidationWarning::new(
                "providers.on_device.top_k",
                "top_k is high (>40), generated code may be less predictable",
            ));
        }
    }

    fn validate_executor(config: &Config, result: &mut ValidationResult) {
        let executor = &config.executor;

        if executor.unregister_delay_ms == 0 {
            result.add_error(ValidationError::new(
                "executor.unregister_delay_ms",
                "unregister_delay_ms must be greater than 0, the reload needs time to run the script",
            ));
        } else if executor.unregister_delay_ms > 60_000 {
            result.add_warning(ValidationWarning::new(
                "executor.unregister_delay_ms",
                "unregister_delay_ms is very high (>60s), the script may run on unrelated navigations",
            ));
        }

        if executor.privileged_schemes.is_empty() {
            result.add_warning(ValidationWarning::new(
                "executor.privileged_schemes",
                "No privileged schemes configured, browser-internal pages will not be refused",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        Self::check_http_url("browser.endpoint", &config.browser.endpoint, result);

        if config.browser.world_name.trim().is_empty() {
            result.add_error(ValidationError::new(
                "browser.world_name",
                "world_name cannot be empty",
            ));
        }
    }

    fn validate_summary(config: &Config, result: &mut ValidationResult) {
        if config.summary.max_chars == 0 {
            result.add_error(ValidationError::new(
                "summary.max_chars",
                "max_chars must be greater than 0",
            ));
        }

        if config.summary.language.trim().is_empty() {
            result.add_error(ValidationError::new(
                "summary.language",
                "language cannot be empty",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }
    }

    fn check_temperature(path: &str, value: f32, result: &mut ValidationResult) {
        if !(0.0..=2.0).contains(&value) {
            result.add_error(ValidationError::new(
                path,
                "temperature must be between 0.0 and 2.0",
            ));
        }
    }

    fn check_http_url(path: &str, url: &str, result: &mut ValidationResult) {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                path,
                "URL must start with http:// or https://",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
