    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.providers.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
        assert_eq!(config.providers.on_device.top_k, 3);
        assert_eq!(config.executor.strategy, StrategyPreference::Auto);
        assert_eq!(config.executor.world, WorldPreference::Isolated);
        assert_eq!(config.executor.unregister_delay_ms, 3000);
        assert_eq!(config.summary.max_chars, 15_000);
        assert!(config.summary.overlay);
        assert!(config.browser.direct_call);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_privileged_schemes() {
        let config = ExecutorConfig::default();
        for scheme in ["chrome", "chrome-extension", "edge", "about", "devtools"] {
            assert!(config.privileged_schemes.iter().any(|s| s == scheme), "{}", scheme);
        }
        assert!(!config.privileged_schemes.iter().any(|s| s == "https"));
    }

    #[test]
    fn test_low_temperature_defaults() {
        let config = ProvidersConfig::default();
        assert!(config.on_device.temperature >= 0.1 && config.on_device.temperature <= 0.3);
        assert!(config.gemini.temperature <= 0.3);
        assert_eq!(config.gemini.max_output_tokens, 2048);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [providers.gemini]
            model = "gemini-1.5-pro"
            "#,
        )
        .unwrap();
        assert_eq!(config.providers.gemini.model, "gemini-1.5-pro");
        assert!(config.providers.gemini.base_url.contains("generativelanguage"));
        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_strategy_preference_parsing() {
        let config: Config = toml::from_str(
            r#"
            [executor]
            strategy = "registration"
            world = "main"
            "#,
        )
        .unwrap();
        assert_eq!(config.executor.strategy, StrategyPreference::Registration);
        assert_eq!(config.executor.world, WorldPreference::Main);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [executor]
            strategy = "magic"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_pagescript_home() {
        assert!(pagescript_home().ends_with(".pagescript"));
        assert!(LoggingConfig::default().dir.ends_with("logs"));
    }
