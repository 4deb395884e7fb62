//! Tests for the logger module

use crate::logger::config::*;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.colored);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Full);
    }

    #[test]
    fn test_config_validation() {
        let config = LoggerConfig::default().with_level("debug");
        assert!(config.validate().is_ok());

        let config = LoggerConfig::default().with_level("loud");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_level_is_case_insensitive() {
        let config = LoggerConfig::default().with_level("WARN");
        assert_eq!(config.parse_level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.as_str(), "json");
    }

    #[test]
    fn test_log_format_serde() {
        let json = serde_json::to_string(&LogFormat::Compact).unwrap();
        assert_eq!(json, "\"compact\"");
        let format: LogFormat = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(format, LogFormat::Full);
    }
}

#[cfg(test)]
mod init_tests {
    use super::*;
    use crate::logger::init_logger;

    #[test]
    fn test_init_rejects_invalid_level() {
        let config = LoggerConfig::default().with_level("nope");
        assert!(init_logger(&config).is_err());
    }

    #[test]
    fn test_second_init_fails_without_panicking() {
        let config = LoggerConfig {
            colored: false,
            ..Default::default()
        };
        // Another test may already have installed a subscriber; either way a
        // second attempt must report an error instead of panicking.
        let _ = init_logger(&config);
        assert!(init_logger(&config).is_err());
    }
}
