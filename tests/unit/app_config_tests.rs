/*!
 * Tests for application configuration functionality
 */

use sentistream::app_config::{Config, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.canonical_language, "en");
    assert_eq!(config.sinks.sentiment_stream, "sentiment-records");
    assert_eq!(config.sinks.entity_stream, "entity-records");
    assert_eq!(config.sinks.timeout_secs, 30);
    assert_eq!(config.translator.timeout_secs, 30);
    assert_eq!(config.analyzer.timeout_secs, 30);
    assert_eq!(config.blob_store.timeout_secs, 60);
    assert!(config.blob_store.endpoint.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);

    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // Start with a valid config
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Invalid canonical language
    config.canonical_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.canonical_language = "en".to_string();

    // Missing translator endpoint
    config.translator.endpoint = "".to_string();
    assert!(config.validate().is_err());
    config.translator.endpoint = "http://localhost:4571".to_string();

    // Unparseable analyzer endpoint
    config.analyzer.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.analyzer.endpoint = "http://localhost:4572".to_string();

    // Stream name with characters the sink service rejects
    config.sinks.sentiment_stream = "bad stream!".to_string();
    assert!(config.validate().is_err());
    config.sinks.sentiment_stream = "sentiment-records".to_string();

    // The two streams must be distinct sinks
    config.sinks.entity_stream = config.sinks.sentiment_stream.clone();
    assert!(config.validate().is_err());
    config.sinks.entity_stream = "entity-records".to_string();

    assert!(config.validate().is_ok());
}

/// Test loading a config with omitted optional fields
#[test]
fn test_config_deserialization_withMinimalJson_shouldApplyDefaults() {
    let json = r#"{
        "sinks": { "endpoint": "http://streams.internal:4573" },
        "translator": { "endpoint": "http://translate.internal" },
        "analyzer": { "endpoint": "http://analyze.internal" }
    }"#;

    let config: Config = serde_json::from_str(json).expect("minimal config should parse");
    assert_eq!(config.canonical_language, "en");
    assert_eq!(config.sinks.sentiment_stream, "sentiment-records");
    assert_eq!(config.sinks.entity_stream, "entity-records");
    assert!(config.translator.api_key.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test that a config round-trips through JSON
#[test]
fn test_config_serialization_withDefaultConfig_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).expect("config should serialize");
    let parsed: Config = serde_json::from_str(&json).expect("serialized config should parse");

    assert_eq!(parsed.canonical_language, config.canonical_language);
    assert_eq!(parsed.sinks.sentiment_stream, config.sinks.sentiment_stream);
    assert_eq!(parsed.sinks.entity_stream, config.sinks.entity_stream);
    assert_eq!(parsed.log_level, config.log_level);
}

/// Test log level parsing from config JSON
#[test]
fn test_log_level_deserialization_withLowercaseNames_shouldParse() {
    let json = r#"{
        "sinks": { "endpoint": "http://localhost:4573" },
        "translator": { "endpoint": "http://localhost:4571" },
        "analyzer": { "endpoint": "http://localhost:4572" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json).expect("config should parse");
    assert_eq!(config.log_level, LogLevel::Debug);
}
