/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use section1983::app_config::{Config, LogLevel, SectionAiConfig};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert!(config.ai.enabled);
    assert_eq!(config.billing.price_pay_per_doc, 149.0);
    assert_eq!(config.billing.price_unlimited, 499.0);
    assert_eq!(config.billing.free_api_cost_limit, 0.50);
    assert_eq!(config.referral.default_referral_discount_percentage, 25.0);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.database_path().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_aiSection_withDisabledSections_shouldOnlyExposeEnabledOnes() {
    let mut config = Config::default();

    for section in ["facts", "introduction", "claims", "parties"] {
        assert!(config.ai.section(section).is_some(), "{} should be enabled", section);
    }
    for section in ["jurisdiction", "prayer", "jury_demand", "exhibits"] {
        assert!(config.ai.section(section).is_none(), "{} should be disabled", section);
    }

    config.ai.enabled = false;
    assert!(config.ai.section("facts").is_none());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    config.ai.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config
        .ai
        .sections
        .insert("facts".to_string(), SectionAiConfig::enabled(3.5, 800, 0.025));
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.billing.price_unlimited = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.referral.min_code_length = 30;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.referral.default_referral_discount_percentage = 120.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.billing.price_unlimited, created.billing.price_unlimited);
    assert_eq!(reloaded.ai.sections, created.ai.sections);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "log_level": "debug", "billing": { "price_unlimited": 299.0 } }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.billing.price_unlimited, 299.0);
    assert_eq!(config.billing.price_pay_per_doc, 149.0);
    assert!(config.ai.section("facts").is_some());
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_logLevel_shouldConvertToLevelFilter() {
    assert_eq!(log::LevelFilter::from(&LogLevel::Warn), log::LevelFilter::Warn);
    assert_eq!(log::LevelFilter::from(&LogLevel::Trace), log::LevelFilter::Trace);
}
