use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// SQLite database file; the platform data directory is used when unset
    #[serde(default)]
    pub database_path: Option<String>,

    /// AI enhancement and transcription config
    #[serde(default)]
    pub ai: AiConfig,

    /// Plan pricing and AI budget figures
    #[serde(default)]
    pub billing: BillingConfig,

    /// Referral code rules
    #[serde(default)]
    pub referral: ReferralSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Per-section AI settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SectionAiConfig {
    // @field: Whether AI may rewrite this section
    #[serde(default)]
    pub enabled: bool,

    // @field: Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Completion token cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    // @field: Budget reserved per call, in dollars
    #[serde(default = "default_estimated_cost")]
    pub estimated_cost: f64,
}

impl SectionAiConfig {
    // @returns: Enabled section config
    pub fn enabled(temperature: f32, max_tokens: u32, estimated_cost: f64) -> Self {
        Self {
            enabled: true,
            model: default_model(),
            temperature,
            max_tokens,
            estimated_cost,
        }
    }

    // @returns: Section config that always falls back to the template
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            estimated_cost: default_estimated_cost(),
        }
    }
}

/// OpenAI service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AiConfig {
    /// Master switch for AI enhancement
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// API key for the service; `OPENAI_API_KEY` is used when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System prompt sent with every enhancement request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Per section type settings, keyed by section label
    #[serde(default = "default_section_configs")]
    pub sections: BTreeMap<String, SectionAiConfig>,

    /// Whisper model used for transcripts
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    /// yt-dlp download timeout in seconds
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            endpoint: default_openai_endpoint(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
            sections: default_section_configs(),
            transcription_model: default_transcription_model(),
            download_timeout_secs: default_download_timeout_secs(),
        }
    }
}

impl AiConfig {
    /// Get the API key, falling back to the environment
    pub fn get_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }

        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Settings for a section type, if AI is enabled for it
    pub fn section(&self, section_type: &str) -> Option<&SectionAiConfig> {
        if !self.enabled {
            return None;
        }

        self.sections
            .get(section_type)
            .filter(|config| config.enabled)
    }
}

/// Plan pricing and AI budget settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BillingConfig {
    /// One-off document price
    #[serde(default = "default_price_pay_per_doc")]
    pub price_pay_per_doc: f64,

    /// Unlimited plan price
    #[serde(default = "default_price_unlimited")]
    pub price_unlimited: f64,

    /// AI budget granted to new accounts
    #[serde(default = "default_free_api_cost_limit")]
    pub free_api_cost_limit: f64,

    /// AI credit added to unlimited subscriptions each month
    #[serde(default = "default_unlimited_monthly_credit")]
    pub unlimited_monthly_credit: f64,

    /// AI budget added per pay-per-document purchase
    #[serde(default = "default_pay_per_doc_credit")]
    pub pay_per_doc_credit: f64,

    /// Rough AI spend for one fully enhanced document
    #[serde(default = "default_avg_cost_per_doc")]
    pub avg_cost_per_doc: f64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            price_pay_per_doc: default_price_pay_per_doc(),
            price_unlimited: default_price_unlimited(),
            free_api_cost_limit: default_free_api_cost_limit(),
            unlimited_monthly_credit: default_unlimited_monthly_credit(),
            pay_per_doc_credit: default_pay_per_doc_credit(),
            avg_cost_per_doc: default_avg_cost_per_doc(),
        }
    }
}

/// Referral program settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReferralSettings {
    /// Percentage discount granted by newly created referral codes
    #[serde(default = "default_referral_discount_percentage")]
    pub default_referral_discount_percentage: f64,

    /// Shortest accepted referral code
    #[serde(default = "default_min_code_length")]
    pub min_code_length: usize,

    /// Longest accepted referral code
    #[serde(default = "default_max_code_length")]
    pub max_code_length: usize,
}

impl Default for ReferralSettings {
    fn default() -> Self {
        Self {
            default_referral_discount_percentage: default_referral_discount_percentage(),
            min_code_length: default_min_code_length(),
            max_code_length: default_max_code_length(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_download_timeout_secs() -> u64 {
    60
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    400
}

fn default_estimated_cost() -> f64 {
    0.02
}

fn default_system_prompt() -> String {
    "You are an expert legal writer specializing in federal civil rights litigation under 42 U.S.C. § 1983.".to_string()
}

fn default_section_configs() -> BTreeMap<String, SectionAiConfig> {
    let mut sections = BTreeMap::new();
    sections.insert("facts".to_string(), SectionAiConfig::enabled(0.3, 800, 0.025));
    sections.insert("introduction".to_string(), SectionAiConfig::enabled(0.3, 400, 0.015));
    // Low temperature keeps citations intact
    sections.insert("claims".to_string(), SectionAiConfig::enabled(0.2, 800, 0.025));
    sections.insert("parties".to_string(), SectionAiConfig::enabled(0.3, 300, 0.012));
    sections.insert("jurisdiction".to_string(), SectionAiConfig::disabled());
    sections.insert("prayer".to_string(), SectionAiConfig::disabled());
    sections.insert("jury_demand".to_string(), SectionAiConfig::disabled());
    sections
}

fn default_price_pay_per_doc() -> f64 {
    149.0
}

fn default_price_unlimited() -> f64 {
    499.0
}

fn default_free_api_cost_limit() -> f64 {
    0.50
}

fn default_unlimited_monthly_credit() -> f64 {
    10.0
}

fn default_pay_per_doc_credit() -> f64 {
    5.0
}

fn default_avg_cost_per_doc() -> f64 {
    0.06
}

fn default_referral_discount_percentage() -> f64 {
    25.0
}

fn default_min_code_length() -> usize {
    4
}

fn default_max_code_length() -> usize {
    20
}

impl Config {
    /// Load the configuration from a JSON file, writing defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Database location, resolved against the platform data directory when unset
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database_path
            .as_ref()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.ai.enabled && self.ai.get_api_key().is_none() {
            warn!("AI enhancement is enabled but no OpenAI API key is configured; sections will use templates");
        }

        if self.ai.timeout_secs == 0 {
            return Err(anyhow!("AI request timeout must be greater than zero"));
        }

        for (section_type, section) in &self.ai.sections {
            if section.enabled && section.model.trim().is_empty() {
                return Err(anyhow!("AI model is required for section '{}'", section_type));
            }
            if !(0.0..=2.0).contains(&section.temperature) {
                return Err(anyhow!(
                    "Temperature for section '{}' must be between 0.0 and 2.0",
                    section_type
                ));
            }
            if section.estimated_cost < 0.0 {
                return Err(anyhow!("Estimated cost for section '{}' cannot be negative", section_type));
            }
        }

        if self.billing.price_pay_per_doc <= 0.0 || self.billing.price_unlimited <= 0.0 {
            return Err(anyhow!("Plan prices must be positive"));
        }

        if self.billing.avg_cost_per_doc <= 0.0 {
            return Err(anyhow!("Average cost per document must be positive"));
        }

        if self.referral.min_code_length == 0
            || self.referral.min_code_length > self.referral.max_code_length
        {
            return Err(anyhow!(
                "Referral code length range {}..={} is invalid",
                self.referral.min_code_length,
                self.referral.max_code_length
            ));
        }

        if !(0.0..=100.0).contains(&self.referral.default_referral_discount_percentage) {
            return Err(anyhow!("Referral discount percentage must be between 0 and 100"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            ai: AiConfig::default(),
            billing: BillingConfig::default(),
            referral: ReferralSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shouldValidate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_section_withDisabledBoilerplate_shouldReturnNone() {
        let ai = AiConfig::default();
        assert!(ai.section("jurisdiction").is_none());
        assert!(ai.section("prayer").is_none());
        assert_eq!(ai.section("claims").map(|s| s.max_tokens), Some(800));
    }

    #[test]
    fn test_section_withMasterSwitchOff_shouldReturnNone() {
        let ai = AiConfig {
            enabled: false,
            ..AiConfig::default()
        };
        assert!(ai.section("facts").is_none());
    }

    #[test]
    fn test_validate_withInvertedCodeLengths_shouldFail() {
        let mut config = Config::default();
        config.referral.min_code_length = 30;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_withEmptyObject_shouldUseDefaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.billing.price_unlimited, 499.0);
        assert_eq!(config.ai.sections.len(), 7);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
