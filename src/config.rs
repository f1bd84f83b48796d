use crate::models::{MatchWeights, RankingConfig};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where the mentor roster comes from
///
/// `source` selects the provider: "file" reads a JSON roster from `path`,
/// "directory" queries the live mentor directory at `endpoint`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_source")]
    pub source: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

fn default_catalog_source() -> String {
    "file".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsSettings {
    #[serde(default = "default_expertise_weight")]
    pub expertise: f64,
    #[serde(default = "default_stage_weight")]
    pub stage: f64,
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
    #[serde(default = "default_style_weight")]
    pub style: f64,
    #[serde(default = "default_narrative_weight")]
    pub narrative: f64,
}

impl Default for WeightsSettings {
    fn default() -> Self {
        Self {
            expertise: default_expertise_weight(),
            stage: default_stage_weight(),
            engagement: default_engagement_weight(),
            style: default_style_weight(),
            narrative: default_narrative_weight(),
        }
    }
}

fn default_expertise_weight() -> f64 { 0.35 }
fn default_stage_weight() -> f64 { 0.20 }
fn default_engagement_weight() -> f64 { 0.15 }
fn default_style_weight() -> f64 { 0.20 }
fn default_narrative_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_great_badge_min")]
    pub great_badge_min: f64,
    #[serde(default = "default_good_badge_min")]
    pub good_badge_min: f64,
    #[serde(default = "default_proven_chais_min")]
    pub proven_chais_min: u32,
    #[serde(default = "default_style_reason_min")]
    pub style_reason_min: f64,
    #[serde(default = "default_narrative_reason_min")]
    pub narrative_reason_min: f64,
    #[serde(default = "default_max_reasons")]
    pub max_reasons: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            great_badge_min: default_great_badge_min(),
            good_badge_min: default_good_badge_min(),
            proven_chais_min: default_proven_chais_min(),
            style_reason_min: default_style_reason_min(),
            narrative_reason_min: default_narrative_reason_min(),
            max_reasons: default_max_reasons(),
        }
    }
}

fn default_great_badge_min() -> f64 { 75.0 }
fn default_good_badge_min() -> f64 { 55.0 }
fn default_proven_chais_min() -> u32 { 25 }
fn default_style_reason_min() -> f64 { 0.8 }
fn default_narrative_reason_min() -> f64 { 0.3 }
fn default_max_reasons() -> usize { 4 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CHAI__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CHAI__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CHAI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CHAI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Build the engine's ranking configuration from these settings
    pub fn ranking_config(&self) -> RankingConfig {
        RankingConfig {
            weights: MatchWeights {
                expertise: self.scoring.weights.expertise,
                stage: self.scoring.weights.stage,
                engagement: self.scoring.weights.engagement,
                style: self.scoring.weights.style,
                narrative: self.scoring.weights.narrative,
            },
            great_badge_min: self.ranking.great_badge_min,
            good_badge_min: self.ranking.good_badge_min,
            proven_chais_min: self.ranking.proven_chais_min,
            style_reason_min: self.ranking.style_reason_min,
            narrative_reason_min: self.ranking.narrative_reason_min,
            max_reasons: self.ranking.max_reasons,
        }
    }
}
