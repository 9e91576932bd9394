use crate::capability::Benchmarks;
use crate::error::{InsightsError, Result};
use crate::taxonomy::Dimension;
use crate::weakness::SentimentWeaknessOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Main configuration structure loaded from readiness.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Per-dimension benchmark overrides keyed by dimension id ("1".."8")
    #[serde(default)]
    pub benchmarks: BTreeMap<String, f64>,
}

/// Thresholds used by the analyzers
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub default_benchmark: f64,
    pub sentiment_threshold: f64,
    pub sentiment_critical_threshold: f64,
    pub weakness_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let s = SentimentWeaknessOptions::default();
        Self {
            default_benchmark: crate::capability::DEFAULT_BENCHMARK,
            sentiment_threshold: s.threshold,
            sentiment_critical_threshold: s.critical_threshold,
            weakness_limit: s.limit,
        }
    }
}

/// Where the mini-intervention table lives
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// File path or http(s) URL
    pub source: String,
    pub http_timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "data/categoriesandactionainav.csv".to_string(),
            http_timeout_ms: 20_000,
        }
    }
}

impl Config {
    /// Load configuration: .env, then TOML file, then env overrides.
    pub fn load() -> Result<Self> {
        // 1) READINESS_ENV_FILE if set, 2) ./.env
        if let Ok(env_path) = std::env::var("READINESS_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }

        let config_path =
            std::env::var("READINESS_CONFIG").unwrap_or_else(|_| "readiness.toml".to_string());

        let mut config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `READINESS_*` overrides from any key lookup (env in production).
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse::<T>() {
                Ok(v) => {
                    tracing::debug!("{} env override applied", key);
                    Some(v)
                }
                Err(_) => {
                    tracing::warn!("Ignoring unparseable {}={}", key, raw);
                    None
                }
            }
        }

        if let Some(src) = lookup("READINESS_CATALOG_SOURCE")
            && !src.trim().is_empty()
        {
            self.catalog.source = src.trim().to_string();
            tracing::debug!("READINESS_CATALOG_SOURCE env override applied");
        }
        if let Some(v) = parsed(&lookup, "READINESS_HTTP_TIMEOUT_MS") {
            self.catalog.http_timeout_ms = v;
        }
        if let Some(v) = parsed(&lookup, "READINESS_DEFAULT_BENCHMARK") {
            self.analysis.default_benchmark = v;
        }
        if let Some(v) = parsed(&lookup, "READINESS_SENTIMENT_THRESHOLD") {
            self.analysis.sentiment_threshold = v;
        }
        if let Some(v) = parsed(&lookup, "READINESS_SENTIMENT_CRITICAL") {
            self.analysis.sentiment_critical_threshold = v;
        }
        if let Some(v) = parsed(&lookup, "READINESS_WEAKNESS_LIMIT") {
            self.analysis.weakness_limit = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| -> Result<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(InsightsError::Config {
                    message: format!("{} must be a positive number, got {}", name, v),
                });
            }
            Ok(())
        };
        positive("analysis.default_benchmark", self.analysis.default_benchmark)?;
        positive("analysis.sentiment_threshold", self.analysis.sentiment_threshold)?;
        positive(
            "analysis.sentiment_critical_threshold",
            self.analysis.sentiment_critical_threshold,
        )?;
        if self.analysis.sentiment_critical_threshold < self.analysis.sentiment_threshold {
            return Err(InsightsError::Config {
                message: "analysis.sentiment_critical_threshold must not be below sentiment_threshold"
                    .into(),
            });
        }
        if self.catalog.http_timeout_ms == 0 {
            return Err(InsightsError::Config {
                message: "catalog.http_timeout_ms must be > 0".into(),
            });
        }
        for (key, value) in &self.benchmarks {
            let id: Option<u8> = key.trim().parse().ok();
            if id.and_then(Dimension::from_id).is_none() {
                return Err(InsightsError::Config {
                    message: format!("benchmarks: unknown dimension id '{}'", key),
                });
            }
            positive(&format!("benchmarks.{}", key), *value)?;
        }
        Ok(())
    }

    pub fn benchmarks(&self) -> Benchmarks {
        let mut b = Benchmarks::uniform(self.analysis.default_benchmark);
        for (key, value) in &self.benchmarks {
            if let Some(dim) = key.trim().parse::<u8>().ok().and_then(Dimension::from_id) {
                b = b.with(dim, *value);
            }
        }
        b
    }

    pub fn sentiment_options(&self) -> SentimentWeaknessOptions {
        SentimentWeaknessOptions {
            threshold: self.analysis.sentiment_threshold,
            critical_threshold: self.analysis.sentiment_critical_threshold,
            limit: self.analysis.weakness_limit,
        }
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.catalog.http_timeout_ms)
    }
}
