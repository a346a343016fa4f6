use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct PricingSettings {
    pub default_base_price: f64,
    pub default_k: f64,
    pub default_cap: f64,
    pub elasticity: f64,
    pub rush_floor: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            default_base_price: 500.0,
            default_k: 0.6,
            default_cap: 0.3,
            elasticity: 0.8,
            rush_floor: 0.3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizationSettings {
    pub low_percentile: f64,
    pub high_percentile: f64,
    pub min_batch: usize,
    pub epsilon: f64,
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            low_percentile: 0.10,
            high_percentile: 0.90,
            min_batch: 3,
            epsilon: 1e-6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 300 } // 5 minutes
    }
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub enabled: bool,
    pub path: Option<PathBuf>,
    pub timeout_ms: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: None,
            timeout_ms: 2000,
        }
    }
}

impl ModelSettings {
    /// Model inference is used only when switched on and pointed at an artifact
    pub fn artifact(&self) -> Option<&PathBuf> {
        if self.enabled { self.path.as_ref() } else { None }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub pricing: PricingSettings,
    pub normalization: NormalizationSettings,
    pub cache: CacheSettings,
    pub model: ModelSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `USE_ML`, `ML_MODEL_PATH`, `ML_TIMEOUT_MS`
    /// and `PREDICTION_CACHE_TTL_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup("USE_ML") {
            config.model.enabled = parse_flag(&raw);
        }
        config.model.path = lookup("ML_MODEL_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        config.model.timeout_ms = parse_or("ML_TIMEOUT_MS", lookup("ML_TIMEOUT_MS"), config.model.timeout_ms);
        config.cache.ttl_secs = parse_or(
            "PREDICTION_CACHE_TTL_SECS",
            lookup("PREDICTION_CACHE_TTL_SECS"),
            config.cache.ttl_secs,
        );

        config
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring malformed {}={:?}", key, value);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_heuristic_only() {
        let config = AppConfig::from_lookup(|_| None);
        assert!(!config.model.enabled);
        assert!(config.model.artifact().is_none());
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.pricing.default_k, 0.6);
        assert_eq!(config.pricing.default_cap, 0.3);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("USE_ML", "true"),
            ("ML_MODEL_PATH", "/models/rush.json"),
            ("ML_TIMEOUT_MS", "150"),
            ("PREDICTION_CACHE_TTL_SECS", "60"),
        ]));
        assert_eq!(config.model.artifact(), Some(&PathBuf::from("/models/rush.json")));
        assert_eq!(config.model.timeout_ms, 150);
        assert_eq!(config.cache.ttl_secs, 60);
    }

    #[test]
    fn test_path_without_switch_is_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[("ML_MODEL_PATH", "/models/rush.json")]));
        assert!(config.model.artifact().is_none());
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("USE_ML", "maybe"),
            ("ML_TIMEOUT_MS", "soon"),
        ]));
        assert!(!config.model.enabled);
        assert_eq!(config.model.timeout_ms, 2000);
    }
}
